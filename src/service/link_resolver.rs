use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::ResourceUrl;

/// Failure while resolving a linked customer. Never leaves this module's
/// callers: resolution always degrades to a fallback label.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("customer lookup failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("customer lookup failed: {0}")]
    Other(String),
}

/// Fetches the raw JSON representation behind a customer link.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn fetch_customer(&self, url: &ResourceUrl) -> Result<Value, ResolutionError>;
}

// The linked resource's shape has drifted across API versions; each
// logical attribute keeps an ordered list of candidate paths.
const FIRSTNAME_PATHS: &[&[&str]] = &[&["firstname"], &["firstName"], &["customer", "firstname"]];
const LASTNAME_PATHS: &[&[&str]] = &[&["lastname"], &["lastName"], &["customer", "lastname"]];

/// Walk each candidate path in order and return the first non-empty
/// string found, or "" when no path yields one.
fn first_non_empty(value: &Value, paths: &[&[&str]]) -> String {
    for path in paths {
        if let Some(text) = leaf_str(value, path) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    String::new()
}

fn leaf_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str()
}

/// Resolve the display name of the customer behind `href`.
///
/// An absent link returns `fallback` without a network call. A fetch or
/// parse failure is logged and treated as an empty extraction. When at
/// least one name part is present the two are joined with a single
/// space, even if the other side is empty.
pub async fn resolve_customer_name(
    lookup: &dyn CustomerLookup,
    href: Option<&ResourceUrl>,
    fallback: &str,
) -> String {
    let Some(url) = href else {
        return fallback.to_string();
    };
    let body = match lookup.fetch_customer(url).await {
        Ok(body) => body,
        Err(err) => {
            warn!("failed to fetch customer for training: {err}");
            Value::Null
        }
    };
    let first = first_non_empty(&body, FIRSTNAME_PATHS);
    let last = first_non_empty(&body, LASTNAME_PATHS);
    if first.is_empty() && last.is_empty() {
        fallback.to_string()
    } else {
        format!("{first} {last}")
    }
}
