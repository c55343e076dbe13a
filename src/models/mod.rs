pub mod customer;
pub mod training;

use serde::{Deserialize, Serialize};

/// Canonical URL of a remote resource. The server addresses every customer
/// and training by such a URL; it is the only identity a resource has.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. "7" for ".../customers/7". Only used as the
    /// id column of CSV exports.
    pub fn tail_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }
}

impl std::fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a HAL `_links` object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: ResourceUrl,
}
