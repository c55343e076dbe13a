use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Link, ResourceUrl};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TrainingLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Link>,
}

/// A training session. References its owning customer only through
/// `_links.customer.href`; the date can be absent on malformed rows.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Training {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub activity: String,
    #[serde(rename = "_links", default)]
    pub links: TrainingLinks,
}

impl Training {
    pub fn self_url(&self) -> Option<&ResourceUrl> {
        self.links.self_link.as_ref().map(|link| &link.href)
    }

    pub fn customer_url(&self) -> Option<&ResourceUrl> {
        self.links.customer.as_ref().map(|link| &link.href)
    }
}

/// Body of a training create request: the start instant, an activity
/// label, a duration in minutes and the owning customer's canonical URL.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrainingForm {
    pub date: DateTime<Utc>,
    pub activity: String,
    pub duration: u32,
    pub customer: ResourceUrl,
}
