use serde::{Deserialize, Serialize};

use super::{Link, ResourceUrl};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CustomerLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
}

/// A customer as returned by the remote service. Identity lives in
/// `_links.self.href`; the record itself carries no id field.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Customer {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub streetaddress: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "_links", default)]
    pub links: CustomerLinks,
}

impl Customer {
    pub fn self_url(&self) -> Option<&ResourceUrl> {
        self.links.self_link.as_ref().map(|link| &link.href)
    }
}

/// The writable fields of a customer, sent as the body of create and
/// replace requests. The server echoes back the full representation.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CustomerForm {
    pub firstname: String,
    pub lastname: String,
    pub streetaddress: String,
    pub postcode: String,
    pub city: String,
    pub email: String,
    pub phone: String,
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            firstname: customer.firstname.clone(),
            lastname: customer.lastname.clone(),
            streetaddress: customer.streetaddress.clone(),
            postcode: customer.postcode.clone(),
            city: customer.city.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }
}
