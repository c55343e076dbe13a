use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use inquire::{InquireError, Select, Text};
use thiserror::Error;

use crate::models::customer::{Customer, CustomerForm};

/// Client-side required-field check, run before any request is sent.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {0}")]
    InvalidField(&'static str),
}

pub fn validate_customer(form: &CustomerForm) -> Result<(), ValidationError> {
    if form.firstname.trim().is_empty() {
        return Err(ValidationError::MissingField("firstname"));
    }
    if form.lastname.trim().is_empty() {
        return Err(ValidationError::MissingField("lastname"));
    }
    Ok(())
}

/// Parse the raw add-training inputs. Activity, duration and date are
/// all required.
pub fn parse_training_input(
    activity: &str,
    duration: &str,
    date: &str,
) -> Result<(String, u32, DateTime<Utc>), ValidationError> {
    let activity = activity.trim();
    if activity.is_empty() {
        return Err(ValidationError::MissingField("activity"));
    }
    let duration = duration.trim();
    if duration.is_empty() {
        return Err(ValidationError::MissingField("duration"));
    }
    let duration: u32 = duration
        .parse()
        .map_err(|_| ValidationError::InvalidField("duration"))?;
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingField("date"));
    }
    let date = parse_start_time(date).ok_or(ValidationError::InvalidField("date"))?;
    Ok((activity.to_string(), duration, date))
}

/// Accepts RFC 3339 or a plain "YYYY-MM-DD HH:MM" read as UTC.
pub fn parse_start_time(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn parse_plain_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

pub fn prompt_customer_form(initial: &CustomerForm) -> Result<CustomerForm, InquireError> {
    Ok(CustomerForm {
        firstname: Text::new("First name")
            .with_initial_value(&initial.firstname)
            .prompt()?,
        lastname: Text::new("Last name")
            .with_initial_value(&initial.lastname)
            .prompt()?,
        streetaddress: Text::new("Streetaddress")
            .with_initial_value(&initial.streetaddress)
            .prompt()?,
        postcode: Text::new("Postcode")
            .with_initial_value(&initial.postcode)
            .prompt()?,
        city: Text::new("City")
            .with_initial_value(&initial.city)
            .prompt()?,
        email: Text::new("Email")
            .with_initial_value(&initial.email)
            .prompt()?,
        phone: Text::new("Phone")
            .with_initial_value(&initial.phone)
            .prompt()?,
    })
}

struct CustomerChoice(Customer);

impl std::fmt::Display for CustomerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} <{}>",
            self.0.firstname, self.0.lastname, self.0.email
        )
    }
}

/// Pick one customer from a fetched list. Returns None when the list is
/// empty.
pub fn select_customer(
    customers: Vec<Customer>,
    message: &str,
) -> Result<Option<Customer>, InquireError> {
    if customers.is_empty() {
        return Ok(None);
    }
    let choices: Vec<CustomerChoice> = customers.into_iter().map(CustomerChoice).collect();
    let choice = Select::new(message, choices).prompt()?;
    Ok(Some(choice.0))
}
