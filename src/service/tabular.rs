use uuid::Uuid;

use crate::models::customer::Customer;
use crate::service::enrichment::EnrichedTraining;

/// Fallback customer name shown in list views and exports when the
/// linked customer cannot be resolved.
pub const FALLBACK_CUSTOMER_NAME: &str = "Unknown";

const DATE_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// A record that can appear as a table row.
pub trait TableRecord {
    /// Display identity: the canonical URL, or a synthesized unique key
    /// for malformed rows that lack one.
    fn row_id(&self) -> String;

    /// Stringified own fields, scanned by the whole-record search.
    fn field_values(&self) -> Vec<String>;
}

impl TableRecord for Customer {
    fn row_id(&self) -> String {
        match self.self_url() {
            Some(url) => url.to_string(),
            None => Uuid::new_v4().to_string(),
        }
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.firstname.clone(),
            self.lastname.clone(),
            self.streetaddress.clone(),
            self.postcode.clone(),
            self.city.clone(),
            self.email.clone(),
            self.phone.clone(),
        ]
    }
}

impl TableRecord for EnrichedTraining {
    fn row_id(&self) -> String {
        match self.training.self_url() {
            Some(url) => url.to_string(),
            None => format!("{}-{}", self.training.activity, Uuid::new_v4()),
        }
    }

    fn field_values(&self) -> Vec<String> {
        let date = match self.training.date {
            Some(date) => date.to_rfc3339(),
            None => String::new(),
        };
        vec![
            date,
            self.training.duration.to_string(),
            self.training.activity.clone(),
            self.customer_name.clone(),
        ]
    }
}

/// Static column metadata for one entity kind.
pub struct Column<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub width: usize,
    pub sortable: bool,
    pub render: fn(&R) -> String,
}

pub fn customer_columns() -> Vec<Column<Customer>> {
    vec![
        Column {
            key: "firstname",
            label: "First name",
            width: 15,
            sortable: true,
            render: |c: &Customer| c.firstname.clone(),
        },
        Column {
            key: "lastname",
            label: "Last name",
            width: 15,
            sortable: true,
            render: |c: &Customer| c.lastname.clone(),
        },
        Column {
            key: "streetaddress",
            label: "Address",
            width: 20,
            sortable: true,
            render: |c: &Customer| c.streetaddress.clone(),
        },
        Column {
            key: "postcode",
            label: "Postcode",
            width: 9,
            sortable: true,
            render: |c: &Customer| c.postcode.clone(),
        },
        Column {
            key: "city",
            label: "City",
            width: 12,
            sortable: true,
            render: |c: &Customer| c.city.clone(),
        },
        Column {
            key: "email",
            label: "Email",
            width: 22,
            sortable: true,
            render: |c: &Customer| c.email.clone(),
        },
        Column {
            key: "phone",
            label: "Phone",
            width: 14,
            sortable: true,
            render: |c: &Customer| c.phone.clone(),
        },
    ]
}

pub fn training_columns() -> Vec<Column<EnrichedTraining>> {
    vec![
        Column {
            key: "date",
            label: "Date",
            width: 17,
            sortable: true,
            render: |t: &EnrichedTraining| match t.training.date {
                Some(date) => date.format(DATE_DISPLAY_FORMAT).to_string(),
                None => "No date".to_string(),
            },
        },
        Column {
            key: "duration",
            label: "Duration (min)",
            width: 14,
            sortable: true,
            render: |t: &EnrichedTraining| t.training.duration.to_string(),
        },
        Column {
            key: "activity",
            label: "Activity",
            width: 15,
            sortable: true,
            render: |t: &EnrichedTraining| t.training.activity.clone(),
        },
        Column {
            key: "customerName",
            label: "Customer",
            width: 20,
            sortable: true,
            render: |t: &EnrichedTraining| t.customer_name.clone(),
        },
    ]
}

/// Whole-record search: a record matches when any of its fields contains
/// the term as a case-insensitive substring. An empty term matches all.
pub fn filter_records<'a, R: TableRecord>(records: &'a [R], search: &str) -> Vec<&'a R> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .field_values()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sort rows by one column's rendered value. Returns false when the key
/// names no sortable column, leaving the order untouched.
pub fn sort_by_column<R>(rows: &mut [&R], columns: &[Column<R>], key: &str) -> bool {
    let Some(column) = columns.iter().find(|c| c.key == key && c.sortable) else {
        return false;
    };
    rows.sort_by_key(|row| (column.render)(*row));
    true
}
