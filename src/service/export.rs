use std::fs;
use std::io;

use crate::models::customer::Customer;
use crate::service::enrichment::EnrichedTraining;

pub const CUSTOMERS_CSV: &str = "customers.csv";
pub const TRAININGS_CSV: &str = "trainings.csv";

// Leading BOM so locale-sensitive spreadsheet tools open the file as
// UTF-8 and honor the semicolon separator.
const BOM: &str = "\u{feff}";
const DATE_EXPORT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One column of a delimited export: header key plus value accessor.
pub struct ExportColumn<R> {
    pub key: &'static str,
    pub value: fn(&R) -> String,
}

pub fn customer_export_columns() -> Vec<ExportColumn<Customer>> {
    vec![
        ExportColumn {
            key: "id",
            value: |c: &Customer| {
                c.self_url()
                    .map(|url| url.tail_segment().to_string())
                    .unwrap_or_default()
            },
        },
        ExportColumn {
            key: "firstname",
            value: |c: &Customer| c.firstname.clone(),
        },
        ExportColumn {
            key: "lastname",
            value: |c: &Customer| c.lastname.clone(),
        },
        ExportColumn {
            key: "streetaddress",
            value: |c: &Customer| c.streetaddress.clone(),
        },
        ExportColumn {
            key: "postcode",
            value: |c: &Customer| c.postcode.clone(),
        },
        ExportColumn {
            key: "city",
            value: |c: &Customer| c.city.clone(),
        },
        ExportColumn {
            key: "email",
            value: |c: &Customer| c.email.clone(),
        },
        ExportColumn {
            key: "phone",
            value: |c: &Customer| c.phone.clone(),
        },
    ]
}

pub fn training_export_columns() -> Vec<ExportColumn<EnrichedTraining>> {
    vec![
        ExportColumn {
            key: "id",
            value: |t: &EnrichedTraining| {
                t.training
                    .self_url()
                    .map(|url| url.tail_segment().to_string())
                    .unwrap_or_default()
            },
        },
        ExportColumn {
            key: "date",
            value: |t: &EnrichedTraining| match t.training.date {
                Some(date) => date.format(DATE_EXPORT_FORMAT).to_string(),
                None => String::new(),
            },
        },
        ExportColumn {
            key: "duration",
            value: |t: &EnrichedTraining| t.training.duration.to_string(),
        },
        ExportColumn {
            key: "activity",
            value: |t: &EnrichedTraining| t.training.activity.clone(),
        },
        ExportColumn {
            key: "customerName",
            value: |t: &EnrichedTraining| t.customer_name.clone(),
        },
    ]
}

/// Serialize rows to the export format: BOM-prefixed, semicolon
/// separated, an unquoted header row of column keys, and every data
/// field double-quoted with embedded quotes doubled.
pub fn to_csv<R>(columns: &[ExportColumn<R>], rows: &[&R]) -> String {
    let header = columns
        .iter()
        .map(|column| column.key)
        .collect::<Vec<_>>()
        .join(";");
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header);
    for row in rows {
        let line = columns
            .iter()
            .map(|column| quote(&(column.value)(row)))
            .collect::<Vec<_>>()
            .join(";");
        lines.push(line);
    }
    format!("{BOM}{}", lines.join("\n"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Side-effecting half of the export: where the serialized document
/// ends up. Injected so the serialization above stays pure.
pub trait FileExporter {
    fn save(&self, filename: &str, contents: &str) -> io::Result<()>;
}

/// Writes export files into the current working directory.
pub struct DiskExporter;

impl FileExporter for DiskExporter {
    fn save(&self, filename: &str, contents: &str) -> io::Result<()> {
        fs::write(filename, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerLinks;
    use crate::models::{Link, ResourceUrl};

    fn ann() -> Customer {
        Customer {
            firstname: "Ann".to_string(),
            lastname: "Lee".to_string(),
            streetaddress: "Main St 1".to_string(),
            postcode: "00100".to_string(),
            city: "Helsinki".to_string(),
            email: "ann@example.org".to_string(),
            phone: "0401234567".to_string(),
            links: CustomerLinks {
                self_link: Some(Link {
                    href: ResourceUrl::new("http://x/api/customers/7"),
                }),
            },
        }
    }

    #[test]
    fn document_has_bom_header_and_one_line_per_row() {
        let customers = vec![ann()];
        let rows: Vec<&Customer> = customers.iter().collect();
        let csv = to_csv(&customer_export_columns(), &rows);

        let body = csv.strip_prefix('\u{feff}').expect("missing BOM");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "id;firstname;lastname;streetaddress;postcode;city;email;phone"
        );
        assert_eq!(
            lines[1],
            "\"7\";\"Ann\";\"Lee\";\"Main St 1\";\"00100\";\"Helsinki\";\"ann@example.org\";\"0401234567\""
        );
    }

    #[test]
    fn id_column_is_the_url_tail_and_empty_without_a_link() {
        let mut orphan = ann();
        orphan.links = CustomerLinks::default();
        let customers = vec![orphan];
        let rows: Vec<&Customer> = customers.iter().collect();
        let csv = to_csv(&customer_export_columns(), &rows);
        assert!(csv.lines().nth(1).unwrap().starts_with("\"\";\"Ann\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut tricky = ann();
        tricky.streetaddress = "Main \"B\" St".to_string();
        let customers = vec![tricky];
        let rows: Vec<&Customer> = customers.iter().collect();
        let csv = to_csv(&customer_export_columns(), &rows);
        assert!(csv.contains("\"Main \"\"B\"\" St\""));
    }
}
