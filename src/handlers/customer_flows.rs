use std::error::Error;

use crate::clients::rest_client::{CollectionKind, RestClient};
use crate::handlers::ConfirmationPrompt;
use crate::handlers::forms;
use crate::handlers::table::render_table;
use crate::models::customer::CustomerForm;
use crate::service::export::{self, FileExporter};
use crate::service::tabular;

pub async fn list_customers(
    client: &RestClient,
    search: &str,
    sort: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let customers = client.fetch_customers().await?;
    let columns = tabular::customer_columns();
    let mut rows = tabular::filter_records(&customers, search);
    if let Some(key) = sort {
        if !tabular::sort_by_column(&mut rows, &columns, key) {
            println!("Unknown sort column: {key}");
        }
    }
    println!("{}", render_table(&columns, &rows));
    println!("{} of {} customers", rows.len(), customers.len());
    Ok(())
}

pub async fn add_customer(client: &RestClient) -> Result<(), Box<dyn Error>> {
    let form = forms::prompt_customer_form(&CustomerForm::default())?;
    forms::validate_customer(&form)?;
    client.create_customer(&form).await?;
    println!("Customer added.");
    Ok(())
}

/// Pre-fills the form with the current values and PUTs the full
/// replacement back to the customer's canonical URL.
pub async fn edit_customer(client: &RestClient) -> Result<(), Box<dyn Error>> {
    let customers = client.fetch_customers().await?;
    let Some(customer) = forms::select_customer(customers, "Select a customer to edit")? else {
        println!("No customers found.");
        return Ok(());
    };
    let form = forms::prompt_customer_form(&CustomerForm::from(&customer))?;
    forms::validate_customer(&form)?;
    let url = customer
        .self_url()
        .ok_or("customer is missing its canonical link")?;
    client.replace_customer(url, &form).await?;
    println!("Customer updated.");
    Ok(())
}

pub async fn delete_customer(
    client: &RestClient,
    prompt: &dyn ConfirmationPrompt,
) -> Result<(), Box<dyn Error>> {
    let customers = client.fetch_customers().await?;
    let Some(customer) = forms::select_customer(customers, "Select a customer to delete")? else {
        println!("No customers found.");
        return Ok(());
    };
    let url = customer
        .self_url()
        .ok_or("customer is missing its canonical link")?;
    if !prompt.confirm("Are you sure you want to delete this customer?") {
        println!("Delete cancelled.");
        return Ok(());
    }
    client.delete(CollectionKind::Customers, url).await?;
    println!("Customer deleted.");
    Ok(())
}

/// Exports the currently filtered rows, not the whole collection.
pub async fn export_customers(
    client: &RestClient,
    exporter: &dyn FileExporter,
    search: &str,
) -> Result<(), Box<dyn Error>> {
    let customers = client.fetch_customers().await?;
    let rows = tabular::filter_records(&customers, search);
    if rows.is_empty() {
        println!("Nothing to export.");
        return Ok(());
    }
    let csv = export::to_csv(&export::customer_export_columns(), &rows);
    exporter.save(export::CUSTOMERS_CSV, &csv)?;
    println!("Exported {} rows to {}", rows.len(), export::CUSTOMERS_CSV);
    Ok(())
}
