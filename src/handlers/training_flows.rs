use std::error::Error;

use inquire::{Select, Text};

use crate::clients::rest_client::{CollectionKind, RestClient};
use crate::handlers::ConfirmationPrompt;
use crate::handlers::forms;
use crate::handlers::table::render_table;
use crate::models::training::TrainingForm;
use crate::service::enrichment::{EnrichedTraining, enrich_trainings};
use crate::service::export::{self, FileExporter};
use crate::service::tabular;

pub async fn list_trainings(
    client: &RestClient,
    search: &str,
    sort: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let trainings = client.fetch_trainings().await?;
    let enriched = enrich_trainings(client, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;
    let columns = tabular::training_columns();
    let mut rows = tabular::filter_records(&enriched, search);
    if let Some(key) = sort {
        if !tabular::sort_by_column(&mut rows, &columns, key) {
            println!("Unknown sort column: {key}");
        }
    }
    println!("{}", render_table(&columns, &rows));
    println!("{} of {} trainings", rows.len(), enriched.len());
    Ok(())
}

pub async fn add_training(client: &RestClient) -> Result<(), Box<dyn Error>> {
    let customers = client.fetch_customers().await?;
    let Some(customer) =
        forms::select_customer(customers, "Select the customer for this training")?
    else {
        println!("No customers found.");
        return Ok(());
    };
    let customer_url = customer
        .self_url()
        .ok_or("customer is missing its canonical link")?;

    let activity = Text::new("Activity").prompt()?;
    let duration = Text::new("Duration (min)").prompt()?;
    let date = Text::new("Start time (YYYY-MM-DD HH:MM)").prompt()?;
    let (activity, duration, date) = forms::parse_training_input(&activity, &duration, &date)?;

    let form = TrainingForm {
        date,
        activity,
        duration,
        customer: customer_url.clone(),
    };
    client.create_training(&form).await?;
    println!("Training added.");
    Ok(())
}

struct TrainingChoice(EnrichedTraining);

impl std::fmt::Display for TrainingChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let date = match self.0.training.date {
            Some(date) => date.format("%d.%m.%Y %H:%M").to_string(),
            None => "No date".to_string(),
        };
        write!(
            f,
            "{}  {} ({} min) - {}",
            date, self.0.training.activity, self.0.training.duration, self.0.customer_name
        )
    }
}

pub async fn delete_training(
    client: &RestClient,
    prompt: &dyn ConfirmationPrompt,
) -> Result<(), Box<dyn Error>> {
    let trainings = client.fetch_trainings().await?;
    let enriched = enrich_trainings(client, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;
    if enriched.is_empty() {
        println!("No trainings found.");
        return Ok(());
    }
    let choices: Vec<TrainingChoice> = enriched.into_iter().map(TrainingChoice).collect();
    let choice = Select::new("Select a training to delete", choices).prompt()?;
    let Some(url) = choice.0.training.self_url() else {
        println!("Cannot delete training: missing resource link.");
        return Ok(());
    };
    if !prompt.confirm("Are you sure you want to delete this training?") {
        println!("Delete cancelled.");
        return Ok(());
    }
    client.delete(CollectionKind::Trainings, url).await?;
    println!("Training deleted.");
    Ok(())
}

pub async fn export_trainings(
    client: &RestClient,
    exporter: &dyn FileExporter,
    search: &str,
) -> Result<(), Box<dyn Error>> {
    let trainings = client.fetch_trainings().await?;
    let enriched = enrich_trainings(client, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;
    let rows = tabular::filter_records(&enriched, search);
    if rows.is_empty() {
        println!("Nothing to export.");
        return Ok(());
    }
    let csv = export::to_csv(&export::training_export_columns(), &rows);
    exporter.save(export::TRAININGS_CSV, &csv)?;
    println!("Exported {} rows to {}", rows.len(), export::TRAININGS_CSV);
    Ok(())
}
