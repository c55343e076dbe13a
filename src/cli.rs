use clap::{Parser, Subcommand};

use crate::clients::rest_client::RestClient;
use crate::handlers::{TerminalPrompt, calendar_screen, customer_flows, training_flows};
use crate::service::export::DiskExporter;

#[derive(Parser)]
#[command(name = "trainerdesk", about = "Gym customer and training administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, add, edit, delete and export customers
    Customers {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// List, add, delete and export training sessions
    Trainings {
        #[command(subcommand)]
        command: TrainingCommands,
    },
    /// Browse trainings on a day/week/month calendar
    Calendar,
}

#[derive(Subcommand)]
enum CustomerCommands {
    List {
        /// Keep only rows where any field contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Column key to sort by
        #[arg(long)]
        sort: Option<String>,
    },
    Add,
    Edit,
    Delete,
    Export {
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand)]
enum TrainingCommands {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<String>,
    },
    Add,
    Delete,
    Export {
        #[arg(long, default_value = "")]
        search: String,
    },
}

pub async fn cli(client: &RestClient) {
    // Fine to panic here
    let cli = Cli::parse();
    let prompt = TerminalPrompt;
    let exporter = DiskExporter;
    let outcome = match &cli.command {
        Commands::Customers { command } => match command {
            CustomerCommands::List { search, sort } => {
                customer_flows::list_customers(client, search, sort.as_deref()).await
            }
            CustomerCommands::Add => customer_flows::add_customer(client).await,
            CustomerCommands::Edit => customer_flows::edit_customer(client).await,
            CustomerCommands::Delete => customer_flows::delete_customer(client, &prompt).await,
            CustomerCommands::Export { search } => {
                customer_flows::export_customers(client, &exporter, search).await
            }
        },
        Commands::Trainings { command } => match command {
            TrainingCommands::List { search, sort } => {
                training_flows::list_trainings(client, search, sort.as_deref()).await
            }
            TrainingCommands::Add => training_flows::add_training(client).await,
            TrainingCommands::Delete => training_flows::delete_training(client, &prompt).await,
            TrainingCommands::Export { search } => {
                training_flows::export_trainings(client, &exporter, search).await
            }
        },
        Commands::Calendar => calendar_screen::run_calendar(client).await,
    };
    if let Err(e) = outcome {
        println!("{e}");
    }
}
