use std::env;

use trainerdesk::cli;
use trainerdesk::clients::rest_client::RestClient;
use trainerdesk::config::{AppConfig, DEFAULT_API_BASE};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };
    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let base_url = get_prop("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let client = RestClient::new(base_url);
    cli::cli(&client).await;
}
