use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use trainerdesk::models::training::{Training, TrainingLinks};
use trainerdesk::models::{Link, ResourceUrl};
use trainerdesk::service::enrichment::enrich_trainings;
use trainerdesk::service::link_resolver::{CustomerLookup, ResolutionError};
use trainerdesk::service::{calendar, tabular};

struct MappedLookup {
    responses: HashMap<String, Value>,
    delays_ms: HashMap<String, u64>,
    calls: Mutex<Vec<String>>,
}

impl MappedLookup {
    fn new(entries: Vec<(&str, Value)>) -> Self {
        Self {
            responses: entries
                .into_iter()
                .map(|(url, body)| (url.to_string(), body))
                .collect(),
            delays_ms: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, url: &str, ms: u64) -> Self {
        self.delays_ms.insert(url.to_string(), ms);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CustomerLookup for MappedLookup {
    async fn fetch_customer(&self, url: &ResourceUrl) -> Result<Value, ResolutionError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ms) = self.delays_ms.get(url.as_str()) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        match self.responses.get(url.as_str()) {
            Some(body) => Ok(body.clone()),
            None => Err(ResolutionError::Other("no such customer".to_string())),
        }
    }
}

fn training(n: u32, customer_href: Option<&str>) -> Training {
    Training {
        date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        duration: 45,
        activity: format!("Activity {n}"),
        links: TrainingLinks {
            self_link: Some(Link {
                href: ResourceUrl::new(format!("http://x/api/trainings/{n}")),
            }),
            customer: customer_href.map(|href| Link {
                href: ResourceUrl::new(href),
            }),
        },
    }
}

#[tokio::test]
async fn output_keeps_input_order_whatever_the_completion_order() {
    // the first lookup finishes last
    let lookup = MappedLookup::new(vec![
        ("http://x/api/customers/1", json!({"firstname": "Ann", "lastname": "Lee"})),
        ("http://x/api/customers/2", json!({"firstname": "Bob", "lastname": "Ray"})),
        ("http://x/api/customers/3", json!({"firstname": "Cai", "lastname": "Sun"})),
    ])
    .with_delay("http://x/api/customers/1", 40)
    .with_delay("http://x/api/customers/3", 15);

    let trainings = vec![
        training(1, Some("http://x/api/customers/1")),
        training(2, Some("http://x/api/customers/2")),
        training(3, Some("http://x/api/customers/3")),
    ];

    let enriched = enrich_trainings(&lookup, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;

    assert_eq!(enriched.len(), 3);
    let names: Vec<&str> = enriched.iter().map(|e| e.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Ann Lee", "Bob Ray", "Cai Sun"]);
    assert_eq!(enriched[0].training.activity, "Activity 1");
    assert_eq!(lookup.calls().len(), 3);
}

#[tokio::test]
async fn one_failed_resolution_leaves_the_other_rows_intact() {
    let lookup = MappedLookup::new(vec![(
        "http://x/api/customers/1",
        json!({"firstname": "Ann", "lastname": "Lee"}),
    )]);

    let trainings = vec![
        training(1, Some("http://x/api/customers/1")),
        training(2, Some("http://x/api/customers/404")),
        training(3, Some("http://x/api/customers/1")),
    ];

    let enriched = enrich_trainings(&lookup, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;

    let names: Vec<&str> = enriched.iter().map(|e| e.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Ann Lee", "Unknown", "Ann Lee"]);
}

#[tokio::test]
async fn missing_customer_link_uses_the_fallback_without_a_lookup() {
    let lookup = MappedLookup::new(vec![]);
    let trainings = vec![training(1, None)];

    let enriched = enrich_trainings(&lookup, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;

    assert_eq!(enriched[0].customer_name, "Unknown");
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn tabular_and_calendar_contexts_use_their_own_fallback() {
    let lookup = MappedLookup::new(vec![]);

    let for_table = enrich_trainings(
        &lookup,
        vec![training(1, Some("http://x/api/customers/404"))],
        tabular::FALLBACK_CUSTOMER_NAME,
    )
    .await;
    assert_eq!(for_table[0].customer_name, "Unknown");

    let for_calendar = enrich_trainings(
        &lookup,
        vec![training(1, Some("http://x/api/customers/404"))],
        calendar::FALLBACK_CUSTOMER_NAME,
    )
    .await;
    assert_eq!(for_calendar[0].customer_name, "");

    // with the empty fallback the calendar title stays unsuffixed
    let events = calendar::build_events(&for_calendar);
    assert_eq!(events[0].title, "Activity 1");
}

#[tokio::test]
async fn schema_variants_resolve_through_the_candidate_paths() {
    let lookup = MappedLookup::new(vec![
        ("http://x/api/customers/1", json!({"firstName": "Ann", "lastName": "Lee"})),
        (
            "http://x/api/customers/2",
            json!({"customer": {"firstname": "Bob", "lastname": "Ray"}}),
        ),
    ]);

    let trainings = vec![
        training(1, Some("http://x/api/customers/1")),
        training(2, Some("http://x/api/customers/2")),
    ];

    let enriched = enrich_trainings(&lookup, trainings, tabular::FALLBACK_CUSTOMER_NAME).await;

    let names: Vec<&str> = enriched.iter().map(|e| e.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Ann Lee", "Bob Ray"]);
}
