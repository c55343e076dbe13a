use futures::future::join_all;

use crate::models::training::Training;
use crate::service::link_resolver::{CustomerLookup, resolve_customer_name};

/// A training plus the resolved name of its owning customer. Transient,
/// display-only, recomputed on every fetch.
#[derive(Debug, Clone)]
pub struct EnrichedTraining {
    pub training: Training,
    pub customer_name: String,
}

/// Resolve customer names for a batch of trainings.
///
/// All lookups are issued concurrently and the call settles only once
/// every row has a name or the fallback. Each row writes its own output
/// slot, so the result has exactly the input's length and order no
/// matter in which order the lookups complete, and one row's failure
/// never touches another row.
pub async fn enrich_trainings(
    lookup: &dyn CustomerLookup,
    trainings: Vec<Training>,
    fallback: &str,
) -> Vec<EnrichedTraining> {
    let resolutions = trainings
        .iter()
        .map(|training| resolve_customer_name(lookup, training.customer_url(), fallback));
    let names = join_all(resolutions).await;
    trainings
        .into_iter()
        .zip(names)
        .map(|(training, customer_name)| EnrichedTraining {
            training,
            customer_name,
        })
        .collect()
}
