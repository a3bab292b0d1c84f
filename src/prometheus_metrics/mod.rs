use std::collections::HashMap;

use prometheus::Registry;

pub const NAMESPACE: &str = "konnektor";

pub const LABEL_WORKER_ID: &str = "worker_id";
pub const LABEL_OUTCOME: &str = "outcome";

/// Create the [`Registry`] that all the metrics of a Worker are registered with.
///
/// Every metric is prefixed by [`NAMESPACE`] and, if a `worker_id` is given,
/// labelled with it via [`LABEL_WORKER_ID`].
pub fn init(worker_id: Option<String>) -> Registry {
    let prom_def_labels = worker_id.map(|wid| HashMap::from([(LABEL_WORKER_ID.to_string(), wid)]));

    info!("Prometheus Metrics default labels:\n{:#?}", prom_def_labels);

    Registry::new_custom(Some(NAMESPACE.to_string()), prom_def_labels)
        .expect("Unable to create a Prometheus Metrics Registry")
}
