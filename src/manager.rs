use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::metrics::ManagerMetrics;
use crate::pipeline::{Pipeline, PipelineOutcome};
use crate::stream::{BatchSummary, Stream};
use crate::types::StreamItem;

/// Anything the manager can route data to
#[derive(Debug, Clone)]
pub enum Component {
    Stream(Stream),
    Pipeline(Pipeline),
}

impl Component {
    pub fn id(&self) -> &str {
        match self {
            Component::Stream(stream) => stream.id(),
            Component::Pipeline(pipeline) => pipeline.id(),
        }
    }
}

impl From<Stream> for Component {
    fn from(stream: Stream) -> Self {
        Component::Stream(stream)
    }
}

impl From<Pipeline> for Component {
    fn from(pipeline: Pipeline) -> Self {
        Component::Pipeline(pipeline)
    }
}

/// What a dispatched component produced
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    Summary(BatchSummary),
    Pipeline(PipelineOutcome),
}

impl std::fmt::Display for DispatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchResult::Summary(summary) => write!(f, "{}", summary),
            DispatchResult::Pipeline(outcome) => write!(f, "{}", outcome),
        }
    }
}

/// Registry of named streams and pipelines
#[derive(Debug, Default)]
pub struct NexusManager {
    components: HashMap<String, Component>,
}

impl NexusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under its id, replacing any previous holder of that id
    pub fn register(&mut self, component: impl Into<Component>) {
        let component = component.into();
        let id = component.id().to_string();
        if self.components.insert(id.clone(), component).is_some() {
            debug!(id = %id, "replaced registered component");
        }
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// List all registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.components.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Forward `data` to the component registered under `id`.
    ///
    /// Streams treat a `List` as the batch and anything else as a batch of
    /// one; pipelines run the item as-is. Unknown ids return `None`.
    pub fn dispatch(&self, id: &str, data: StreamItem) -> Option<DispatchResult> {
        let Some(component) = self.components.get(id) else {
            debug!(id = %id, "no component registered, skipping");
            ManagerMetrics::record_lookup_miss();
            return None;
        };

        let result = match component {
            Component::Stream(stream) => {
                ManagerMetrics::record_dispatch("stream");
                let summary = match data {
                    StreamItem::List(items) => stream.process_batch(&items),
                    single => stream.process_batch(std::slice::from_ref(&single)),
                };
                DispatchResult::Summary(summary)
            }
            Component::Pipeline(pipeline) => {
                ManagerMetrics::record_dispatch("pipeline");
                DispatchResult::Pipeline(pipeline.run(data))
            }
        };
        Some(result)
    }

    /// Run each batch through the stream registered under its key. Keys with
    /// no registered stream are skipped.
    pub fn process_streams(
        &self,
        batches: &HashMap<String, Vec<StreamItem>>,
    ) -> BTreeMap<String, BatchSummary> {
        batches
            .iter()
            .filter_map(|(id, items)| match self.components.get(id) {
                Some(Component::Stream(stream)) => {
                    ManagerMetrics::record_dispatch("stream");
                    Some((id.clone(), stream.process_batch(items)))
                }
                _ => {
                    debug!(id = %id, "no stream registered, skipping batch");
                    ManagerMetrics::record_lookup_miss();
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineFormat;
    use crate::types::batch;

    fn manager() -> NexusManager {
        let mut manager = NexusManager::new();
        manager.register(Stream::sensor("SENSOR_001"));
        manager.register(Stream::transaction("TRANS_001"));
        manager.register(Stream::event("EVENT_001"));
        manager.register(Pipeline::standard("PIPE_STREAM", PipelineFormat::Stream));
        manager
    }

    #[test]
    fn test_register_keys_by_id() {
        let manager = manager();
        assert_eq!(manager.len(), 4);
        assert_eq!(
            manager.ids(),
            vec!["EVENT_001", "PIPE_STREAM", "SENSOR_001", "TRANS_001"]
        );
    }

    #[test]
    fn test_reregistering_replaces() {
        let mut manager = manager();
        manager.register(Stream::event("SENSOR_001"));
        assert_eq!(manager.len(), 4);
        assert!(matches!(
            manager.get("SENSOR_001"),
            Some(Component::Stream(s)) if s.stats().stream_type == "System Events"
        ));
    }

    #[test]
    fn test_dispatch_unknown_id_is_silent() {
        let manager = manager();
        assert_eq!(manager.dispatch("NOPE", StreamItem::from("login")), None);
    }

    #[test]
    fn test_dispatch_to_stream_and_pipeline() {
        let manager = manager();
        let result = manager.dispatch("TRANS_001", StreamItem::from(vec![100, -150, 75]));
        assert_eq!(
            result.unwrap().to_string(),
            "Transaction data: 3 operations, net flow: +25 units"
        );

        let result = manager.dispatch("EVENT_001", StreamItem::from("error"));
        assert_eq!(
            result,
            Some(DispatchResult::Summary(BatchSummary::Event { events: 1, errors: 1 }))
        );

        let result = manager.dispatch("PIPE_STREAM", StreamItem::from("FAIL_TEST"));
        assert!(matches!(
            result,
            Some(DispatchResult::Pipeline(outcome)) if outcome.is_recovered()
        ));
    }

    #[test]
    fn test_process_streams_skips_unregistered() {
        let manager = manager();
        let mut batches = HashMap::new();
        batches.insert("SENSOR_001".to_string(), batch(vec![20.0, 24.2]));
        batches.insert("EVENT_001".to_string(), batch(vec!["login", "process", "logout"]));
        batches.insert("PIPE_STREAM".to_string(), batch(vec!["not a stream"]));
        batches.insert("GHOST".to_string(), batch(vec![1]));

        let results = manager.process_streams(&batches);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results["EVENT_001"].to_string(),
            "Event data: 3 events, 0 error detected"
        );
        assert_eq!(
            results["SENSOR_001"].to_string(),
            "Sensor data: 2 readings processed, avg temp: 22.1°C"
        );
    }
}
