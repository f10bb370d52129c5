use anyhow::Result;

use crate::store::json_store::JsonStore;
use crate::store::schema::{GradingEvent, HistoryData, SCHEMA_VERSION};

/// Append-only log of grading events, mirrored to a [`JsonStore`] when one is
/// attached. The only way events leave the log is [`HistoryStore::reset`].
pub struct HistoryStore {
    events: Vec<GradingEvent>,
    backend: Option<JsonStore>,
}

impl HistoryStore {
    /// Opens the log persisted in `backend`. Malformed data yields an empty log.
    pub fn open(backend: JsonStore) -> Self {
        let mut store = Self {
            events: Vec::new(),
            backend: Some(backend),
        };
        store.events = store.load();
        store
    }

    pub fn in_memory() -> Self {
        Self {
            events: Vec::new(),
            backend: None,
        }
    }

    pub fn load(&self) -> Vec<GradingEvent> {
        match self.backend {
            Some(ref backend) => backend.load_history().events,
            None => self.events.clone(),
        }
    }

    pub fn events(&self) -> &[GradingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records the event and writes the whole log. On a write failure the
    /// event is kept in memory and the error is returned.
    pub fn append(&mut self, event: GradingEvent) -> Result<()> {
        self.events.push(event);
        self.persist(&self.events)
    }

    /// Clears the log. Persisted state is cleared first; memory is only
    /// cleared once that write succeeded, so both sides always agree.
    pub fn reset(&mut self) -> Result<()> {
        self.persist(&[])?;
        self.events.clear();
        Ok(())
    }

    fn persist(&self, events: &[GradingEvent]) -> Result<()> {
        let Some(ref backend) = self.backend else {
            return Ok(());
        };
        backend.save_history(&HistoryData {
            schema_version: SCHEMA_VERSION,
            events: events.to_vec(),
        })
    }
}
