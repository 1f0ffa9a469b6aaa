use chrono::{DateTime, Utc};
use dashmap::DashMap;
use easel_core::EaselError;
use easel_core::plugin::Plugin;
use std::sync::Arc;
use tracing::debug;

/// In-memory plugin store.
///
/// Readers take cloned snapshots, so a render call always sees a payload
/// and its timestamp from the same commit. Writes go through
/// [`PluginStore::commit_payload`], which replaces both fields under the
/// entry lock — a failed fetch never reaches it, leaving prior cached
/// state untouched.
#[derive(Clone)]
pub struct PluginStore {
    plugins: Arc<DashMap<String, Plugin>>,
}

impl PluginStore {
    pub fn new() -> Self {
        Self {
            plugins: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace a plugin record.
    pub fn insert(&self, plugin: Plugin) {
        debug!(plugin = %plugin.id, "Plugin stored");
        self.plugins.insert(plugin.id.clone(), plugin);
    }

    /// Snapshot of one plugin (cloned; consistent for the caller's use).
    pub fn get(&self, id: &str) -> Option<Plugin> {
        self.plugins.get(id).map(|entry| entry.clone())
    }

    /// Remove a plugin record.
    pub fn remove(&self, id: &str) -> Option<Plugin> {
        self.plugins.remove(id).map(|(_, plugin)| plugin)
    }

    /// Replace a plugin's cached payload and freshness timestamp as one
    /// transition.
    pub fn commit_payload(
        &self,
        id: &str,
        payload: serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), EaselError> {
        let mut entry = self
            .plugins
            .get_mut(id)
            .ok_or_else(|| EaselError::PluginNotFound(id.to_string()))?;

        entry.data_payload = Some(payload);
        entry.data_payload_updated_at = Some(fetched_at);
        debug!(plugin = %id, fetched_at = %fetched_at, "Payload committed");
        Ok(())
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.plugins.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginStore {
    fn default() -> Self {
        Self::new()
    }
}
