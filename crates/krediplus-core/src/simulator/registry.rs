use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::{ConfigPatch, SimulatorConfig};
use crate::{KrediError, KrediResult};

/// Every simulator configuration an administrator has saved, at most one of
/// them active. Serialisable as a whole so it can be snapshotted to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRegistry {
    #[serde(default)]
    configs: Vec<SimulatorConfig>,
    #[serde(default)]
    next_id: u64,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        ConfigRegistry::default()
    }

    /// A registry holding one active configuration with the stock policy.
    pub fn with_default() -> Self {
        let mut config = SimulatorConfig::default();
        config.id = Some(1);
        config.is_active = true;
        ConfigRegistry {
            configs: vec![config],
            next_id: 1,
        }
    }

    /// Validate and store a new configuration, assigning it the next id.
    /// An active configuration deactivates every other one.
    pub fn create(&mut self, mut config: SimulatorConfig) -> KrediResult<SimulatorConfig> {
        config.validate()?;

        let id = self.allocate_id();
        config.id = Some(id);
        config.created_at = Utc::now();

        if config.is_active {
            self.deactivate_all();
        }
        log::debug!("created simulator config {id} (active: {})", config.is_active);

        self.configs.push(config.clone());
        Ok(config)
    }

    /// All configurations, ordered by id.
    pub fn list(&self) -> &[SimulatorConfig] {
        &self.configs
    }

    pub fn get(&self, id: u64) -> Option<&SimulatorConfig> {
        self.configs.iter().find(|c| c.id == Some(id))
    }

    pub fn modify(&mut self, id: u64, patch: &ConfigPatch) -> KrediResult<SimulatorConfig> {
        let slot = self.slot_mut(id)?;
        let updated = slot.apply_patch(patch)?;
        *slot = updated.clone();
        log::debug!("modified simulator config {id}");
        Ok(updated)
    }

    /// Make `id` the only active configuration.
    pub fn activate(&mut self, id: u64) -> KrediResult<SimulatorConfig> {
        self.slot_mut(id)?;
        self.deactivate_all();
        let slot = self.slot_mut(id)?;
        slot.is_active = true;
        log::debug!("activated simulator config {id}");
        Ok(slot.clone())
    }

    /// Remove an inactive configuration.
    pub fn delete(&mut self, id: u64) -> KrediResult<SimulatorConfig> {
        let pos = self
            .configs
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(KrediError::ConfigNotFound(id))?;
        if self.configs[pos].is_active {
            return Err(KrediError::ActiveConfigDeletion(id));
        }
        log::debug!("deleted simulator config {id}");
        Ok(self.configs.remove(pos))
    }

    /// The configuration quotes are currently checked against.
    pub fn active(&self) -> KrediResult<&SimulatorConfig> {
        self.configs
            .iter()
            .find(|c| c.is_active)
            .ok_or(KrediError::NoActiveConfig)
    }

    fn allocate_id(&mut self) -> u64 {
        // Snapshots edited by hand may carry ids beyond the counter.
        let highest = self.configs.iter().filter_map(|c| c.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest) + 1;
        self.next_id
    }

    fn deactivate_all(&mut self) {
        for config in &mut self.configs {
            config.is_active = false;
        }
    }

    fn slot_mut(&mut self, id: u64) -> KrediResult<&mut SimulatorConfig> {
        self.configs
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(KrediError::ConfigNotFound(id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
