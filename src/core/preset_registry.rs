use crate::core::preset::Preset;
use crate::core::servo_registry::ServoRegistry;
use crate::domain::model::PresetsDump;
use crate::utils::error::{Result, ServoError};
use std::collections::BTreeMap;

/// Owns every preset by unique name. Members are resolved against the servo registry passed in.
#[derive(Debug, Default)]
pub struct PresetRegistry {
    presets: BTreeMap<String, Preset>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or wholesale replaces `name`. The flag is `true` when the preset did not exist before.
    pub fn insert(&mut self, name: &str, preset: Preset) -> (&Preset, bool) {
        let created = self.presets.insert(name.to_string(), preset).is_none();
        (&self.presets[name], created)
    }

    pub fn get(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| ServoError::preset_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.presets
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ServoError::preset_not_found(name))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn apply(&self, name: &str, servos: &mut ServoRegistry) -> Result<&Preset> {
        let preset = self.get(name)?;
        preset.apply(servos)?;
        Ok(preset)
    }

    pub fn dump(&self) -> PresetsDump {
        self.presets
            .iter()
            .map(|(name, preset)| (name.clone(), preset.serialize()))
            .collect()
    }

    /// Rebuilds presets from persisted data. A member naming an unknown servo aborts the load;
    /// targets outside the current limits are kept and rejected when applied.
    pub fn populate(&mut self, data: PresetsDump, servos: &ServoRegistry) -> Result<usize> {
        let mut loaded = BTreeMap::new();
        for (name, targets) in data {
            let preset = Preset::restore(&name, &targets, servos)?;
            loaded.insert(name, preset);
        }

        let count = loaded.len();
        self.presets.extend(loaded);
        Ok(count)
    }
}
