//! Configuration record handed to the refresh loop before it starts.

use crate::{ConfigRejected, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which field kinds are shown. Kinds never set default to hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVisibility(BTreeMap<FieldKind, bool>);

impl FieldVisibility {
    /// Every built-in field visible.
    pub fn all() -> Self {
        Self(FieldKind::ALL.iter().map(|k| (*k, true)).collect())
    }

    /// No field visible.
    pub fn none() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, kind: FieldKind, visible: bool) {
        self.0.insert(kind, visible);
    }

    pub fn with(mut self, kind: FieldKind, visible: bool) -> Self {
        self.set(kind, visible);
        self
    }

    pub fn is_visible(&self, kind: FieldKind) -> bool {
        self.0.get(&kind).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.0.values().any(|v| *v)
    }
}

/// Immutable options for one run of the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub fields: FieldVisibility,
    /// Show a solid panel filled with the sampled color.
    pub show_swatch: bool,
    /// Follow the cursor with an undecorated window.
    pub dynamic_placement: bool,
    /// Prefix copied values with their static labels.
    pub include_labels_on_copy: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            fields: FieldVisibility::all(),
            show_swatch: true,
            dynamic_placement: true,
            include_labels_on_copy: true,
        }
    }
}

impl Configuration {
    /// At least one field or the swatch must be shown.
    pub fn validate(&self) -> Result<(), ConfigRejected> {
        if self.fields.any() || self.show_swatch {
            Ok(())
        } else {
            Err(ConfigRejected::NothingToShow)
        }
    }
}

/// Gate the option collector's result: `None` means the user dismissed it.
pub fn accept(options: Option<Configuration>) -> Result<Configuration, ConfigRejected> {
    let config = options.ok_or(ConfigRejected::Cancelled)?;
    config.validate()?;
    Ok(config)
}
