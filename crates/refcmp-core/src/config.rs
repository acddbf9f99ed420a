//! Comparison settings loaded from TOML.
//!
//! ```toml
//! [leniency]
//! modes = ["lenient_order", "ignore_defaults"]
//!
//! [dataset]
//! case_sensitive = false
//! missing_columns_differ = false
//! modes = ["lenient_numbers", "lenient_dates"]
//! ```
//!
//! Every section and key is optional; missing ones take their defaults
//! (strict values, dataset defaults of [`DataSetSettings`]).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compare::{Leniency, LeniencyMode, ReflectionComparator};
use crate::dataset::{DataSetComparator, DataSetSettings};
use crate::errors::{CompareError, ExError};

/// `[leniency]` section: value comparisons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeniencySection {
    pub modes: Leniency,
}

/// `[dataset]` section: row matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetSection {
    pub case_sensitive: bool,
    pub missing_columns_differ: bool,
    pub modes: Leniency,
}

impl Default for DatasetSection {
    fn default() -> Self {
        let defaults = DataSetSettings::default();
        Self {
            case_sensitive: defaults.case_sensitive,
            missing_columns_differ: defaults.missing_columns_differ,
            modes: defaults.leniency,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonSettings {
    pub leniency: LeniencySection,
    pub dataset: DatasetSection,
}

impl ComparisonSettings {
    /// Parse and validate settings.
    ///
    /// # Errors
    ///
    /// `InvalidSettings` on malformed TOML, unknown keys or modes, and
    /// inconsistent mode combinations.
    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        let settings: Self = toml::from_str(text)
            .map_err(|e| ExError::from(CompareError::from(e)).with_op("load_settings"))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::from(CompareError::from(e))
                .with_op("load_settings")
                .with_path(path.display().to_string())
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject mode combinations that cannot take effect.
    ///
    /// # Errors
    ///
    /// `InvalidSettings` when `allow_superset` is set without `lenient_order`.
    pub fn validate(&self) -> Result<(), ExError> {
        for (section, modes) in [
            ("leniency", &self.leniency.modes),
            ("dataset", &self.dataset.modes),
        ] {
            if modes.allow_superset() && !modes.lenient_order() {
                return Err(ExError::from(CompareError::InvalidSettings {
                    message: format!(
                        "[{}] allow_superset requires lenient_order",
                        section
                    ),
                })
                .with_op("load_settings"));
            }
        }
        Ok(())
    }

    pub fn comparator(&self) -> ReflectionComparator {
        ReflectionComparator::new(self.leniency.modes.clone())
    }

    pub fn data_set_settings(&self) -> DataSetSettings {
        DataSetSettings {
            case_sensitive: self.dataset.case_sensitive,
            leniency: self.dataset.modes.clone(),
            missing_columns_differ: self.dataset.missing_columns_differ,
        }
    }

    pub fn data_set_comparator(&self) -> DataSetComparator {
        DataSetComparator::new(self.data_set_settings())
    }
}

impl From<Leniency> for ComparisonSettings {
    fn from(leniency: Leniency) -> Self {
        Self {
            leniency: LeniencySection { modes: leniency },
            ..Self::default()
        }
    }
}

impl LeniencySection {
    pub fn contains(&self, mode: LeniencyMode) -> bool {
        self.modes.contains(mode)
    }
}
