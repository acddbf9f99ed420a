//! Leniency modes that widen the definition of equality.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An independently togglable equality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeniencyMode {
    /// Left values holding their type's default are "don't care"
    IgnoreDefaults,
    /// Date/time values compare by instant, whatever their representation
    LenientDates,
    /// Sequences compare as multisets
    LenientOrder,
    /// Numbers of different width/precision compare by magnitude
    LenientNumbers,
    /// With lenient order, the right sequence may hold extra elements
    AllowSuperset,
}

/// A set of active [`LeniencyMode`]s.
///
/// Serializes as a plain list of mode names:
///
/// ```
/// use refcmp_core::compare::{Leniency, LeniencyMode};
///
/// let leniency: Leniency = serde_json::from_str(r#"["lenient_order"]"#).unwrap();
/// assert!(leniency.contains(LeniencyMode::LenientOrder));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leniency {
    modes: BTreeSet<LeniencyMode>,
}

impl Leniency {
    /// No leniency at all
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient order plus ignored defaults
    pub fn lenient() -> Self {
        Self::strict()
            .with(LeniencyMode::LenientOrder)
            .with(LeniencyMode::IgnoreDefaults)
    }

    pub fn with(mut self, mode: LeniencyMode) -> Self {
        self.modes.insert(mode);
        self
    }

    pub fn without(mut self, mode: LeniencyMode) -> Self {
        self.modes.remove(&mode);
        self
    }

    pub fn contains(&self, mode: LeniencyMode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn modes(&self) -> impl Iterator<Item = LeniencyMode> + '_ {
        self.modes.iter().copied()
    }

    pub fn is_strict(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn ignore_defaults(&self) -> bool {
        self.contains(LeniencyMode::IgnoreDefaults)
    }

    pub fn lenient_dates(&self) -> bool {
        self.contains(LeniencyMode::LenientDates)
    }

    pub fn lenient_order(&self) -> bool {
        self.contains(LeniencyMode::LenientOrder)
    }

    pub fn lenient_numbers(&self) -> bool {
        self.contains(LeniencyMode::LenientNumbers)
    }

    /// Only meaningful together with lenient order.
    pub fn allow_superset(&self) -> bool {
        self.contains(LeniencyMode::AllowSuperset)
    }
}

impl FromIterator<LeniencyMode> for Leniency {
    fn from_iter<I: IntoIterator<Item = LeniencyMode>>(iter: I) -> Self {
        Self {
            modes: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Leniency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_strict() {
            return write!(f, "strict");
        }
        let names: Vec<String> = self
            .modes()
            .map(|m| {
                serde_json::to_value(m)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| format!("{:?}", m))
            })
            .collect();
        write!(f, "{}", names.join("+"))
    }
}
