use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Preset board sizes and mine counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }

    /// `(size, mines)` for this preset.
    pub const fn params(self) -> (Coord, CellCount) {
        match self {
            Self::Easy => (5, 10),
            Self::Medium => (7, 25),
            Self::Hard => (9, 60),
            Self::Extreme => (11, 100),
        }
    }

    pub const fn game_config(self) -> GameConfig {
        let (size, mines) = self.params();
        GameConfig::new_unchecked(size, mines)
    }

    /// Looks up a preset by name, falling back to [`Difficulty::Medium`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::warn!("Unknown difficulty {name:?}, fallback to medium");
                Self::Medium
            })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
