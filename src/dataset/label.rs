use std::fmt;

use serde::{Deserialize, Serialize};

/// Class of a sample. The discriminant is the numeric label fed to training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real = 0,
    Fake = 1,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Real, Label::Fake];

    #[inline(always)]
    pub fn index(self) -> usize { self as usize }

    pub fn from_index(index: usize) -> Option<Label> {
        Self::ALL.get(index).copied()
    }

    /// Subdirectory of the dataset root holding this class.
    pub fn dir_name(self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
