use std::fmt;

use serde::{Deserialize, Serialize};

/// Inheritance pattern a gene's variant set can be compatible with.
/// `Any` is the undefined mode: it matches everything and constrains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeOfInheritance {
    AutosomalDominant,
    AutosomalRecessive,
    XDominant,
    XRecessive,
    Mitochondrial,
    Any,
}

impl ModeOfInheritance {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ModeOfInheritance::AutosomalDominant  => "AD",
            ModeOfInheritance::AutosomalRecessive => "AR",
            ModeOfInheritance::XDominant          => "XD",
            ModeOfInheritance::XRecessive         => "XR",
            ModeOfInheritance::Mitochondrial      => "MT",
            ModeOfInheritance::Any                => "ANY",
        }
    }

    pub fn is_recessive(&self) -> bool {
        matches!(self, ModeOfInheritance::AutosomalRecessive | ModeOfInheritance::XRecessive)
    }

    pub fn is_defined(&self) -> bool {
        *self != ModeOfInheritance::Any
    }

    /// Number of top-scoring variants which can explain a gene under this mode.
    pub fn max_contributing_variants(&self) -> usize {
        if self.is_recessive() { 2 } else { 1 }
    }
}

impl fmt::Display for ModeOfInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
