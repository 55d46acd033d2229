use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two derived versions being merged into the base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    #[display(fmt = "left")]
    Left,

    #[display(fmt = "right")]
    Right,
}

impl Side {
    /// Both sides, left first
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The opposite side
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The document this side's changes live in
    pub fn version(self) -> Version {
        match self {
            Side::Left => Version::Left,
            Side::Right => Version::Right,
        }
    }
}

/// One of the three texts taking part in a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Version {
    #[display(fmt = "left")]
    Left,

    #[display(fmt = "base")]
    Base,

    #[display(fmt = "right")]
    Right,
}

impl Version {
    /// All three versions in display order
    pub const ALL: [Version; 3] = [Version::Left, Version::Base, Version::Right];

    /// The derived side, or `None` for the base
    pub fn side(self) -> Option<Side> {
        match self {
            Version::Left => Some(Side::Left),
            Version::Base => None,
            Version::Right => Some(Side::Right),
        }
    }
}

impl From<Side> for Version {
    fn from(side: Side) -> Self {
        side.version()
    }
}
