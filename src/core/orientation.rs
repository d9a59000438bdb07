//! Component orientations.

use serde::{Deserialize, Serialize};

/// Which side of a component is showing.
///
/// Cards support `Face` and `Back`; piles and the tabletop only
/// support `Default`. Strategies declare the orientations they accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentOrientation {
    /// The only orientation of components without distinct sides.
    Default,
    /// Face up.
    Face,
    /// Face down.
    Back,
}

impl ComponentOrientation {
    /// The opposite side, if there is one.
    ///
    /// ```
    /// use rust_tabletop::core::ComponentOrientation;
    ///
    /// assert_eq!(ComponentOrientation::Face.inverse(), ComponentOrientation::Back);
    /// assert_eq!(ComponentOrientation::Default.inverse(), ComponentOrientation::Default);
    /// ```
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Face => Self::Back,
            Self::Back => Self::Face,
        }
    }
}

impl std::fmt::Display for ComponentOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Face => "face",
            Self::Back => "back",
        };
        f.write_str(name)
    }
}
