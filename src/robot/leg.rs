//! Leg enumeration and indexing helpers.
//!
//! The six legs are numbered counter-clockwise seen from above, starting with
//! the front right leg whose mount sits at 30° from the body's x axis.
use core::fmt::Display;

pub const LEG_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leg {
    FrontRight = 0,
    Front = 1,
    FrontLeft = 2,
    BackLeft = 3,
    Back = 4,
    BackRight = 5,
}

impl Leg {
    pub const ALL: [Leg; LEG_COUNT] = [
        Leg::FrontRight,
        Leg::Front,
        Leg::FrontLeft,
        Leg::BackLeft,
        Leg::Back,
        Leg::BackRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::FrontRight => f.write_str("Front right"),
            Leg::Front => f.write_str("Front"),
            Leg::FrontLeft => f.write_str("Front left"),
            Leg::BackLeft => f.write_str("Back left"),
            Leg::Back => f.write_str("Back"),
            Leg::BackRight => f.write_str("Back right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLegIndex(pub usize);

impl Display for InvalidLegIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "no leg with index {}", self.0)
    }
}

impl core::error::Error for InvalidLegIndex {}

impl TryFrom<usize> for Leg {
    type Error = InvalidLegIndex;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Leg::ALL.get(value).copied().ok_or(InvalidLegIndex(value))
    }
}
