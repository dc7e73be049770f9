//! Joint enumeration and display helpers.
//!
//! Defines the [`Joint`] enum for identifying each joint of a leg (coxa, femur,
//! tibia) and indexing into a [`JointAngles`] triple by joint.
use core::fmt::Display;
use core::ops::{Index, IndexMut};

use crate::kinematics::conversion::JointAngles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Coxa = 0,
    Femur = 1,
    Tibia = 2,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Coxa, Joint::Femur, Joint::Tibia];
}

impl Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Joint::Coxa => f.write_str("coxa"),
            Joint::Femur => f.write_str("femur"),
            Joint::Tibia => f.write_str("tibia"),
        }
    }
}

impl Index<Joint> for JointAngles {
    type Output = f64;

    fn index(&self, joint: Joint) -> &Self::Output {
        match joint {
            Joint::Coxa => &self.coxa,
            Joint::Femur => &self.femur,
            Joint::Tibia => &self.tibia,
        }
    }
}

impl IndexMut<Joint> for JointAngles {
    fn index_mut(&mut self, joint: Joint) -> &mut Self::Output {
        match joint {
            Joint::Coxa => &mut self.coxa,
            Joint::Femur => &mut self.femur,
            Joint::Tibia => &mut self.tibia,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_angles_by_joint() {
        let mut angles = JointAngles::new(0.1, 0.2, 0.3);
        assert_eq!(angles[Joint::Femur], 0.2);
        angles[Joint::Tibia] = -1.0;
        assert_eq!(angles.tibia, -1.0);
        assert_eq!(Joint::ALL.map(|j| j as usize), [0, 1, 2]);
    }
}
