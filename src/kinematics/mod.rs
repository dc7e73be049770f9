//! Kinematics algorithms for a three-segment leg.
//!
//! This module provides the mathematical routines for converting between Cartesian
//! foot positions and joint angles, and for generating and sequencing the gait
//! paths a leg replays while walking.
//!
//! - [`vector`] holds the 3D vector and axis rotations the chain is built from.
//! - [`conversion`] handles forward/inverse kinematics of one leg.
//! - [`gait_engine`] samples closed gait paths and schedules them by phase.
//!
//! Used by the platform coordinator to plan and replay leg movements.
pub mod conversion;
pub mod gait_engine;
pub mod vector;

pub use conversion::{
    AnchorConfig, GeometryError, JointAngles, KinematicsError, LegGeometry, LegKinematics,
    LegPose,
};
pub use gait_engine::{GaitPath, GaitPattern, GaitPhase, GaitSchedule, StrideParams};
pub use vector::Vec3;
