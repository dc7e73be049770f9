//! Library root of the hexapod gait engine.
//!
//! Re-exports all main modules: [`kinematics`], [`robot`] and, with the
//! `runtime` feature, [`tasks`]. Used by the demo binary and by tests.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod kinematics;
pub mod robot;
#[cfg(feature = "runtime")]
pub mod tasks;

pub const MOTIONCMD_CHANNEL_SIZE: usize = 4;
pub const FRAME_CHANNEL_SIZE: usize = 4;
