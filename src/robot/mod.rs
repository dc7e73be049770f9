//! Core platform types and configuration.
//!
//! This module defines the main types and constants of the hexapod, including:
//! - [`commands`]: Motion commands and the frame messages passed between tasks.
//! - [`config`]: Physical and walking constants of the platform.
//! - [`joint`]: Joint enumeration and angle indexing.
//! - [`leg`]: Leg enumeration.
//! - [`platform`]: The body coordinating the six legs.
//! - [`servo`]: Joint angle to servo signal mapping.
pub mod commands;
pub mod config;
pub mod joint;
pub mod leg;
pub mod platform;
pub mod servo;
