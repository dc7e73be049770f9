//! Asynchronous tasks for the walking demo.
//!
//! This module contains Embassy async tasks for the host runtime, including:
//! - [`motion_task`]: Handles motion commands and replays gait schedules tick by tick.
//! - [`render_task`]: Receives the body-frame leg frames and logs them.
//!
//! Tasks are spawned from `main.rs` and communicate via Embassy channels.
pub mod motion_task;
pub mod render_task;
