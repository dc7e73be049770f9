//! Command types for platform control and inter-task communication.
//!
//! Defines the high-level motion commands (walk, stand, fold, test) with their
//! textual form, and the frame message the motion task hands to the renderer.
//!
//! Used by the binary, the motion task and the render task.
use core::fmt::{self, Display};

use crate::robot::leg::LEG_COUNT;
use crate::robot::platform::LegFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    /// Walk with the tripod gait for the given number of cycles.
    Walk(u8),
    /// Walk with the wave gait for the given number of cycles.
    Wave(u8),
    Stand,
    Fold,
    /// A single gait tick of every leg.
    Test,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCommandError;

impl Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised command")
    }
}

impl core::error::Error for ParseCommandError {}

impl TryFrom<&str> for MotionCommand {
    type Error = ParseCommandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut tokens = value.split_whitespace();

        let cmd = tokens.next().ok_or(ParseCommandError)?;
        let cycles = match tokens.next() {
            Some(s) => s.parse::<u8>().map_err(|_| ParseCommandError)?,
            None => 1,
        };
        if tokens.next().is_some() {
            return Err(ParseCommandError);
        }

        match cmd {
            "w" => Ok(MotionCommand::Walk(cycles)),
            "wv" => Ok(MotionCommand::Wave(cycles)),
            "s" => Ok(MotionCommand::Stand),
            "f" => Ok(MotionCommand::Fold),
            "t" => Ok(MotionCommand::Test),
            _ => Err(ParseCommandError),
        }
    }
}

/// All six legs at one tick, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCommand {
    pub tick: usize,
    pub frames: [LegFrame; LEG_COUNT],
    /// Set on the final frame of a motion command.
    pub last: bool,
}

impl FrameCommand {
    pub fn new(tick: usize, frames: [LegFrame; LEG_COUNT], last: bool) -> Self {
        Self {
            tick,
            frames,
            last,
        }
    }
}
