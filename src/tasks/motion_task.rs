//! High-level motion task.
//!
//! Receives motion commands, builds the gait schedule for the requested
//! pattern and replays it one tick at a time, sending every tick's leg frames
//! to the render task.
//!
//! A path that cannot be solved aborts the command before any frame is sent.
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Receiver, Sender},
    signal::Signal,
};
use embassy_time::{Duration, Ticker};
use log::{debug, error, info};

use crate::kinematics::conversion::{JointAngles, KinematicsError};
use crate::kinematics::gait_engine::GaitPattern;
use crate::robot::commands::{FrameCommand, MotionCommand};
use crate::robot::config::PlatformConfig;
use crate::robot::platform::Platform;
use crate::{FRAME_CHANNEL_SIZE, MOTIONCMD_CHANNEL_SIZE};

/// Frames rendered for a finished command, or why it was refused.
pub type MotionOutcome = Result<usize, KinematicsError>;

pub static MOTION_COMPLETED: Signal<CriticalSectionRawMutex, MotionOutcome> = Signal::new();

/// Turns motion commands into a stream of frames.
pub struct MotionEngine {
    platform: Platform,
    config: PlatformConfig,
    frame_sender: Sender<'static, CriticalSectionRawMutex, FrameCommand, FRAME_CHANNEL_SIZE>,
}

impl MotionEngine {
    pub fn new(
        platform: Platform,
        config: PlatformConfig,
        frame_sender: Sender<'static, CriticalSectionRawMutex, FrameCommand, FRAME_CHANNEL_SIZE>,
    ) -> Self {
        Self {
            platform,
            config,
            frame_sender,
        }
    }

    /// Runs one command, returns how many frames were sent.
    pub async fn execute(&mut self, cmd: MotionCommand) -> Result<usize, KinematicsError> {
        match cmd {
            MotionCommand::Walk(cycles) => self.walk(cycles, self.config.pattern).await,
            MotionCommand::Wave(cycles) => self.walk(cycles, GaitPattern::WAVE).await,
            MotionCommand::Stand => {
                let frames = self.platform.stand()?;
                self.frame_sender
                    .send(FrameCommand::new(0, frames, true))
                    .await;
                Ok(1)
            }
            MotionCommand::Test => {
                let schedule = self
                    .platform
                    .schedule(&self.config.stride, self.config.pattern)?;
                let frames = self.platform.tick(&schedule, 0);
                self.frame_sender
                    .send(FrameCommand::new(0, frames, true))
                    .await;
                Ok(1)
            }
            MotionCommand::Fold => {
                let frames = self.platform.pose_all(JointAngles::folded());
                self.frame_sender
                    .send(FrameCommand::new(0, frames, true))
                    .await;
                Ok(1)
            }
        }
    }

    async fn walk(&mut self, cycles: u8, pattern: GaitPattern) -> Result<usize, KinematicsError> {
        let schedule = self.platform.schedule(&self.config.stride, pattern)?;
        let total = schedule.cycle_len() * cycles as usize;
        debug!(
            "[MOTION_TASK] {} cycles of {} ticks",
            cycles,
            schedule.cycle_len()
        );

        let mut ticker = Ticker::every(Duration::from_millis(self.config.tick_ms));
        for tick in 0..total {
            let frames = self.platform.tick(&schedule, tick);
            self.frame_sender
                .send(FrameCommand::new(tick, frames, tick + 1 == total))
                .await;
            ticker.next().await;
        }
        Ok(total)
    }
}

#[embassy_executor::task]
pub async fn motion_task(
    platform: Platform,
    config: PlatformConfig,
    cmd_receiver: Receiver<'static, CriticalSectionRawMutex, MotionCommand, MOTIONCMD_CHANNEL_SIZE>,
    frame_sender: Sender<'static, CriticalSectionRawMutex, FrameCommand, FRAME_CHANNEL_SIZE>,
) {
    let mut engine = MotionEngine::new(platform, config, frame_sender);

    loop {
        let cmd = cmd_receiver.receive().await;
        info!("[MOTION_TASK] received {:?}", cmd);

        match engine.execute(cmd).await {
            // nothing reaches the renderer, so nobody else will report back
            Ok(0) => MOTION_COMPLETED.signal(Ok(0)),
            Ok(n) => debug!("[MOTION_TASK] {n} frames sent"),
            Err(e) => {
                error!("[MOTION_TASK] {:?} refused: {}", cmd, e);
                MOTION_COMPLETED.signal(Err(e));
            }
        }
    }
}
