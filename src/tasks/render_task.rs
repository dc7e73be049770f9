//! Stand-in for the renderer: logs the frames the motion task produces,
//! together with the servo ticks each leg would be driven with.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Receiver};
use log::{debug, info, warn};

use super::motion_task::MOTION_COMPLETED;
use crate::robot::commands::FrameCommand;
use crate::robot::leg::LEG_COUNT;
use crate::robot::servo::ServoMap;
use crate::FRAME_CHANNEL_SIZE;

#[embassy_executor::task]
pub async fn render_task(
    receiver: Receiver<'static, CriticalSectionRawMutex, FrameCommand, FRAME_CHANNEL_SIZE>,
    servos: [ServoMap; LEG_COUNT],
) {
    let mut rendered = 0;

    loop {
        let cmd = receiver.receive().await;
        draw(&cmd, &servos);
        rendered += 1;

        if cmd.last {
            info!("[RENDER_TASK] {} frames, last tick {}", rendered, cmd.tick);
            MOTION_COMPLETED.signal(Ok(rendered));
            rendered = 0;
        }
    }
}

fn draw(cmd: &FrameCommand, servos: &[ServoMap; LEG_COUNT]) {
    for frame in cmd.frames.iter() {
        let foot = frame.foot();
        match servos[frame.leg.index()].signals(frame.angles) {
            Ok([coxa, femur, tibia]) => debug!(
                "[RENDER_TASK] tick {} {}: foot ({:.1}, {:.1}, {:.1}) servos [{}, {}, {}]",
                cmd.tick, frame.leg, foot.x, foot.y, foot.z, coxa, femur, tibia
            ),
            Err(e) => warn!("[RENDER_TASK] tick {} {}: {}", cmd.tick, frame.leg, e),
        }
    }
}
