//! Walking demo on the host.
//!
//! Takes a comma separated command script as arguments, e.g.
//! `hexapod_gait t, s, w 2, wv 1, f`, and plays it through the motion and render
//! tasks. `RUST_LOG=debug` prints every leg of every tick.
use anyhow::anyhow;
use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use hexapod_gait::robot::{
    commands::{FrameCommand, MotionCommand},
    config::PlatformConfig,
};
use hexapod_gait::tasks::{
    motion_task::{motion_task, MOTION_COMPLETED},
    render_task::render_task,
};
use hexapod_gait::{FRAME_CHANNEL_SIZE, MOTIONCMD_CHANNEL_SIZE};
use log::{error, info};

const DEFAULT_SCRIPT: &str = "s, w 1";

static MOTION_CHANNEL: Channel<CriticalSectionRawMutex, MotionCommand, MOTIONCMD_CHANNEL_SIZE> =
    Channel::new();
static FRAME_CHANNEL: Channel<CriticalSectionRawMutex, FrameCommand, FRAME_CHANNEL_SIZE> =
    Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(spawner).await {
        error!("{e}");
        std::process::exit(1);
    }
    std::process::exit(0);
}

async fn run(spawner: Spawner) -> anyhow::Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let script = if args.trim().is_empty() {
        DEFAULT_SCRIPT
    } else {
        args.as_str()
    };
    let commands = script
        .split(',')
        .map(|s| MotionCommand::try_from(s.trim()).map_err(|e| anyhow!("{e}: {s:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let config = PlatformConfig::default();
    let platform = config.build()?;

    info!("Starting hexapod...");
    spawner
        .spawn(motion_task(
            platform,
            config,
            MOTION_CHANNEL.receiver(),
            FRAME_CHANNEL.sender(),
        ))
        .map_err(|e| anyhow!("fail spawning motion task: {e:?}"))?;
    spawner
        .spawn(render_task(FRAME_CHANNEL.receiver(), config.servos))
        .map_err(|e| anyhow!("fail spawning render task: {e:?}"))?;

    for cmd in commands {
        MOTION_CHANNEL.send(cmd).await;
        let frames = MOTION_COMPLETED.wait().await?;
        info!("{cmd:?} completed after {frames} frames");
    }
    Ok(())
}
