//! Mission playback loop.
//!
//! Starts a mission on the session's selected route and ticks it on a fixed
//! interval until it completes, hits a scripted stop, or shutdown fires.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use riskpath_core::{MissionSession, MissionSnapshot, MissionSummary, TerrainSession, TickOutcome};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, sleep, Instant};

#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub tick_interval: Duration,
    /// Pause after this many ticks
    pub pause_after: Option<usize>,
    pub pause_for: Duration,
    /// Stop after this many ticks
    pub stop_after: Option<usize>,
}

impl LoopSettings {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            pause_after: None,
            pause_for: Duration::ZERO,
            stop_after: None,
        }
    }
}

/// Wall-clock timestamps derived from the tokio clock, so paused test time
/// drives mission elapsed time too.
#[derive(Debug, Clone, Copy)]
struct MissionClock {
    origin: DateTime<Utc>,
    started: Instant,
}

impl MissionClock {
    fn start() -> Self {
        Self {
            origin: Utc::now(),
            started: Instant::now(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.started.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin + elapsed
    }
}

/// Fly the selected route. Shutdown, or the sender being dropped, stops the
/// mission and returns its summary.
pub async fn run_mission_loop(
    session: &TerrainSession,
    mission: &mut MissionSession,
    settings: LoopSettings,
    mut shutdown: broadcast::Receiver<()>,
    mut on_tick: impl FnMut(&MissionSnapshot),
) -> Result<MissionSummary> {
    let clock = MissionClock::start();
    let snapshot = session.start_mission(mission, clock.now())?;
    on_tick(&snapshot);

    let mut ticker = interval(settings.tick_interval);
    // first tick fires immediately
    ticker.tick().await;
    let mut ticks = 0usize;

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!(mission_id = %mission.id(), "Mission loop shutting down");
                return Ok(mission.stop(clock.now())?);
            }
            _ = ticker.tick() => {
                ticks += 1;
                match mission.tick(clock.now()) {
                    TickOutcome::Advanced(snapshot) => on_tick(&snapshot),
                    TickOutcome::Completed(summary) => return Ok(summary),
                    TickOutcome::Idle(phase) => bail!("mission is {phase}, expected running"),
                }

                if settings.stop_after == Some(ticks) {
                    tracing::info!(ticks, "Scripted stop");
                    return Ok(mission.stop(clock.now())?);
                }

                if settings.pause_after == Some(ticks) {
                    mission.pause(clock.now())?;
                    on_tick(&mission.snapshot());
                    tokio::select! {
                        _ = shutdown.recv() => {
                            tracing::info!(mission_id = %mission.id(), "Mission loop shutting down");
                            return Ok(mission.stop(clock.now())?);
                        }
                        _ = sleep(settings.pause_for) => {}
                    }
                    mission.resume(clock.now())?;
                    ticker.reset();
                }
            }
        }
    }
}
