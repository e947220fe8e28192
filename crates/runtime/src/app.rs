//! # Runtime Loop
//!
//! Drives a [`Sector`] tick by tick. Headless runs go flat out; with
//! `--realtime` the loop is paced by a [`TickClock`] at the configured tick
//! rate. A faulted tick is logged, the offending body is removed and the
//! world carries on, which is how a live server treats a single bad body.

use anyhow::Result;
use starlane_physics::{Body, BodyId, DamageOutcome, PhysicsError, RenderSink, TickClock, Vec3};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::scenario::Sector;

/// Ticks between volleys from the demo ships.
const VOLLEY_EVERY: u64 = 25;
/// Ticks between progress lines at `info`.
const REPORT_EVERY: u64 = 100;

/// What a run did, for the final log line and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub collisions: usize,
    pub faults: usize,
    pub created: usize,
    pub destroyed: usize,
    pub bodies: usize,
}

/// Stands in for a renderer: keeps counts and traces every scene change.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub created: usize,
    pub destroyed: usize,
    pub moved: usize,
}

impl RenderSink for TracingSink {
    fn on_create(&mut self, body: &Body) {
        self.created += 1;
        tracing::trace!(id = %body.id, kind = body.kind.name(), "spawn visual");
    }

    fn on_destroy(&mut self, id: BodyId) {
        self.destroyed += 1;
        tracing::trace!(%id, "drop visual");
    }

    fn on_move(&mut self, _id: BodyId, _location: Vec3) {
        self.moved += 1;
    }

    fn on_damage(&mut self, target: BodyId, source: BodyId, hits: f32, outcome: DamageOutcome) {
        if outcome != DamageOutcome::Unharmed {
            tracing::debug!(%target, %source, hits, ?outcome, "impact");
        }
    }
}

/// Install the global `fmt` subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second install (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Entry point used by the `starlane` binary.
///
/// # Errors
///
/// Returns config and scenario errors, or a fault the loop could not
/// recover from.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    init_tracing(&cli.log_level);
    let config = cli.world_config()?;
    tracing::info!(
        half_width = config.half_width,
        tick_rate = config.tick_rate,
        seed = config.seed,
        "starting sector"
    );
    let mut sector = Sector::demo(config)?;
    let summary = run_sector(&mut sector, cli.ticks, cli.realtime)?;
    tracing::info!(?summary, "run finished");
    Ok(summary)
}

/// Run `ticks` ticks of `sector`.
///
/// # Errors
///
/// Fails if the tick rate gives no usable interval, if a fault names no
/// body to remove, or if launching a volley fails.
pub fn run_sector(sector: &mut Sector, ticks: u64, realtime: bool) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut sink = TracingSink::default();
    let mut clock = TickClock::new(sector.world.config().tick_rate)?;
    let mut last = Instant::now();

    while summary.ticks < ticks {
        if realtime {
            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;
            if !due {
                std::thread::sleep(clock.remaining().min(Duration::from_millis(50)));
                continue;
            }
        }

        match sector.world.tick() {
            Ok(report) => {
                summary.ticks += 1;
                summary.collisions += report.collisions.len();
                if report.tick % REPORT_EVERY == 0 {
                    tracing::info!(
                        tick = report.tick,
                        bodies = sector.world.len(),
                        moved = report.moved,
                        collisions = summary.collisions,
                        "progress"
                    );
                }
                if report.tick % VOLLEY_EVERY == 0 {
                    let shots = sector.volley()?;
                    tracing::debug!(shots = shots.len(), "volley");
                }
            }
            Err(err) => {
                summary.faults += 1;
                recover(sector, &err)?;
            }
        }
        sector.world.flush_events(&mut sink);
    }

    if clock.skipped() > 0 {
        tracing::warn!(skipped = clock.skipped(), "fell behind real time");
    }
    summary.created = sink.created;
    summary.destroyed = sink.destroyed;
    summary.bodies = sector.world.len();
    Ok(summary)
}

fn recover(sector: &mut Sector, err: &PhysicsError) -> Result<()> {
    let Some(id) = err.body() else {
        anyhow::bail!("unrecoverable physics fault: {err}");
    };
    tracing::warn!(%id, "removing body after fault: {err}");
    sector.world.acknowledge_fault();
    sector.world.destruct(id);
    Ok(())
}
