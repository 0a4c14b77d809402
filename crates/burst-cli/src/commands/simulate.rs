//! Simulate command: fires bursts through a headless game loop

use anyhow::{bail, Context, Result};
use burst_core::{Color, Transform, Vec3};
use burst_particles::{spawn_count, ParticleConfig, ParticleStats, ParticleSystem};
use burst_runtime::{FrameClock, GameEvent, GameLoop, RuntimeSystem};
use serde::Serialize;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub position: [f32; 3],
    pub density: f32,
    pub color: Color,
    pub scale: f32,
    pub bursts: u32,
    pub interval: f32,
    pub fps: u32,
    pub duration: Option<f32>,
    pub seed: Option<u64>,
    pub holder_offset: [f32; 3],
    pub format: String,
}

/// Pool state right after the frame a burst was spawned in
#[derive(Debug, Serialize)]
pub struct BurstRecord {
    pub index: u32,
    pub time: f64,
    pub requested: usize,
    pub stats: ParticleStats,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub seconds: f64,
    pub bursts: Vec<BurstRecord>,
    pub final_stats: ParticleStats,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        bail!("Unknown format: {}", args.format);
    }

    let config = match &args.config {
        Some(path) => ParticleConfig::load(path)
            .with_context(|| format!("Failed to load particle config {}", path))?,
        None => ParticleConfig::default(),
    };

    let report = simulate(&args, config)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

/// Run the loop to completion and collect per-burst statistics
pub fn simulate(args: &SimulateArgs, config: ParticleConfig) -> Result<SimulationReport> {
    if args.fps == 0 {
        bail!("--fps must be greater than zero");
    }
    if !args.interval.is_finite() || args.interval < 0.0 {
        bail!("--interval must be a non-negative number");
    }

    let dt = 1.0 / args.fps as f64;
    if dt > FrameClock::MAX_FRAME_TIME {
        bail!(
            "--fps must be at least {} (frames are capped at {}s)",
            (1.0 / FrameClock::MAX_FRAME_TIME).ceil(),
            FrameClock::MAX_FRAME_TIME
        );
    }
    let last_burst = args.bursts.saturating_sub(1) as f64 * args.interval as f64;
    let seconds = match args.duration {
        Some(d) if d.is_finite() && d >= 0.0 => d as f64,
        Some(d) => bail!("--duration must be a non-negative number, got {}", d),
        None => last_burst + config.max_lifetime() as f64 + 2.0 * dt,
    };
    let frames = (seconds * args.fps as f64).ceil() as u64;

    let mut game = GameLoop::new();
    let stage = game.scene.spawn("stage");
    game.scene
        .set_transform(stage, Transform::from_position(Vec3::from_array(args.holder_offset)))?;

    let mut system = match args.seed {
        Some(seed) => ParticleSystem::with_seed(config, seed),
        None => ParticleSystem::new(config),
    }
    .under(stage);

    game.initialize(&mut [&mut system])?;
    log::info!(
        "simulating {} burst(s) over {} frames at {} fps",
        args.bursts,
        frames,
        args.fps
    );

    let mut records = Vec::new();
    let mut next_burst = 0u32;
    for _ in 0..frames {
        let now = game.clock.total_time;
        let mut fired = Vec::new();
        while next_burst < args.bursts && next_burst as f64 * args.interval as f64 <= now + 1e-9 {
            game.push_event(GameEvent::Burst {
                position: Vec3::from_array(args.position),
                density: args.density,
                color: args.color,
                scale: args.scale,
            });
            fired.push(next_burst);
            next_burst += 1;
        }

        game.frame(&mut [&mut system], dt)?;

        for index in fired {
            records.push(BurstRecord {
                index,
                time: now,
                requested: spawn_count(args.density),
                stats: system.stats(),
            });
        }
    }

    if next_burst < args.bursts {
        log::warn!(
            "{} burst(s) fell after the end of the run",
            args.bursts - next_burst
        );
    }

    let final_stats = system.stats();
    let seconds = game.clock.total_time;
    game.shutdown(&mut [&mut system])?;
    log::debug!("system '{}' shut down", system.name());

    Ok(SimulationReport {
        frames,
        seconds,
        bursts: records,
        final_stats,
    })
}

fn print_text(report: &SimulationReport) {
    println!("Simulated {} frames ({:.3}s)", report.frames, report.seconds);
    for burst in &report.bursts {
        println!(
            "  burst {:>3} @ {:>7.3}s: requested {:>3}, active {:>3}, idle {:>3}, constructed {:>3}",
            burst.index,
            burst.time,
            burst.requested,
            burst.stats.active,
            burst.stats.idle,
            burst.stats.constructed
        );
    }
    let stats = &report.final_stats;
    println!();
    println!("Active:      {}", stats.active);
    println!("Idle:        {}", stats.idle);
    println!("Constructed: {}", stats.constructed);
    println!("Tweens:      {}", stats.tweens);
}
