use anyhow::Result;
use cadence_common::KeyEvent;
use cadence_engine::{GameLoop, HeadlessHost, LoopConfig};
use cadence_kernel::ManualClock;
use cadence_render::{RecordingBackend, RenderContext, ShaderProgram};
use cadence_render_gl::shaders::{BG_FRAG, BG_VERT, PR_MATRIX};
use cadence_render_gl::upload_projection;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cadence-cli", about = "Headless tools for the cadence game loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the loop against a manual clock and report what happened
    Simulate {
        /// Seconds elapsed before each iteration, comma separated
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, default_value = "0.02,0.01,0.05")]
        deltas: Vec<f64>,
        /// Fixed update rate in hertz
        #[arg(short, long, default_value = "60")]
        tick_rate: f64,
        /// Press the quit key on this fixed step (1-based)
        #[arg(long)]
        quit_after: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON loop config and print it with defaults filled in
    CheckConfig {
        path: PathBuf,
    },
}

/// Outcome of a simulated run.
#[derive(Debug, Serialize)]
struct SimulationReport {
    step_seconds: f64,
    iterations: u64,
    fixed_steps: u64,
    frames: u64,
    accumulator: f64,
    closed: bool,
    projection_queries: usize,
}

fn simulate(deltas: &[f64], tick_rate: f64, quit_after: Option<u64>) -> Result<SimulationReport> {
    let config = LoopConfig {
        tick_rate_hz: tick_rate,
        ..LoopConfig::default()
    };
    config.validate()?;

    let mut gfx = RenderContext::new(RecordingBackend::new());
    let mut bg = ShaderProgram::from_sources(&mut gfx, "bg", BG_VERT, BG_FRAG)?;
    upload_projection(&mut bg, &mut gfx)?;

    let mut host = HeadlessHost::new();
    if let Some(step) = quit_after.filter(|&n| n > 0) {
        for _ in 1..step {
            host.queue_keys(Vec::<KeyEvent>::new());
        }
        host.queue_keys([KeyEvent::press(config.quit_key)]);
    }

    let scene = move |ctx: &mut RenderContext<RecordingBackend>| {
        bg.enable(ctx);
        bg.disable(ctx);
    };

    let clock = ManualClock::new();
    let mut game = GameLoop::from_config(clock.clone(), host, gfx, scene, &config)?;
    let mut closed = false;
    for &dt in deltas {
        clock.advance(dt);
        if !game.iterate() {
            closed = true;
            break;
        }
    }

    let stats = game.stats();
    Ok(SimulationReport {
        step_seconds: game.timestep().step_seconds(),
        iterations: stats.iterations,
        fixed_steps: stats.fixed_steps,
        frames: stats.frames,
        accumulator: game.timestep().accumulator(),
        closed,
        projection_queries: game.gfx().backend().uniform_queries(PR_MATRIX),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cadence-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("engine: {}", cadence_engine::crate_info());
            println!("render: {}", cadence_render::crate_info());
            let config = LoopConfig::default();
            println!(
                "defaults: {}x{} \"{}\", {} Hz, quit on {}",
                config.width, config.height, config.title, config.tick_rate_hz, config.quit_key
            );
        }
        Commands::Simulate {
            deltas,
            tick_rate,
            quit_after,
            json,
        } => {
            let report = simulate(&deltas, tick_rate, quit_after)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} iterations, {} fixed steps of {:.6}s, {} frames",
                    report.iterations, report.fixed_steps, report.step_seconds, report.frames
                );
                println!("unprocessed time: {:.6}s", report.accumulator);
                if report.closed {
                    println!("loop closed before the last delta");
                }
            }
        }
        Commands::CheckConfig { path } => {
            let config = LoopConfig::from_json_file(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            tracing::info!(path = %path.display(), "config ok");
        }
    }

    Ok(())
}
