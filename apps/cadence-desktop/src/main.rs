mod host;
mod keymap;

use anyhow::{Context, Result};
use cadence_common::Key;
use cadence_engine::{GameLoop, LoopConfig};
use cadence_kernel::MonotonicClock;
use cadence_render::{RenderContext, ShaderProgram};
use cadence_render_gl::{BgLevel, GlBackend, upload_projection};
use clap::Parser;
use host::GlutinHost;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cadence-desktop", about = "Fixed-step game loop in a desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,

    /// Fixed update rate in hertz
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Key that closes the window (e.g. "escape", "q", "f12")
    #[arg(long)]
    quit_key: Option<Key>,

    /// Directory holding bg.vert and bg.frag
    #[arg(long)]
    shader_dir: Option<PathBuf>,
}

impl Cli {
    fn loop_config(&self) -> Result<LoopConfig> {
        let mut config = match &self.config {
            Some(path) => LoopConfig::from_json_file(path)?,
            None => LoopConfig::default(),
        };
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate_hz = rate;
        }
        if let Some(key) = self.quit_key {
            config.quit_key = key;
        }
        if let Some(dir) = &self.shader_dir {
            config.shader_dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.loop_config()?;
    tracing::info!("cadence-desktop starting");

    let host = GlutinHost::new(&config)?;
    let mut gfx = RenderContext::new(GlBackend::new(host.gl()));
    let (version, renderer) = gfx.backend().driver_info();
    tracing::info!(%version, %renderer, "OpenGL context ready");

    let mut bg = ShaderProgram::load(
        &mut gfx,
        "bg",
        config.vertex_shader_path(),
        config.fragment_shader_path(),
    )
    .context("loading background shader")?;
    upload_projection(&mut bg, &mut gfx)?;
    let level = BgLevel::new(&mut gfx, bg)?;

    let mut game = GameLoop::from_config(MonotonicClock::new(), host, gfx, level, &config)?;
    let stats = game.run();

    // The host holds the GL context, so it must outlive the level's objects.
    let (_host, mut gfx, level) = game.into_parts();
    level.destroy(&mut gfx);

    tracing::info!(
        frames = stats.frames,
        failed_swaps = stats.failed_swaps,
        "cadence-desktop exiting"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "cadence-desktop",
            "--title",
            "Demo",
            "--no-vsync",
            "--tick-rate",
            "120",
            "--quit-key",
            "q",
        ]);
        let config = cli.loop_config().unwrap();
        assert_eq!(config.title, "Demo");
        assert!(!config.vsync);
        assert_eq!(config.tick_rate_hz, 120.0);
        assert_eq!(config.quit_key, Key::Q);
        assert_eq!(config.width, 800);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::parse_from(["cadence-desktop", "--tick-rate", "0"]);
        assert!(cli.loop_config().is_err());
    }
}
