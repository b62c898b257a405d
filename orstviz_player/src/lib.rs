//! Paced playback of sorting step traces.
//!
//! A [`Player`] turns the snapshot sequence of an [`Algorithm`] into a timed animation: one
//! snapshot per tick, at a configurable [`Speed`], with pause, resume and stop. The player itself
//! is synchronous and clock-agnostic; [`Player::drive`] runs it on the tokio timer against a
//! channel of [`Command`]s.
//!
//! ```
//! use orstviz_player::{Fired, Player, PlayerConfig};
//! use orstviz_steps::{Algorithm, Snapshot};
//! use tokio::time::Instant;
//!
//! let config = PlayerConfig {
//!     algorithm: Algorithm::Insertion,
//!     size: 12,
//!     seed: Some(1),
//!     ..PlayerConfig::default()
//! };
//! let mut frames = 0;
//! let mut player = Player::new(&config, |_: &Snapshot| frames += 1);
//!
//! player.start(Instant::now()).unwrap();
//! while let Some(tick) = player.pending() {
//!     if player.fire(tick, tick.due()) == Fired::Completed {
//!         break;
//!     }
//! }
//! drop(player);
//! assert!(frames >= 12);
//! ```

pub mod config;
mod drive;
pub mod player;
pub mod terminal;

pub use config::{ConfigError, PlayerConfig, Speed, SIZE_RANGE};
pub use drive::Until;
pub use player::{
    Command, Fired, PlaybackState, Player, PlayerError, Renderer, RunId, Status, Tick,
};

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use orstviz_steps::Algorithm;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use terminal::TerminalRenderer;

/// Animate a sorting algorithm in the terminal. Install the `orstviz` binary and run
/// `orstviz play --help` to see what options are available
#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Algorithm to animate.
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Number of elements, between 10 and 100.
    #[arg(short, long)]
    size: Option<usize>,

    /// Snapshots per second, between 1 and 100.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    speed: Option<u32>,

    /// Seed for the input arrays.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with a `[player]` table. Flags take precedence over it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep waiting for commands after the run completes.
    #[arg(long)]
    stay: bool,
}

impl PlayArgs {
    fn config(&self) -> anyhow::Result<PlayerConfig> {
        let mut config = match &self.config {
            Some(path) => PlayerConfig::load(path)?,
            None => PlayerConfig::default(),
        };

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(speed) = self.speed {
            config.speed = Speed::new(speed);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.stay {
            config.exit_on_complete = false;
        }
        Ok(config.clamped())
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.config()?;
        info!(?config, "starting playback");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Unable to start the playback runtime")?;

        eprintln!("{} {}", "commands:".bold(), terminal::HELP);

        let renderer = TerminalRenderer::new()?;
        let (commands, receiver) = mpsc::unbounded_channel();
        terminal::spawn_stdin_reader(commands);

        let until = if config.exit_on_complete {
            Until::Completed
        } else {
            Until::Closed
        };

        runtime.block_on(async {
            let mut player = Player::new(&config, renderer);
            player.start(Instant::now())?;
            player.drive(receiver, until).await;
            anyhow::Ok(())
        })
    }
}
