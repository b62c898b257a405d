//! The playback state machine.
//!
//! A [`Player`] owns the current input array and at most one active run. While running it keeps
//! exactly one [`Tick`] armed: the time at which the next snapshot is due. Ticks carry the run
//! and arming sequence they were created for, so a tick that outlived a pause, a stop or a new
//! start is recognised and ignored when it fires.

use std::fmt::{self, Display};

use orstviz_steps::{Algorithm, Element, InputSource, Snapshot, Steps};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, trace};

use crate::config::{PlayerConfig, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl PlaybackState {
    /// A run exists and has not finished.
    pub fn is_sorting(self) -> bool {
        matches!(self, PlaybackState::Running | PlaybackState::Paused)
    }
}

impl Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
            PlaybackState::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("cannot {action} while {state}")]
    Busy {
        action: &'static str,
        state: PlaybackState,
    },

    #[error("nothing to pause, the player is {0}")]
    NotRunning(PlaybackState),

    #[error("nothing to resume, the player is {0}")]
    NotPaused(PlaybackState),

    #[error("no run to stop, the player is {0}")]
    NoActiveRun(PlaybackState),
}

/// Identifies one run, from `start` until it completes or is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

/// The next scheduled delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    run: RunId,
    seq: u64,
    due: Instant,
}

impl Tick {
    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn due(&self) -> Instant {
        self.due
    }
}

/// What a call to [`Player::fire`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    /// One snapshot went to the renderer and the next tick is armed.
    Delivered,
    /// The run had nothing left and the player is now `Completed`.
    Completed,
    /// The tick no longer belongs to a live, unpaused run. Nothing happened.
    Stale,
}

/// What the renderer is told whenever the player changes state or settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: PlaybackState,
    pub algorithm: Algorithm,
    pub speed: Speed,
    pub size: usize,
    /// Snapshots delivered by the current run, or by the run that just completed.
    pub delivered: usize,
}

impl Status {
    pub fn is_sorting(&self) -> bool {
        self.state.is_sorting()
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }
}

/// Receives everything the player produces. Only `render` is required.
pub trait Renderer {
    /// One snapshot of the active run.
    fn render(&mut self, snapshot: &Snapshot);

    /// A new input array, shown before any run starts on it.
    fn array(&mut self, _elements: &[Element]) {}

    fn status(&mut self, _status: &Status) {}
}

impl<F> Renderer for F
where
    F: FnMut(&Snapshot),
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Requests accepted by [`Player::apply`] and the drive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate,
    SetSize(usize),
    SetAlgorithm(Algorithm),
    SetSpeed(u32),
    Faster,
    Slower,
    Start,
    Pause,
    Resume,
    Stop,
    /// Ends [`Player::drive`] right away. [`Player::apply`] treats it as a no-op.
    Quit,
}

/// How much `Faster` and `Slower` change the speed.
pub const SPEED_STEP: u32 = 10;

struct Run {
    id: RunId,
    steps: Steps,
}

pub struct Player<R> {
    renderer: R,
    source: InputSource,
    algorithm: Algorithm,
    speed: Speed,
    state: PlaybackState,
    run: Option<Run>,
    armed: Option<Tick>,
    delivered: usize,
    next_run: u64,
    next_seq: u64,
}

impl<R: Renderer> Player<R> {
    /// Generates the first input array and shows it.
    pub fn new(config: &PlayerConfig, renderer: R) -> Self {
        let source = match config.seed {
            Some(seed) => InputSource::seeded(config.size, seed),
            None => InputSource::new(config.size),
        };
        Self::with_source(source, config.algorithm, config.speed, renderer)
    }

    pub fn with_source(
        source: InputSource,
        algorithm: Algorithm,
        speed: Speed,
        renderer: R,
    ) -> Self {
        let mut player = Self {
            renderer,
            source,
            algorithm,
            speed,
            state: PlaybackState::Idle,
            run: None,
            armed: None,
            delivered: 0,
            next_run: 0,
            next_seq: 0,
        };
        player.show_array();
        player.notify();
        player
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn elements(&self) -> &[Element] {
        self.source.elements()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// The active run, if any.
    pub fn run_id(&self) -> Option<RunId> {
        self.run.as_ref().map(|run| run.id)
    }

    /// The tick the player is waiting on. `None` unless running.
    pub fn pending(&self) -> Option<Tick> {
        self.armed
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            algorithm: self.algorithm,
            speed: self.speed,
            size: self.source.size(),
            delivered: self.delivered,
        }
    }

    /// Replaces the input array. Not allowed while a run is in progress.
    pub fn generate(&mut self) -> Result<(), PlayerError> {
        self.ensure_settled("generate a new array")?;
        self.source.regenerate();
        self.settle_idle();
        Ok(())
    }

    /// Changes the array size and regenerates. Not allowed while a run is in progress.
    pub fn set_size(&mut self, size: usize) -> Result<(), PlayerError> {
        self.ensure_settled("resize the array")?;
        self.source.set_size(size);
        debug!(size, "array resized");
        self.settle_idle();
        Ok(())
    }

    /// Picks the algorithm for the next run. Not allowed while a run is in progress.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), PlayerError> {
        self.ensure_settled("switch algorithms")?;
        self.algorithm = algorithm;
        debug!(%algorithm, "algorithm selected");
        self.notify();
        Ok(())
    }

    /// Allowed in every state. A tick that is already armed keeps its due time, the new delay
    /// applies from the next delivery on.
    pub fn set_speed(&mut self, speed: u32) -> Speed {
        self.speed = Speed::new(speed);
        debug!(speed = self.speed.get(), "speed changed");
        self.notify();
        self.speed
    }

    /// Begins a fresh run over a copy of the current array. The first snapshot is due at `now`.
    ///
    /// Starting while paused abandons the paused run.
    pub fn start(&mut self, now: Instant) -> Result<RunId, PlayerError> {
        match self.state {
            PlaybackState::Running => return Err(PlayerError::AlreadyRunning),
            PlaybackState::Paused => {
                debug!("abandoning the paused run");
                self.teardown();
            }
            PlaybackState::Idle | PlaybackState::Completed => {}
        }

        let id = RunId(self.next_run);
        self.next_run += 1;
        self.run = Some(Run {
            id,
            steps: self.algorithm.steps(self.source.elements()),
        });
        self.delivered = 0;
        self.state = PlaybackState::Running;
        self.arm(id, now);
        info!(run = id.0, algorithm = %self.algorithm, size = self.source.size(), "run started");
        self.notify();
        Ok(id)
    }

    /// Disarms the pending tick. The run keeps its position.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Running {
            return Err(PlayerError::NotRunning(self.state));
        }
        self.armed = None;
        self.state = PlaybackState::Paused;
        debug!("paused");
        self.notify();
        Ok(())
    }

    /// Continues the paused run where it left off. The next snapshot is due at `now`.
    pub fn resume(&mut self, now: Instant) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Paused {
            return Err(PlayerError::NotPaused(self.state));
        }
        let Some(id) = self.run_id() else {
            return Err(PlayerError::NotPaused(self.state));
        };
        self.state = PlaybackState::Running;
        self.arm(id, now);
        debug!("resumed");
        self.notify();
        Ok(())
    }

    /// Abandons the run and shows a freshly generated array.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        if !self.state.is_sorting() {
            return Err(PlayerError::NoActiveRun(self.state));
        }
        self.teardown();
        self.source.regenerate();
        info!("run stopped");
        self.settle_idle();
        Ok(())
    }

    /// Delivers the next snapshot if `tick` is still the armed tick of the active run.
    ///
    /// Once the run has nothing left the player moves to `Completed` on this same call.
    pub fn fire(&mut self, tick: Tick, now: Instant) -> Fired {
        if self.state != PlaybackState::Running || self.armed != Some(tick) {
            trace!(run = tick.run.0, seq = tick.seq, "stale tick ignored");
            return Fired::Stale;
        }
        let Some(run) = self.run.as_mut().filter(|run| run.id == tick.run) else {
            trace!(run = tick.run.0, "tick for a torn down run ignored");
            return Fired::Stale;
        };
        self.armed = None;

        match run.steps.next() {
            Some(snapshot) => {
                let id = run.id;
                self.delivered += 1;
                self.renderer.render(&snapshot);
                self.arm(id, now + self.speed.delay());
                Fired::Delivered
            }
            None => {
                self.run = None;
                self.state = PlaybackState::Completed;
                info!(delivered = self.delivered, "run completed");
                self.notify();
                Fired::Completed
            }
        }
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Result<(), PlayerError> {
        trace!(?command, "applying");
        match command {
            Command::Generate => self.generate(),
            Command::SetSize(size) => self.set_size(size),
            Command::SetAlgorithm(algorithm) => self.set_algorithm(algorithm),
            Command::SetSpeed(speed) => {
                self.set_speed(speed);
                Ok(())
            }
            Command::Faster => {
                self.set_speed(self.speed.faster(SPEED_STEP).get());
                Ok(())
            }
            Command::Slower => {
                self.set_speed(self.speed.slower(SPEED_STEP).get());
                Ok(())
            }
            Command::Start => self.start(now).map(|_| ()),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(now),
            Command::Stop => self.stop(),
            Command::Quit => Ok(()),
        }
    }

    fn ensure_settled(&self, action: &'static str) -> Result<(), PlayerError> {
        if self.state.is_sorting() {
            return Err(PlayerError::Busy {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    fn arm(&mut self, run: RunId, due: Instant) {
        self.armed = Some(Tick {
            run,
            seq: self.next_seq,
            due,
        });
        self.next_seq += 1;
    }

    fn teardown(&mut self) {
        self.armed = None;
        self.run = None;
        self.delivered = 0;
    }

    fn settle_idle(&mut self) {
        self.state = PlaybackState::Idle;
        self.delivered = 0;
        self.show_array();
        self.notify();
    }

    fn show_array(&mut self) {
        self.renderer.array(self.source.elements());
    }

    fn notify(&mut self) {
        let status = self.status();
        self.renderer.status(&status);
    }
}
