use std::future;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::player::{Command, Fired, PlaybackState, Player, Renderer, Tick};

/// When [`Player::drive`] hands control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Until {
    /// Keep going until commands run out, or [`Command::Quit`] arrives.
    #[default]
    Closed,
    /// Also return as soon as a run completes while driving.
    Completed,
}

impl<R: Renderer> Player<R> {
    /// Interleaves incoming commands with the armed tick until `until` is met.
    ///
    /// Commands are handled before a tick that is due at the same moment, so a pause always
    /// wins over the delivery it races with. [`Command::Quit`] returns right away. Once every
    /// sender is dropped a running run still plays to its end; in any other state there is
    /// nothing left that could happen, so the loop returns.
    pub async fn drive(&mut self, mut commands: UnboundedReceiver<Command>, until: Until) {
        let mut open = true;
        loop {
            if !open && self.state() != PlaybackState::Running {
                debug!(state = %self.state(), "no more commands and nothing playing");
                return;
            }

            let armed = self.pending();
            tokio::select! {
                biased;

                command = commands.recv(), if open => match command {
                    Some(Command::Quit) => {
                        debug!("quit requested");
                        return;
                    }
                    Some(command) => {
                        if let Err(err) = self.apply(command, Instant::now()) {
                            debug!(%err, "command rejected");
                        }
                    }
                    None => {
                        debug!("command channel closed");
                        open = false;
                    }
                },

                () = wait_for(armed) => {
                    if let Some(tick) = armed {
                        let fired = self.fire(tick, Instant::now());
                        if fired == Fired::Completed && until == Until::Completed {
                            debug!("run completed, leaving the drive loop");
                            return;
                        }
                    }
                }
            }
        }
    }
}

async fn wait_for(tick: Option<Tick>) {
    match tick {
        Some(tick) => time::sleep_until(tick.due()).await,
        None => future::pending().await,
    }
}
