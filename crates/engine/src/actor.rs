//! The engine actor: the only owner of the game state.
//!
//! Every mutation arrives as an [`EngineMsg`] on one bounded queue and is
//! applied in arrival order. Timed pauses of the line-clear pass and banners
//! are a single deadline owned by the loop, so nothing ever sleeps while
//! holding the state.

use std::time::Duration;

use blockfall_core::{GameEvent, GameSnapshot, GameState, Outcome, Phase};
use blockfall_types::Command;
use log::{debug, info, trace};
use tokio::sync::mpsc::{self, WeakSender};
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::tasks;

/// Message delivered to the actor.
#[derive(Debug)]
pub enum EngineMsg {
    Command(Command),
    /// Periodic gravity drop.
    Gravity,
    /// One step of a running hard drop; the reply says whether to continue.
    HardDropStep {
        piece_id: u32,
        reply: oneshot::Sender<bool>,
    },
    Shutdown,
}

enum Wake {
    Msg(Option<EngineMsg>),
    Timer,
}

pub(crate) struct Actor {
    pub(crate) state: GameState,
    pub(crate) rx: mpsc::Receiver<EngineMsg>,
    pub(crate) weak_tx: WeakSender<EngineMsg>,
    pub(crate) snapshot_tx: watch::Sender<GameSnapshot>,
    pub(crate) events_tx: broadcast::Sender<GameEvent>,
    pub(crate) gravity_tx: watch::Sender<Option<Duration>>,
    pub(crate) hard_drop_step: Duration,
    pub(crate) hard_drop: Option<JoinHandle<()>>,
    pub(crate) deadline: Option<Instant>,
}

pub(crate) fn gravity_period(state: &GameState) -> Option<Duration> {
    state
        .gravity_interval_ms()
        .map(|ms| Duration::from_millis(ms as u64))
}

impl Actor {
    pub(crate) async fn run(mut self) -> GameSnapshot {
        info!("engine started");
        loop {
            self.publish();

            if self.deadline.is_none() {
                self.deadline = self
                    .state
                    .pending_delay_ms()
                    .map(|ms| Instant::now() + Duration::from_millis(ms as u64));
            }

            let wake = match self.deadline {
                Some(deadline) => tokio::select! {
                    msg = self.rx.recv() => Wake::Msg(msg),
                    _ = time::sleep_until(deadline) => Wake::Timer,
                },
                None => Wake::Msg(self.rx.recv().await),
            };

            match wake {
                Wake::Timer => {
                    self.deadline = None;
                    self.state.resume();
                }
                Wake::Msg(None) | Wake::Msg(Some(EngineMsg::Shutdown)) => break,
                Wake::Msg(Some(msg)) => self.handle(msg),
            }
        }

        self.gravity_tx.send_replace(None);
        if let Some(task) = self.hard_drop.take() {
            task.abort();
        }
        self.publish();
        info!(
            "engine stopped: score {}, lines {}",
            self.state.score(),
            self.state.total_lines()
        );
        self.state.snapshot()
    }

    fn handle(&mut self, msg: EngineMsg) {
        match msg {
            EngineMsg::Command(Command::HardDrop) => self.start_hard_drop(),
            EngineMsg::Command(command) => {
                let outcome = self.state.apply_command(command);
                trace!("{} -> {:?}", command.as_str(), outcome);
            }
            EngineMsg::Gravity => {
                if self.state.tick() == Outcome::Ignored {
                    trace!("gravity ignored");
                }
            }
            EngineMsg::HardDropStep { piece_id, reply } => {
                let more = self.state.hard_drop_step(piece_id);
                let _ = reply.send(more);
            }
            EngineMsg::Shutdown => {}
        }
    }

    fn start_hard_drop(&mut self) {
        if self.state.phase() != Phase::Running {
            debug!("hard drop ignored");
            return;
        }
        if self
            .hard_drop
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            debug!("hard drop already running");
            return;
        }
        let piece_id = self.state.piece_id();
        self.hard_drop = Some(tokio::spawn(tasks::hard_drop(
            self.weak_tx.clone(),
            piece_id,
            self.hard_drop_step,
        )));
    }

    /// Push the current snapshot, pending events and gravity period.
    fn publish(&mut self) {
        self.snapshot_tx.send_replace(self.state.snapshot());

        for event in self.state.drain_events() {
            // No subscribers is fine.
            let _ = self.events_tx.send(event);
        }

        let period = gravity_period(&self.state);
        self.gravity_tx.send_if_modified(|current| {
            if *current == period {
                return false;
            }
            *current = period;
            true
        });
    }
}
