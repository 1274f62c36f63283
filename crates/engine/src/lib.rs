//! Game engine - an actor that serializes every mutation of the game state
//!
//! The engine runs as a set of tokio tasks:
//!
//! - the **actor** owns [`GameState`] and is the only code that mutates it
//! - the **gravity** task sends a drop every level interval
//! - a transient **hard-drop** task sends one drop step every 30ms
//!
//! Producers submit messages through one bounded queue. Renderers read
//! snapshots from a `watch` channel; audio subscribes to a `broadcast` of
//! [`GameEvent`]s.
//!
//! # Example
//!
//! ```no_run
//! use blockfall_engine::{spawn, Engine, EngineConfig};
//! use blockfall_types::Command;
//!
//! # async fn demo() -> Result<(), blockfall_engine::EngineError> {
//! let Engine { handle, mut events, task } = spawn(EngineConfig::from_env());
//! handle.send(Command::RotateCw).await?;
//! println!("score {}", handle.snapshot().score);
//! if let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//!
//! handle.shutdown().await?;
//! let last = task.await.expect("engine task panicked");
//! println!("final score {}", last.score);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod error;
mod tasks;

use blockfall_core::{GameEvent, GameSnapshot, GameState};
use blockfall_types::Command;
use log::warn;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

pub use actor::EngineMsg;
pub use config::EngineConfig;
pub use error::EngineError;

/// Capacity of the event broadcast; slow subscribers lose the oldest events.
const EVENT_CAPACITY: usize = 256;

/// Cloneable handle to a running engine.
///
/// The engine stops when every handle is dropped or on [`shutdown`](Self::shutdown).
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::Sender<EngineMsg>,
    snapshots: watch::Receiver<GameSnapshot>,
    events: broadcast::Sender<GameEvent>,
}

impl GameHandle {
    /// Queue a command, waiting for room in the queue.
    pub async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .send(EngineMsg::Command(command))
            .await
            .map_err(|_| EngineError::Closed)
    }

    /// Queue a command without waiting.
    pub fn try_send(&self, command: Command) -> Result<(), EngineError> {
        match self.tx.try_send(EngineMsg::Command(command)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("command queue full, dropping {}", command.as_str());
                Err(EngineError::QueueFull)
            }
            Err(TrySendError::Closed(_)) => Err(EngineError::Closed),
        }
    }

    /// Queue a command from a thread outside the runtime.
    ///
    /// Panics if called from within an async context.
    pub fn send_blocking(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .blocking_send(EngineMsg::Command(command))
            .map_err(|_| EngineError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn watch(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribe to game events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Ask the engine to stop. Queued messages before it are still applied.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.tx
            .send(EngineMsg::Shutdown)
            .await
            .map_err(|_| EngineError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A running engine as returned by [`spawn`].
#[derive(Debug)]
pub struct Engine {
    pub handle: GameHandle,
    /// Subscribed before the actor started: sees every event, including the
    /// first spawn and the opening banner.
    pub events: broadcast::Receiver<GameEvent>,
    /// Resolves to the final snapshot once the engine stops.
    pub task: JoinHandle<GameSnapshot>,
}

/// Start a new game on the current tokio runtime.
pub fn spawn(config: EngineConfig) -> Engine {
    let state = GameState::with_timings(config.seed, config.timings);
    spawn_with(state, &config)
}

/// Start the engine on an existing game state. The game is started if it was not.
pub fn spawn_with(mut state: GameState, config: &EngineConfig) -> Engine {
    state.start();

    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (events_tx, events) = broadcast::channel(EVENT_CAPACITY);
    let (gravity_tx, gravity_rx) = watch::channel(actor::gravity_period(&state));

    tokio::spawn(tasks::gravity_loop(tx.downgrade(), gravity_rx));

    let actor = actor::Actor {
        state,
        rx,
        weak_tx: tx.downgrade(),
        snapshot_tx,
        events_tx: events_tx.clone(),
        gravity_tx,
        hard_drop_step: config.hard_drop_step(),
        hard_drop: None,
        deadline: None,
    };
    let task = tokio::spawn(actor.run());

    let handle = GameHandle {
        tx,
        snapshots: snapshot_rx,
        events: events_tx,
    };
    Engine {
        handle,
        events,
        task,
    }
}
