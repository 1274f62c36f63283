use thiserror::Error;

/// Errors returned by [`GameHandle`](crate::GameHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine task has stopped.
    #[error("game engine has shut down")]
    Closed,
    /// The command queue is at capacity.
    #[error("command queue is full")]
    QueueFull,
}
