//! Session task: single owner of a [`Session`], fed over a channel.

use super::{Command, Screen, Session, Snapshot};
use crate::persistence::KeyValueStore;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Delay before the error display resets itself
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(2);

/// Session task configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// How long the error display stays up before resetting
    pub reset_delay: Duration,
    /// Requests buffered before senders wait
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            channel_capacity: 32,
        }
    }
}

/// Errors returned by [`SessionHandle`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session task has stopped")]
    Closed,
}

enum Request {
    Dispatch {
        commands: Vec<Command>,
        reply: oneshot::Sender<Snapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
}

/// Cloneable handle to a session running on its own task.
///
/// The task ends once every handle is dropped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Move `session` onto a new tokio task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S, D>(session: Session<S, D>, config: SessionConfig) -> Self
    where
        S: KeyValueStore + 'static,
        D: Screen + 'static,
    {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        tokio::spawn(run(session, rx, config.reset_delay));
        Self { tx }
    }

    /// Apply one command and return the resulting screen state.
    pub async fn dispatch(&self, command: Command) -> Result<Snapshot, SessionError> {
        self.dispatch_all(vec![command]).await
    }

    /// Apply commands in order as one batch.
    pub async fn dispatch_all(&self, commands: Vec<Command>) -> Result<Snapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Dispatch { commands, reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Current screen state, without affecting a pending reset.
    pub async fn snapshot(&self) -> Result<Snapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Snapshot { reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    async fn send(&self, request: Request) -> Result<(), SessionError> {
        self.tx.send(request).await.map_err(|_| SessionError::Closed)
    }
}

async fn run<S, D>(mut session: Session<S, D>, mut rx: mpsc::Receiver<Request>, delay: Duration)
where
    S: KeyValueStore,
    D: Screen,
{
    let mut reset_at: Option<Instant> = None;

    loop {
        tokio::select! {
            request = rx.recv() => {
                let Some(request) = request else { break };
                match request {
                    Request::Dispatch { commands, reply } => {
                        if !commands.is_empty() {
                            session.dispatch_all(&commands);
                            // a newer error restarts the delay, anything else cancels it
                            reset_at = session.is_error().then(|| Instant::now() + delay);
                        }
                        let _ = reply.send(session.snapshot());
                    }
                    Request::Snapshot { reply } => {
                        let _ = reply.send(session.snapshot());
                    }
                }
            }
            _ = wait_until(reset_at) => {
                reset_at = None;
                if session.expire_error() {
                    debug!("Error display reset");
                }
            }
        }
    }

    debug!("Session task stopped");
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
