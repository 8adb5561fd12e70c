//! Async driver: one tokio task owns one engine and feeds it inputs from a
//! channel in arrival order, sleeping until the engine's next deadline in
//! between. Handles are cheap to clone and can be moved into UI callbacks.

use std::fmt;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::autoplay::AutoplayStatus;
use crate::engine::{CarouselEngine, EngineState};
use crate::error::EngineError;
use crate::input::{EngineInput, PointerEvent};

enum Command<T> {
    Input(EngineInput, oneshot::Sender<bool>),
    UpdateItems(Vec<T>, oneshot::Sender<Result<(), EngineError>>),
    Destroy(oneshot::Sender<()>),
}

pub struct SliderHandle<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
    state: watch::Receiver<EngineState>,
}

impl<T> Clone for SliderHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for SliderHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderHandle")
            .field("state", &*self.state.borrow())
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Move `engine` into a new task on the current tokio runtime.
///
/// The task ends when `destroy` is called or every handle is dropped; in
/// both cases the engine is torn down (timers cleared, surface unmounted).
pub fn spawn<T>(engine: CarouselEngine<T>) -> (SliderHandle<T>, JoinHandle<()>)
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(engine.state());
    let task = tokio::spawn(run(engine, rx, state_tx));
    (
        SliderHandle {
            tx,
            state: state_rx,
        },
        task,
    )
}

async fn run<T>(
    mut engine: CarouselEngine<T>,
    mut rx: mpsc::UnboundedReceiver<Command<T>>,
    state_tx: watch::Sender<EngineState>,
) {
    loop {
        let deadline = engine.next_deadline();
        tokio::select! {
            command = rx.recv() => match command {
                // Publish before replying so an awaited input is visible
                // through `state()` as soon as the caller resumes.
                Some(Command::Input(input, reply)) => {
                    let accepted = engine.dispatch(input, Instant::now());
                    state_tx.send_replace(engine.state());
                    let _ = reply.send(accepted);
                }
                Some(Command::UpdateItems(items, reply)) => {
                    let result = engine.update_items(items, Instant::now());
                    state_tx.send_replace(engine.state());
                    let _ = reply.send(result);
                }
                Some(Command::Destroy(reply)) => {
                    engine.destroy();
                    mark_stopped(&state_tx);
                    let _ = reply.send(());
                    return;
                }
                None => {
                    debug!("all slider handles dropped");
                    break;
                }
            },
            _ = sleep_until(deadline) => {
                engine.advance_to(Instant::now());
                state_tx.send_replace(engine.state());
            }
        }
    }

    drop(engine);
    mark_stopped(&state_tx);
    info!("slider task finished");
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn mark_stopped(state_tx: &watch::Sender<EngineState>) {
    state_tx.send_modify(|state| {
        state.is_animating = false;
        state.autoplay_active = false;
        state.autoplay = AutoplayStatus::Stopped;
    });
}

impl<T> SliderHandle<T> {
    /// Latest published engine state.
    pub fn state(&self) -> EngineState {
        *self.state.borrow()
    }

    /// Receiver that wakes after every processed input or timed event.
    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state.clone()
    }

    /// Send one input and wait until the engine has applied it. The flag
    /// reports whether a transition was started.
    pub async fn send(&self, input: EngineInput) -> Result<bool, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Input(input, reply_tx))
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)
    }

    pub async fn next(&self) -> Result<bool, EngineError> {
        self.send(EngineInput::Next).await
    }

    pub async fn prev(&self) -> Result<bool, EngineError> {
        self.send(EngineInput::Prev).await
    }

    pub async fn slide_to(&self, index: usize) -> Result<bool, EngineError> {
        self.send(EngineInput::SlideTo(index)).await
    }

    pub async fn pagination_click(
        &self,
        index: usize,
    ) -> Result<bool, EngineError> {
        self.send(EngineInput::PaginationClick(index)).await
    }

    pub async fn play(&self) -> Result<(), EngineError> {
        self.send(EngineInput::Play).await.map(|_| ())
    }

    pub async fn pause(&self) -> Result<(), EngineError> {
        self.send(EngineInput::Pause).await.map(|_| ())
    }

    pub async fn pointer_enter(&self) -> Result<(), EngineError> {
        self.send(EngineInput::PointerEnter).await.map(|_| ())
    }

    pub async fn pointer_leave(&self) -> Result<(), EngineError> {
        self.send(EngineInput::PointerLeave).await.map(|_| ())
    }

    pub async fn pointer(
        &self,
        event: PointerEvent,
    ) -> Result<bool, EngineError> {
        self.send(EngineInput::Pointer(event)).await
    }

    pub async fn update_items(&self, items: Vec<T>) -> Result<(), EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::UpdateItems(items, reply_tx))
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Tear the engine down and end its task. Later calls on any clone of
    /// this handle return [`EngineError::Closed`].
    pub async fn destroy(&self) -> Result<(), EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Destroy(reply_tx))
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)
    }
}
