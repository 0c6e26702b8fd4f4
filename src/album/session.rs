use std::sync::Arc;
use std::time::Duration;

use async_std::sync::Mutex;
use async_std::task::{self, JoinHandle};

use super::{AlbumController, AlbumState, Effect, Intent, OpenError, Photo, SettleTicket};

#[derive(Debug, Default)]
struct Inner {
    controller: AlbumController,
    timer: Option<JoinHandle<()>>,
}

/// Drives an [`AlbumController`] on the async-std runtime. Each transition
/// gets one spawned timer task; opening a new album or closing the viewer
/// cancels it.
///
/// This is the host for interactive clients that animate the flip. The
/// server-rendered album page does not use it: it settles intents at once.
#[derive(Clone, Debug, Default)]
pub struct AlbumSession {
    inner: Arc<Mutex<Inner>>,
    settle_delay: Option<Duration>,
}

impl AlbumSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the controller's settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    pub async fn open(&self, photos: Vec<Photo>, start_index: usize) -> Result<AlbumState, OpenError> {
        let mut inner = self.inner.lock().await;
        let state = inner.controller.open(photos, start_index)?.clone();
        let stale = inner.timer.take();
        drop(inner);

        cancel(stale).await;
        Ok(state)
    }

    pub async fn close(&self) {
        self.dispatch(Intent::Close).await;
    }

    pub async fn next(&self) -> Effect {
        self.dispatch(Intent::Next).await
    }

    pub async fn previous(&self) -> Effect {
        self.dispatch(Intent::Previous).await
    }

    pub async fn jump_to(&self, target: usize) -> Effect {
        self.dispatch(Intent::JumpTo(target)).await
    }

    pub async fn dispatch(&self, intent: Intent) -> Effect {
        let mut inner = self.inner.lock().await;
        let effect = inner.controller.dispatch(intent);

        match effect {
            Effect::ScheduleSettle { ticket, after } => {
                let after = self.settle_delay.unwrap_or(after);
                inner.timer = Some(self.spawn_timer(ticket, after));
            },
            Effect::Closed => {
                let stale = inner.timer.take();
                drop(inner);
                cancel(stale).await;
            },
            Effect::None => {},
        }

        effect
    }

    pub async fn state(&self) -> Option<AlbumState> {
        self.inner.lock().await.controller.state().cloned()
    }

    pub async fn current_photo(&self) -> Option<Photo> {
        self.inner.lock().await.controller.current_photo().cloned()
    }

    pub async fn position(&self) -> Option<(usize, usize)> {
        self.inner.lock().await.controller.position()
    }

    fn spawn_timer(&self, ticket: SettleTicket, after: Duration) -> JoinHandle<()> {
        let inner = self.inner.clone();
        task::spawn(async move {
            task::sleep(after).await;
            let mut inner = inner.lock().await;
            if inner.controller.settle(ticket) {
                inner.timer = None;
            }
        })
    }
}

async fn cancel(timer: Option<JoinHandle<()>>) {
    if let Some(timer) = timer {
        tracing::debug!("cancelling pending album transition");
        timer.cancel().await;
    }
}
