//! Cancellable periodic spinner animation (§4.7), modeled the same way the
//! teacher's `TickEventSource` and `AsyncInputShutdown` do: a `tokio::spawn`
//! loop paired with a shared cancellation flag the task checks at every
//! suspension point, rather than a hard kill as the only way to stop it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use stage_command::{Address, Command};
use stage_terminal::Runtime;
use stage_view::View;
use tokio::task::JoinHandle;

use crate::session::LiveSession;

/// Owns the background task that cycles `frames` into `set_text` commands
/// for one live region. Dropping a handle without calling [`Self::finish`]
/// still stops the task: `Drop` flips the same cancellation flag the loop
/// checks before every sleep and between every frame, and aborts the
/// `JoinHandle` as a backstop so nothing outlives the handle.
pub struct SpinnerHandle {
    session: Arc<LiveSession>,
    id: String,
    address: Address,
    cancel: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl SpinnerHandle {
    pub(crate) fn spawn(
        session: Arc<LiveSession>,
        id: String,
        address: Address,
        frames: Vec<String>,
        interval: Duration,
    ) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let task_cancel = cancel.clone();
        let task_address = address.clone();
        let generation = Runtime::animation_generation();

        let task = tokio::spawn(async move {
            let mut index: usize = 0;
            loop {
                if task_cancel.load(Ordering::SeqCst) || Runtime::animation_generation() != generation {
                    break;
                }
                tokio::time::sleep(interval).await;
                if task_cancel.load(Ordering::SeqCst) || Runtime::animation_generation() != generation {
                    break;
                }
                if frames.is_empty() {
                    continue;
                }
                let text = frames[index % frames.len()].clone();
                let command = Command::SetText {
                    address: task_address.clone(),
                    text,
                };
                if let Err(err) = Runtime::apply_commands(std::slice::from_ref(&command)).await {
                    tracing::warn!(error = %err, "spinner frame emit failed, continuing");
                }
                index = index.wrapping_add(1);
            }
        });

        Self {
            session,
            id,
            address,
            cancel,
            task: Some(task),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_finished(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Cancels the animation task (idempotent — a second call does
    /// nothing) and, if `replacement` is given, commits it through the
    /// owning session at this handle's id before the region closes.
    ///
    /// Always emits `Command::End` for the spinner's address: leaving the
    /// region open would desync the event backend's begin/end nesting
    /// whenever a caller finishes a spinner instead of calling `remove`.
    pub async fn finish(&mut self, replacement: Option<Box<dyn View>>) -> Result<()> {
        if self.cancel.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(view) = replacement {
            self.session.update(self.id.clone(), None, view).await?;
        }
        let command = Command::End {
            address: self.address.clone(),
        };
        Runtime::apply_commands(std::slice::from_ref(&command)).await
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if !self.cancel.swap(true, Ordering::SeqCst) {
            if let Some(task) = self.task.take() {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_command::{Capabilities, NoopTheme};
    use stage_view::SessionOptions;

    async fn fresh_session() -> Arc<LiveSession> {
        Runtime::clear_all().await;
        Runtime::init(Capabilities::default()).await;
        Arc::new(LiveSession::new(80, 24, Capabilities::default(), Arc::new(NoopTheme), SessionOptions::default()))
    }

    #[tokio::test]
    async fn emits_at_least_four_frames_after_enough_simulated_time() {
        tokio::time::pause();
        let session = fresh_session().await;
        let mut handle = session
            .spinner("spin", None, vec!["a".into(), "b".into(), "c".into(), "d".into()], Duration::from_millis(10), "")
            .await
            .unwrap();

        tokio::time::advance(Duration::from_millis(45)).await;
        tokio::task::yield_now().await;

        handle.finish(None).await.unwrap();
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn finish_is_idempotent() {
        let session = fresh_session().await;
        let mut handle = session
            .spinner("spin", None, vec!["a".into()], Duration::from_millis(10), "")
            .await
            .unwrap();
        handle.finish(None).await.unwrap();
        handle.finish(None).await.unwrap();
        assert!(handle.is_finished());
    }
}
