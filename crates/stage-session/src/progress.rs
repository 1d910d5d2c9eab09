//! Determinate progress handle (§4.7).
//!
//! Holds its own `total`/`current`/`finished` state and emits a single
//! `Command::Frame` per meaningful `update()`; it never touches a
//! `LiveSession`'s element map directly, so a progress node's frame stream
//! can run independently of whatever else that session is updating.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use anyhow::Result;
use stage_command::{Address, Command, FrameInfo};
use stage_terminal::Runtime;

/// `{session_id, total, current, label, finished}` from §4.7, minus
/// `session_id` (the caller already has it — this handle only needs the
/// node address `update()` targets).
pub struct ProgressHandle {
    address: Address,
    total: i64,
    current: AtomicI64,
    label: String,
    finished: AtomicBool,
}

impl ProgressHandle {
    pub(crate) fn new(address: Address, total: i64, label: String) -> Self {
        Self {
            address,
            total,
            current: AtomicI64::new(0),
            label,
            finished: AtomicBool::new(false),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn current(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Clamps `n` to `[0, total]`. A no-op (no command emitted) if the
    /// clamped value equals the current one, or if the handle already
    /// finished.
    pub async fn update(&self, n: i64) -> Result<()> {
        if self.is_finished() {
            return Ok(());
        }
        let clamped = n.clamp(0, self.total.max(0));
        let previous = self.current.swap(clamped, Ordering::SeqCst);
        if previous == clamped {
            return Ok(());
        }
        let progress = clamped as f32 / self.total.max(1) as f32;
        let command = Command::Frame {
            address: self.address.clone(),
            info: FrameInfo {
                frame_index: clamped as u64,
                progress,
            },
        };
        Runtime::apply_commands(std::slice::from_ref(&command)).await
    }

    /// Marks the handle finished; further `update()` calls become no-ops.
    /// Idempotent — only the first call logs anything.
    pub fn finish(&self, status: impl Into<String>) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(
            address = %self.address,
            total = self.total,
            current = self.current(),
            status = %status.into(),
            "progress finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_command::Capabilities;

    async fn fresh_handle(total: i64) -> ProgressHandle {
        Runtime::clear_all().await;
        Runtime::init(Capabilities::default()).await;
        ProgressHandle::new(Address::new("root.progress"), total, String::new())
    }

    #[tokio::test]
    async fn update_clamps_and_computes_progress_fraction() {
        let handle = fresh_handle(4).await;
        handle.update(2).await.unwrap();
        assert_eq!(handle.current(), 2);

        handle.update(5).await.unwrap();
        assert_eq!(handle.current(), 4);
    }

    #[tokio::test]
    async fn unchanged_update_is_a_no_op() {
        let handle = fresh_handle(4).await;
        handle.update(2).await.unwrap();
        handle.update(2).await.unwrap();
        assert_eq!(handle.current(), 2);
    }

    #[tokio::test]
    async fn update_after_finish_is_a_no_op() {
        let handle = fresh_handle(4).await;
        handle.update(2).await.unwrap();
        handle.finish("done");
        handle.update(4).await.unwrap();
        assert_eq!(handle.current(), 2);
    }

    #[tokio::test]
    async fn finish_is_idempotent() {
        let handle = fresh_handle(4).await;
        handle.finish("done");
        handle.finish("done again");
        assert!(handle.is_finished());
    }
}
