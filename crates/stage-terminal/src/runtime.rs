//! Process-wide runtime: the single point through which a command stream
//! reaches every registered backend, and the one place allowed to hold the
//! mutable backend list.
//!
//! A plain `tokio::sync::OnceCell` can't be reset once populated, and the
//! test hook below needs exactly that, so the slot is a
//! `tokio::sync::Mutex<Option<Inner>>` instead: still async-aware lazy
//! initialization, but one `clear_all()` away from a clean slate between
//! tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Result};
use stage_command::{Capabilities, Command};
use stage_node::Node;
use stage_paint::{PaintContext, PaintEngine};
use stage_render::Backend;
use tokio::sync::Mutex;

struct Inner {
    backends: Vec<Box<dyn Backend + Send>>,
    capabilities: Capabilities,
}

static RUNTIME: Mutex<Option<Inner>> = Mutex::const_new(None);
static ANIMATION_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Namespace for the process-wide singleton's operations. Holds no state of
/// its own; every method locks the shared slot above.
pub struct Runtime;

impl Runtime {
    /// Initializes the singleton with `capabilities` if it hasn't been
    /// already. Re-calling after a prior `init` is a no-op: capabilities are
    /// fixed for the process's lifetime once a backend has started
    /// consuming them, same as a resize is handled by re-querying
    /// [`crate::capabilities::detect`] rather than re-initializing.
    pub async fn init(capabilities: Capabilities) {
        let mut guard = RUNTIME.lock().await;
        if guard.is_none() {
            *guard = Some(Inner { backends: Vec::new(), capabilities });
            tracing::debug!(?capabilities, "runtime initialized");
        }
    }

    pub async fn register_backend(backend: Box<dyn Backend + Send>) -> Result<()> {
        let mut guard = RUNTIME.lock().await;
        let inner = guard.as_mut().ok_or_else(|| anyhow!("runtime not initialized"))?;
        inner.backends.push(backend);
        Ok(())
    }

    /// Applies `commands` to every registered backend in registration order.
    /// The mutex guarantees only one caller can be mid-application at a time.
    pub async fn apply_commands(commands: &[Command]) -> Result<()> {
        let mut guard = RUNTIME.lock().await;
        let inner = guard.as_mut().ok_or_else(|| anyhow!("runtime not initialized"))?;
        for backend in inner.backends.iter_mut() {
            backend.apply(commands)?;
        }
        Ok(())
    }

    /// Paints `node` with `engine` under `ctx` and applies the resulting
    /// command stream to every registered backend — the one-shot "just show
    /// me this tree" entry point, as distinct from `apply_commands` (which
    /// takes an already-painted stream) and the incremental path
    /// `LiveSession` drives through `apply_commands` itself.
    pub async fn commit(node: &Node, engine: &PaintEngine, ctx: &PaintContext) -> Result<()> {
        let commands = engine.paint(node, ctx);
        Self::apply_commands(&commands).await
    }

    /// Flushes every registered backend.
    pub async fn flush_all() -> Result<()> {
        let mut guard = RUNTIME.lock().await;
        let inner = guard.as_mut().ok_or_else(|| anyhow!("runtime not initialized"))?;
        for backend in inner.backends.iter_mut() {
            backend.flush()?;
        }
        Ok(())
    }

    pub async fn capabilities() -> Option<Capabilities> {
        RUNTIME.lock().await.as_ref().map(|inner| inner.capabilities)
    }

    /// Bumps the animation generation counter. Spinner tasks capture the
    /// generation at spawn time and compare against this before every frame;
    /// a mismatch means stop cooperatively rather than keep animating.
    pub fn stop_all_animations() {
        ANIMATION_GENERATION.fetch_add(1, Ordering::SeqCst);
    }

    pub fn animation_generation() -> u64 {
        ANIMATION_GENERATION.load(Ordering::SeqCst)
    }

    /// Test hook: drops the registered backends and capabilities, and bumps
    /// the animation generation so outstanding spinner tasks see a mismatch
    /// on their next check.
    pub async fn clear_all() {
        *RUNTIME.lock().await = None;
        ANIMATION_GENERATION.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn apply_commands_before_init_is_an_error() {
        Runtime::clear_all().await;
        let result = Runtime::apply_commands(&[]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn init_then_apply_succeeds_with_no_backends_registered() {
        Runtime::clear_all().await;
        Runtime::init(Capabilities::default()).await;
        let result = Runtime::apply_commands(&[]).await;
        assert!(result.is_ok());
        Runtime::clear_all().await;
    }

    #[tokio::test]
    async fn second_init_does_not_replace_the_first() {
        Runtime::clear_all().await;
        Runtime::init(Capabilities::new(true, true, true, 80, 24, true)).await;
        Runtime::init(Capabilities::default()).await;
        let caps = Runtime::capabilities().await.unwrap();
        assert!(caps.truecolor);
        Runtime::clear_all().await;
    }

    #[tokio::test]
    async fn commit_paints_and_applies_in_one_step() {
        use stage_node::{Address, NodeKind, Properties};
        use stage_render::AnsiBackend;

        Runtime::clear_all().await;
        Runtime::init(Capabilities::default()).await;
        Runtime::register_backend(Box::new(AnsiBackend::new(Vec::new(), Capabilities::default())))
            .await
            .unwrap();

        let node = Node::new(
            Address::new("text"),
            NodeKind::Text,
            Properties::new().with(stage_node::keys::TEXT, "hi".to_string()),
        );
        let engine = PaintEngine::default();
        let ctx = PaintContext::new(10, 1, true);
        let result = Runtime::commit(&node, &engine, &ctx).await;
        assert!(result.is_ok());
        Runtime::clear_all().await;
    }

    #[test]
    fn stop_all_animations_advances_the_generation() {
        let before = Runtime::animation_generation();
        Runtime::stop_all_animations();
        assert!(Runtime::animation_generation() > before);
    }
}
