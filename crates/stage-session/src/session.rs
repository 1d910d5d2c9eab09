//! Live session: a registry of independently-addressed, independently
//! updatable screen regions, each identified by a caller-supplied string id.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use stage_command::{Address, Capabilities, Command, NodeKind, Theme};
use stage_node::Node;
use stage_paint::{PaintContext, PaintEngine};
use stage_reconcile::{reconcile, Move, ReconciliationResult, Update};
use stage_terminal::Runtime;
use stage_view::{RenderContext, SessionOptions, View};

/// One tracked region: the view that produced it (retained so `render()`
/// can re-elaborate it without a fresh `update()` call), the last node tree
/// painted for it (the reconciliation baseline), its own address, and its
/// screen position.
struct LiveElement {
    address: Address,
    last_node: Option<Node>,
    position: (u16, u16),
    view: Box<dyn View>,
}

struct SessionState {
    elements: HashMap<String, LiveElement>,
    width: u16,
    height: u16,
    capabilities: Capabilities,
    theme: Arc<dyn Theme>,
    options: SessionOptions,
}

/// Owns a mapping from caller id to live screen region. Every method takes
/// the same internal lock, so concurrent callers serialize against one
/// another the way a single-threaded actor would, even though the session
/// itself is `Send + Sync` and freely shared.
pub struct LiveSession {
    state: tokio::sync::Mutex<SessionState>,
    paint: PaintEngine,
}

impl LiveSession {
    pub fn new(width: u16, height: u16, capabilities: Capabilities, theme: Arc<dyn Theme>, options: SessionOptions) -> Self {
        Self {
            state: tokio::sync::Mutex::new(SessionState {
                elements: HashMap::new(),
                width,
                height,
                capabilities,
                theme: theme.clone(),
                options,
            }),
            paint: PaintEngine::new(theme),
        }
    }

    fn paint_ctx(state: &SessionState) -> PaintContext {
        PaintContext::new(state.width, state.height, state.capabilities.unicode)
    }

    fn elaborate(state: &SessionState, view: &dyn View) -> Node {
        let mut ctx = RenderContext::new(state.width, state.height, state.capabilities, state.theme.clone(), state.options.clone());
        view.make_node(&mut ctx)
    }

    /// Elaborates `view`, diffs it against the prior node tree for `id` (if
    /// any), and applies the resulting commands through the process-wide
    /// runtime. Returns the element's address (freshly assigned on first
    /// use, stable across subsequent updates).
    pub async fn update(&self, id: impl Into<String>, position: Option<(u16, u16)>, view: impl View + 'static) -> Result<Address> {
        let id = id.into();
        let mut state = self.state.lock().await;
        let new_node = Self::elaborate(&state, &view);
        let address = new_node.address.clone();

        let resolved_position = match position {
            Some(pos) => pos,
            None => match state.elements.get(&id) {
                Some(existing) => existing.position,
                None => (0, state.elements.len() as u16 * 3),
            },
        };

        let commands = match state.elements.get(&id) {
            Some(existing) => {
                let result = reconcile(existing.last_node.as_ref(), &new_node);
                Self::synthesize_commands(&result, &new_node, &self.paint, &Self::paint_ctx(&state), resolved_position, state.width)
            }
            None => {
                let mut commands = vec![Command::Begin { address: address.clone(), kind: new_node.kind, parent: new_node.parent_address.clone() }];
                commands.extend(self.paint.paint_at(&new_node, resolved_position.0, resolved_position.1, state.width, &Self::paint_ctx(&state)));
                commands
            }
        };

        state.elements.insert(
            id,
            LiveElement { address: address.clone(), last_node: Some(new_node), position: resolved_position, view: Box::new(view) },
        );
        drop(state);

        if !commands.is_empty() {
            Runtime::apply_commands(&commands).await?;
        }
        Ok(address)
    }

    /// Emits `end(address)` for `id`'s region. If other regions remain,
    /// redraws all of them (clear + repaint sorted by position) so nothing
    /// is left occupying the removed region's former space.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let Some(removed) = state.elements.remove(id) else {
            return Ok(());
        };
        let mut commands = vec![Command::End { address: removed.address }];
        if !state.elements.is_empty() {
            commands.push(Command::Clear);
            commands.extend(Self::repaint_all(&state, &self.paint));
        }
        drop(state);
        Runtime::apply_commands(&commands).await
    }

    /// Empties the element map and emits a bare `clear`.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.elements.clear();
        drop(state);
        Runtime::apply_commands(&[Command::Clear]).await
    }

    /// Updates `id`'s stored position and redraws every tracked region.
    pub async fn move_element(&self, id: &str, position: (u16, u16)) -> Result<()> {
        let mut state = self.state.lock().await;
        let Some(element) = state.elements.get_mut(id) else {
            return Err(anyhow!("no such live element: {id}"));
        };
        element.position = position;
        let mut commands = vec![Command::Clear];
        commands.extend(Self::repaint_all(&state, &self.paint));
        drop(state);
        Runtime::apply_commands(&commands).await
    }

    /// Forces a one-shot full repaint of every tracked element, re-elaborating
    /// each one's stored view under the session's current width/height
    /// without touching any stored node — useful after an external resize,
    /// where the next real `update()` should still diff against what was on
    /// screen before the resize.
    pub async fn render(&self) -> Result<()> {
        let state = self.state.lock().await;
        if state.elements.is_empty() {
            return Ok(());
        }
        let mut commands = vec![Command::Clear];
        let mut entries: Vec<&LiveElement> = state.elements.values().collect();
        entries.sort_by_key(|e| e.position);
        for element in entries {
            let node = Self::elaborate(&state, element.view.as_ref());
            commands.push(Command::Begin { address: node.address.clone(), kind: node.kind, parent: node.parent_address.clone() });
            commands.extend(self.paint.paint_at(&node, element.position.0, element.position.1, state.width, &Self::paint_ctx(&state)));
        }
        drop(state);
        tracing::debug!(count = commands.len(), "render: full repaint of every tracked element");
        Runtime::apply_commands(&commands).await
    }

    pub async fn get_view(&self, id: &str) -> Option<Node> {
        self.state.lock().await.elements.get(id).and_then(|e| e.last_node.clone())
    }

    pub async fn get_position(&self, id: &str) -> Option<(u16, u16)> {
        self.state.lock().await.elements.get(id).map(|e| e.position)
    }

    pub async fn get_all_ids(&self) -> Vec<String> {
        self.state.lock().await.elements.keys().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.state.lock().await.elements.len()
    }

    pub(crate) async fn address_of(&self, id: &str) -> Option<Address> {
        self.state.lock().await.elements.get(id).map(|e| e.address.clone())
    }

    /// Starts a determinate progress region at `id`, seeding it at
    /// `current=0`, and returns a [`crate::ProgressHandle`] the caller drives
    /// with `update`/`finish`.
    pub async fn progress(
        self: &Arc<Self>,
        id: impl Into<String>,
        position: Option<(u16, u16)>,
        total: i64,
        label: impl Into<String>,
    ) -> Result<crate::ProgressHandle> {
        let label = label.into();
        let view = stage_builtins::Progress::new(total, 0).label(label.clone());
        let address = self.update(id, position, view).await?;
        Ok(crate::ProgressHandle::new(address, total, label))
    }

    /// Starts an indeterminate spinner region at `id` and spawns its
    /// animation task, returning a [`crate::SpinnerHandle`] the caller stops
    /// with `finish` (or simply drops).
    pub async fn spinner(
        self: &Arc<Self>,
        id: impl Into<String>,
        position: Option<(u16, u16)>,
        frames: Vec<String>,
        interval: std::time::Duration,
        label: impl Into<String>,
    ) -> Result<crate::SpinnerHandle> {
        let id = id.into();
        let label = label.into();
        let view = stage_builtins::Spinner::new(frames.clone(), interval.as_millis() as i64).label(label.clone());
        let address = self.update(id.clone(), position, view).await?;
        Ok(crate::SpinnerHandle::spawn(self.clone(), id, address, frames, interval))
    }

    fn repaint_all(state: &SessionState, paint: &PaintEngine) -> Vec<Command> {
        let mut entries: Vec<&LiveElement> = state.elements.values().collect();
        entries.sort_by_key(|e| e.position);
        let ctx = Self::paint_ctx(state);
        let mut commands = Vec::new();
        for element in entries {
            if let Some(node) = &element.last_node {
                commands.push(Command::Begin { address: node.address.clone(), kind: node.kind, parent: node.parent_address.clone() });
                commands.extend(paint.paint_at(node, element.position.0, element.position.1, state.width, &ctx));
            }
        }
        commands
    }

    /// Translates one reconciliation result into the incremental command
    /// stream §4.7 specifies: deletions close their region, moves close and
    /// reopen theirs at the new address, updates clear their line and
    /// repaint, insertions open and paint for the first time. All four
    /// categories anchor their full-paint at the element's own screen
    /// position — nested per-descendant row tracking would require
    /// duplicating the paint engine's layout pass, which the reconciler
    /// deliberately doesn't do.
    fn synthesize_commands(
        result: &ReconciliationResult,
        new_tree: &Node,
        paint: &PaintEngine,
        ctx: &PaintContext,
        position: (u16, u16),
        width: u16,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        for address in &result.deletions {
            commands.push(Command::End { address: address.clone() });
        }

        for Move { from, to } in &result.moves {
            commands.push(Command::End { address: from.clone() });
            if let Some(node) = find_node(new_tree, to) {
                commands.push(Command::Begin { address: to.clone(), kind: node.kind, parent: node.parent_address.clone() });
                commands.extend(paint.paint_at(node, position.0, position.1, width, ctx));
            }
        }

        for Update { node, .. } in &result.updates {
            commands.push(Command::ClearLine);
            commands.extend(paint.paint_at(node, position.0, position.1, width, ctx));
        }

        for node in &result.insertions {
            commands.push(Command::Begin { address: node.address.clone(), kind: node.kind, parent: node.parent_address.clone() });
            commands.extend(paint.paint_at(node, position.0, position.1, width, ctx));
        }

        commands
    }
}

fn find_node<'a>(node: &'a Node, address: &Address) -> Option<&'a Node> {
    if &node.address == address {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, address))
}
