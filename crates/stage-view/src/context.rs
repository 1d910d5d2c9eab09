//! Per-elaboration state threaded through a single `make_node` pass.

use crate::SessionOptions;
use stage_command::{Address, Capabilities, NoopTheme, Theme};
use std::collections::HashMap;
use std::sync::Arc;

/// Carries everything a view needs to deterministically assign its own
/// address and to know the terminal it's elaborating for.
///
/// Elaboration is single-threaded: a `RenderContext` is built once per
/// `make_node` pass, threaded by `&mut` reference, and discarded afterward.
pub struct RenderContext {
    width: u16,
    height: u16,
    capabilities: Capabilities,
    theme: Arc<dyn Theme>,
    frame: u64,
    options: SessionOptions,
    /// Top is the address of the innermost composite currently being
    /// elaborated; `None` means we are assigning a root-level address.
    parent_stack: Vec<Address>,
    /// Keyed by `(parent address as string, segment)`; counts how many
    /// times that pair has been requested so siblings sharing a segment
    /// name disambiguate via a `[n]` suffix. Persists for the lifetime of
    /// the context, independent of how `parent_stack` changes around it.
    sibling_counts: HashMap<(String, String), usize>,
}

impl RenderContext {
    pub fn new(
        width: u16,
        height: u16,
        capabilities: Capabilities,
        theme: Arc<dyn Theme>,
        options: SessionOptions,
    ) -> Self {
        Self {
            width,
            height,
            capabilities,
            theme,
            frame: 0,
            options,
            parent_stack: Vec::new(),
            sibling_counts: HashMap::new(),
        }
    }

    /// A context with no theme opinions and conservative capabilities,
    /// convenient for tests that only care about addressing/tree shape.
    pub fn for_test(width: u16, height: u16) -> Self {
        Self::new(
            width,
            height,
            Capabilities::default(),
            Arc::new(NoopTheme),
            SessionOptions::default(),
        )
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn theme(&self) -> &dyn Theme {
        self.theme.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Current parent's address, if elaborating inside a composite.
    pub fn current_parent(&self) -> Option<&Address> {
        self.parent_stack.last()
    }

    /// Reserves the next address for `segment` under the current parent.
    /// Siblings of the same segment within one parent get a `[n]` suffix.
    pub fn make_address(&mut self, segment: &str) -> Address {
        let parent_key = self
            .current_parent()
            .map(Address::as_str)
            .unwrap_or("")
            .to_string();
        let counter = self
            .sibling_counts
            .entry((parent_key, segment.to_string()))
            .or_insert(0);
        let n = *counter;
        *counter += 1;

        let base = match self.current_parent() {
            Some(parent) => parent.join(segment),
            None => Address::new(segment),
        };
        if n > 0 {
            Address::new(format!("{base}[{n}]"))
        } else {
            base
        }
    }

    /// Descends into `address`'s scope; must be paired with [`Self::pop`].
    pub fn push(&mut self, address: Address) {
        self.parent_stack.push(address);
    }

    pub fn pop(&mut self) {
        self.parent_stack.pop();
    }
}
