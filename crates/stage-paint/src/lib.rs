//! Turns a finalized node tree into the screen commands a backend applies.
//!
//! Painting is pure given its theme: the same node tree always yields the
//! same command sequence. Semantic colors are resolved to concrete ones
//! here, before a backend ever sees them; capability-driven downgrading
//! (truecolor to a 256-color cube, say) happens downstream in the backend,
//! since that depends on what the connected terminal can actually display
//! rather than on anything the view layer decided.

mod engine;
mod measure;
mod theme;

pub use engine::{PaintContext, PaintEngine};
pub use measure::{natural_size, Size};
pub use theme::DefaultTheme;
