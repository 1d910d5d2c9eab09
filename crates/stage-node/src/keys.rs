//! Well-known property keys shared between view builders and the paint
//! engine. Centralizing them here (rather than letting each leaf view crate
//! invent its own strings) keeps producer and consumer in sync by
//! construction.

use crate::PropertyKey;
use stage_command::Color;

pub const TEXT: PropertyKey<String> = PropertyKey::new("text");
pub const TITLE: PropertyKey<String> = PropertyKey::new("title");
pub const LABEL: PropertyKey<String> = PropertyKey::new("label");
pub const VALUE: PropertyKey<String> = PropertyKey::new("value");
pub const PLACEHOLDER: PropertyKey<String> = PropertyKey::new("placeholder");

pub const FOREGROUND: PropertyKey<Color> = PropertyKey::new("foreground");
pub const BACKGROUND: PropertyKey<Color> = PropertyKey::new("background");
/// `TextStyle::bits()` widened to `i64`, the container's integer variant.
pub const STYLE_BITS: PropertyKey<i64> = PropertyKey::new("style");

pub const WIDTH: PropertyKey<i64> = PropertyKey::new("width");
pub const HEIGHT: PropertyKey<i64> = PropertyKey::new("height");
pub const PADDING: PropertyKey<i64> = PropertyKey::new("padding");
pub const SPACING: PropertyKey<i64> = PropertyKey::new("spacing");
pub const MIN_LENGTH: PropertyKey<i64> = PropertyKey::new("min_length");
pub const BORDERED: PropertyKey<bool> = PropertyKey::new("bordered");

pub const OPTIONS: PropertyKey<Vec<String>> = PropertyKey::new("options");
pub const SELECTED_INDEX: PropertyKey<i64> = PropertyKey::new("selected_index");

pub const FRAMES: PropertyKey<Vec<String>> = PropertyKey::new("frames");
pub const INTERVAL_MS: PropertyKey<i64> = PropertyKey::new("interval_ms");

pub const TOTAL: PropertyKey<i64> = PropertyKey::new("total");
pub const CURRENT: PropertyKey<i64> = PropertyKey::new("current");
