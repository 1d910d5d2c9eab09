//! Color downgrading: resolving a [`Color`] to the best representation a
//! terminal's declared [`Capabilities`] actually admit. Semantic resolution
//! already happened in the paint engine; everything here operates on
//! already-concrete colors.

use stage_command::{Capabilities, Color};

/// The six cube levels xterm-256 uses for each of its 6×6×6 color channels.
const CUBE_LEVELS: [u16; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_cube_level(component: u8) -> (u8, u16) {
    let component = component as u16;
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| component.abs_diff(**level))
        .map(|(index, level)| (index as u8, *level))
        .expect("CUBE_LEVELS is non-empty")
}

fn squared_distance(a: (u16, u16, u16), b: (u16, u16, u16)) -> u32 {
    let dr = a.0.abs_diff(b.0) as u32;
    let dg = a.1.abs_diff(b.1) as u32;
    let db = a.2.abs_diff(b.2) as u32;
    dr * dr + dg * dg + db * db
}

/// Projects a truecolor value onto the nearest xterm-256 palette entry,
/// comparing the 6×6×6 cube candidate against the 24-step gray ramp
/// candidate and taking whichever is closer (ties favor the lower index).
pub fn rgb_to_xterm256(r: u8, g: u8, b: u8) -> u8 {
    let (ri, rl) = nearest_cube_level(r);
    let (gi, gl) = nearest_cube_level(g);
    let (bi, bl) = nearest_cube_level(b);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;
    let cube_distance = squared_distance((r as u16, g as u16, b as u16), (rl, gl, bl));

    let gray_level = ((r as u32 + g as u32 + b as u32) / 3) as u16;
    let (gray_index, gray_value) = if gray_level < 8 {
        (16u8, 0u16)
    } else if gray_level > 238 {
        (231u8, 255u16)
    } else {
        let step = (((gray_level - 8) / 10) as u16).min(23);
        (232 + step as u8, 8 + step * 10)
    };
    let gray_distance = squared_distance(
        (r as u16, g as u16, b as u16),
        (gray_value, gray_value, gray_value),
    );

    match cube_distance.cmp(&gray_distance) {
        std::cmp::Ordering::Less => cube_index,
        std::cmp::Ordering::Greater => gray_index,
        std::cmp::Ordering::Equal => cube_index.min(gray_index),
    }
}

/// Folds a truecolor value to the nearest of the 16 standard ANSI colors:
/// each channel is binarized around its midpoint to pick a dominant-channel
/// triplet (bit0=red, bit1=green, bit2=blue, matching SGR 30..37's order),
/// and the brightest input promotes the result into the bright (90..97) half.
pub fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> u8 {
    const THRESHOLD: u8 = 128;
    let bit = |c: u8| u8::from(c >= THRESHOLD);
    let base = bit(r) | (bit(g) << 1) | (bit(b) << 2);
    let bright = r.max(g).max(b) >= THRESHOLD;
    base + if bright { 8 } else { 0 }
}

/// Decomposes an xterm-256 index back to an approximate rgb triplet using a
/// flat 51-per-step decode (coarser than the cube's real, uneven levels)
/// before folding to 16 colors — matching how the palette was originally
/// downgraded rather than the more accurate cube constants.
pub fn xterm256_to_ansi16(index: u8) -> u8 {
    if index < 16 {
        return index;
    }
    if index >= 232 {
        let gray_level = 8 + (index - 232) as u16 * 10;
        return if gray_level < 128 { 0 } else { 15 };
    }
    let n = index - 16;
    let ri = n / 36;
    let gi = (n / 6) % 6;
    let bi = n % 6;
    rgb_to_ansi16(ri * 51, gi * 51, bi * 51)
}

/// Resolves `color` to the best representation `capabilities` admit.
/// `Indexed` colors pass through unchanged: they are always within the
/// 16-color range every terminal in scope is assumed to support.
pub fn downgrade(color: Color, capabilities: &Capabilities) -> Color {
    match color {
        Color::None => Color::None,
        Color::Indexed(i) => Color::Indexed(i),
        Color::Semantic(_) => Color::None,
        Color::Xterm256(n) => {
            if capabilities.truecolor || capabilities.xterm256 {
                Color::Xterm256(n)
            } else {
                Color::Indexed(xterm256_to_ansi16(n))
            }
        }
        Color::Rgb(r, g, b) => {
            if capabilities.truecolor {
                Color::Rgb(r, g, b)
            } else if capabilities.xterm256 {
                Color::Xterm256(rgb_to_xterm256(r, g, b))
            } else {
                Color::Indexed(rgb_to_ansi16(r, g, b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_downgrades_to_196_in_the_cube() {
        assert_eq!(rgb_to_xterm256(255, 0, 0), 196);
    }

    #[test]
    fn pure_red_downgrades_to_bright_red_in_16_color() {
        assert_eq!(rgb_to_ansi16(255, 0, 0), 9);
    }

    #[test]
    fn black_downgrades_to_ansi_black() {
        assert_eq!(rgb_to_ansi16(0, 0, 0), 0);
    }

    #[test]
    fn gray_prefers_the_ramp_over_the_cube() {
        // A mid gray sits closer to a gray-ramp step than to any cube corner.
        let index = rgb_to_xterm256(128, 128, 128);
        assert!(index >= 232);
    }

    #[test]
    fn capabilities_select_the_richest_representation_available() {
        let rgb = Color::Rgb(255, 0, 0);
        let truecolor = Capabilities::new(true, true, true, 80, 24, true);
        let xterm_only = Capabilities::new(false, true, true, 80, 24, true);
        let ansi16_only = Capabilities::new(false, false, true, 80, 24, true);
        assert_eq!(downgrade(rgb, &truecolor), Color::Rgb(255, 0, 0));
        assert_eq!(downgrade(rgb, &xterm_only), Color::Xterm256(196));
        assert_eq!(downgrade(rgb, &ansi16_only), Color::Indexed(9));
    }

    #[test]
    fn indexed_colors_always_pass_through() {
        let indexed = Color::Indexed(4);
        let ansi16_only = Capabilities::new(false, false, false, 80, 24, true);
        assert_eq!(downgrade(indexed, &ansi16_only), indexed);
    }
}
