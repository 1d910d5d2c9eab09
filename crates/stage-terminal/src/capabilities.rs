//! Terminal capability probing: turns the ambient environment (env vars,
//! terminal size query, stdout TTY check) into the [`stage_command::Capabilities`]
//! bundle the rest of the engine treats as an opaque input.

use std::io::IsTerminal;

use stage_command::Capabilities;

fn env_truecolor() -> bool {
    std::env::var("COLORTERM")
        .map(|value| value == "truecolor" || value == "24bit")
        .unwrap_or(false)
}

fn env_xterm256() -> bool {
    std::env::var("TERM")
        .map(|value| value.contains("256color"))
        .unwrap_or(false)
}

fn env_unicode() -> bool {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            let lower = value.to_lowercase();
            if lower.contains("utf-8") || lower.contains("utf8") {
                return true;
            }
        }
    }
    false
}

/// Probes the process environment and stdout for a `Capabilities` bundle.
/// Detection runs once at startup; callers that need to react to a resize
/// should re-query `width`/`height` rather than call this repeatedly.
pub fn detect() -> Capabilities {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let is_tty = std::io::stdout().is_terminal();
    let truecolor = env_truecolor();
    let xterm256 = truecolor || env_xterm256();
    let unicode = env_unicode();
    Capabilities::new(truecolor, xterm256, unicode, width, height, is_tty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_falls_back_to_eighty_by_twenty_four_without_a_real_terminal() {
        // In a CI / headless sandbox crossterm::terminal::size() typically
        // errors (no controlling tty), which this exercises via the Err arm
        // of the `unwrap_or` above rather than asserting on the live
        // environment's actual size.
        let caps = detect();
        assert!(caps.width > 0);
        assert!(caps.height > 0);
    }
}
