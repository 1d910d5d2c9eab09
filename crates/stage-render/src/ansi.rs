//! Backend that serializes commands to ECMA-48 CSI escape sequences against
//! a shadow model of terminal state, so it never re-emits an escape the
//! terminal is already in.

use std::io::Write as _;

use stage_command::{Capabilities, Color, Command, TextStyle};

use crate::backend::Backend;
use crate::downgrade::downgrade;
use crate::error::RenderError;

const ESC: char = '\u{1b}';
const DEFAULT_FLUSH_THRESHOLD: usize = 4 * 1024;

fn style_codes(style: TextStyle) -> Vec<&'static str> {
    let table: &[(TextStyle, &str)] = &[
        (TextStyle::BOLD, "1"),
        (TextStyle::DIM, "2"),
        (TextStyle::ITALIC, "3"),
        (TextStyle::UNDERLINE, "4"),
        (TextStyle::BLINK, "5"),
        (TextStyle::REVERSE, "7"),
        (TextStyle::HIDDEN, "8"),
        (TextStyle::STRIKETHROUGH, "9"),
    ];
    table.iter().filter(|(flag, _)| style.contains(*flag)).map(|(_, code)| *code).collect()
}

fn color_codes(color: Color, background: bool) -> Vec<String> {
    match color {
        Color::None => vec![(if background { "49" } else { "39" }).to_string()],
        Color::Semantic(_) => vec![(if background { "49" } else { "39" }).to_string()],
        Color::Indexed(i) => {
            let base: u16 = if i < 8 {
                if background { 40 } else { 30 }
            } else if background {
                100
            } else {
                90
            };
            let offset: u16 = if i < 8 { i as u16 } else { (i - 8) as u16 };
            vec![(base + offset).to_string()]
        }
        Color::Xterm256(n) => vec![format!("{};5;{}", if background { 48 } else { 38 }, n)],
        Color::Rgb(r, g, b) => vec![format!("{};2;{};{};{}", if background { 48 } else { 38 }, r, g, b)],
    }
}

/// The backend's in-memory model of what the real terminal currently shows,
/// kept in sync with every command applied so escapes are only emitted when
/// they would actually change something.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShadowState {
    foreground: Color,
    background: Color,
    style: TextStyle,
    cursor_row: u16,
    cursor_column: u16,
    saved_row: u16,
    saved_column: u16,
}

impl Default for ShadowState {
    fn default() -> Self {
        Self {
            foreground: Color::None,
            background: Color::None,
            style: TextStyle::empty(),
            cursor_row: 0,
            cursor_column: 0,
            saved_row: 0,
            saved_column: 0,
        }
    }
}

pub struct AnsiBackend<W: std::io::Write> {
    writer: W,
    capabilities: Capabilities,
    state: ShadowState,
    buffer: String,
    flush_threshold: usize,
}

impl<W: std::io::Write> AnsiBackend<W> {
    pub fn new(writer: W, capabilities: Capabilities) -> Self {
        Self {
            writer,
            capabilities,
            state: ShadowState::default(),
            buffer: String::new(),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }

    pub fn with_flush_threshold(mut self, threshold: usize) -> Self {
        self.flush_threshold = threshold;
        self
    }

    #[cfg(test)]
    pub(crate) fn shadow_is_default(&self) -> bool {
        self.state == ShadowState::default()
    }

    fn emit(&mut self, s: &str) {
        self.buffer.push_str(s);
        if self.buffer.len() >= self.flush_threshold {
            self.drain();
        }
    }

    fn drain(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if let Err(err) = self.writer.write_all(self.buffer.as_bytes()) {
            tracing::warn!(error = %err, "ansi backend write failed");
        }
        self.buffer.clear();
    }

    fn set_foreground(&mut self, color: Color) {
        let color = downgrade(color, &self.capabilities);
        if color == self.state.foreground {
            return;
        }
        for code in color_codes(color, false) {
            self.emit(&format!("{ESC}[{code}m"));
        }
        self.state.foreground = color;
    }

    fn set_background(&mut self, color: Color) {
        let color = downgrade(color, &self.capabilities);
        if color == self.state.background {
            return;
        }
        for code in color_codes(color, true) {
            self.emit(&format!("{ESC}[{code}m"));
        }
        self.state.background = color;
    }

    /// Setting a new style, when the current one is non-empty, first emits a
    /// full SGR reset and re-applies the active colors before the new
    /// attributes — there is no per-attribute "off" code for most of these.
    fn set_style(&mut self, style: TextStyle) {
        if style == self.state.style {
            return;
        }
        if !self.state.style.is_empty() {
            self.emit(&format!("{ESC}[0m"));
            let foreground = self.state.foreground;
            let background = self.state.background;
            self.state.foreground = Color::None;
            self.state.background = Color::None;
            self.set_foreground(foreground);
            self.set_background(background);
        }
        for code in style_codes(style) {
            self.emit(&format!("{ESC}[{code}m"));
        }
        self.state.style = style;
    }

    fn apply_one(&mut self, command: &Command) {
        match command {
            Command::Begin { .. } | Command::SetText { .. } | Command::Frame { .. } | Command::End { .. } => {}
            Command::Clear => self.emit(&format!("{ESC}[2J")),
            Command::ClearLine => self.emit(&format!("{ESC}[2K")),
            Command::ClearToEndOfLine => self.emit(&format!("{ESC}[K")),
            Command::MoveCursor { row, column } => {
                self.emit(&format!("{ESC}[{};{}H", row + 1, column + 1));
                self.state.cursor_row = *row;
                self.state.cursor_column = *column;
            }
            Command::SaveCursor => {
                self.emit(&format!("{ESC}7"));
                self.state.saved_row = self.state.cursor_row;
                self.state.saved_column = self.state.cursor_column;
            }
            Command::RestoreCursor => {
                self.emit(&format!("{ESC}8"));
                self.state.cursor_row = self.state.saved_row;
                self.state.cursor_column = self.state.saved_column;
            }
            Command::HideCursor => self.emit(&format!("{ESC}[?25l")),
            Command::ShowCursor => self.emit(&format!("{ESC}[?25h")),
            Command::SetForeground(color) => self.set_foreground(*color),
            Command::SetBackground(color) => self.set_background(*color),
            Command::SetStyle(style) => self.set_style(*style),
            Command::Reset => {
                self.emit(&format!("{ESC}[0m"));
                self.emit(&format!("{ESC}[2J"));
                self.emit(&format!("{ESC}[1;1H"));
                self.emit(&format!("{ESC}[?25h"));
                self.state = ShadowState::default();
                self.drain();
            }
            Command::Write(text) => {
                self.emit(text);
                self.state.cursor_column += text.chars().count() as u16;
            }
            Command::WriteLine(text) => {
                self.emit(text);
                self.emit("\r\n");
                self.state.cursor_row += 1;
                self.state.cursor_column = 0;
            }
            Command::Flush => self.drain(),
        }
    }
}

impl<W: std::io::Write> Backend for AnsiBackend<W> {
    fn apply(&mut self, commands: &[Command]) -> Result<(), RenderError> {
        for command in commands {
            self.apply_one(command);
        }
        if self.buffer.len() >= self.flush_threshold {
            self.drain();
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.drain();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> AnsiBackend<Vec<u8>> {
        AnsiBackend::new(Vec::new(), Capabilities::default())
    }

    #[test]
    fn move_cursor_is_one_based_in_the_wire_format() {
        let mut backend = backend();
        backend.apply(&[Command::MoveCursor { row: 2, column: 5 }]).unwrap();
        backend.flush().unwrap();
        assert_eq!(backend.writer, b"\x1b[3;6H");
    }

    #[test]
    fn clear_screen_and_lines_use_the_documented_sequences() {
        let mut backend = backend();
        backend.apply(&[Command::Clear, Command::ClearLine, Command::ClearToEndOfLine]).unwrap();
        backend.flush().unwrap();
        assert_eq!(backend.writer, b"\x1b[2J\x1b[2K\x1b[K");
    }

    #[test]
    fn structural_commands_are_ignored() {
        let mut backend = backend();
        backend
            .apply(&[Command::Begin {
                address: stage_command::Address::new("root"),
                kind: stage_command::NodeKind::Text,
                parent: None,
            }])
            .unwrap();
        backend.flush().unwrap();
        assert!(backend.writer.is_empty());
    }

    #[test]
    fn reset_drains_and_restores_default_shadow_state() {
        let mut backend = backend();
        backend
            .apply(&[Command::SetForeground(Color::Indexed(1)), Command::Write("x".to_string()), Command::Reset])
            .unwrap();
        assert!(backend.writer.starts_with(b"\x1b[31mx"));
        assert!(backend.writer.ends_with(b"\x1b[?25h"));
        assert!(backend.shadow_is_default());
    }

    #[test]
    fn repeated_foreground_does_not_re_emit_the_escape() {
        let mut backend = backend();
        backend
            .apply(&[
                Command::SetForeground(Color::Indexed(2)),
                Command::Write("a".to_string()),
                Command::SetForeground(Color::Indexed(2)),
                Command::Write("b".to_string()),
            ])
            .unwrap();
        backend.flush().unwrap();
        assert_eq!(backend.writer, b"\x1b[32mab");
    }
}
