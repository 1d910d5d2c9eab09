//! Backend that serializes commands to a structured, line-delimited JSON
//! event log — used for testing, log-replay, and non-TTY deployments.

use std::io::Write as _;

use serde_json::{json, Value};
use stage_command::{Address, Color, Command};

use crate::backend::Backend;
use crate::error::RenderError;

fn color_json(color: Color) -> Value {
    match color {
        Color::None => json!({"type": "none"}),
        Color::Indexed(i) => json!({"type": "indexed", "value": i}),
        Color::Xterm256(n) => json!({"type": "xterm256", "value": n}),
        Color::Rgb(r, g, b) => json!({"type": "rgb", "r": r, "g": g, "b": b}),
        Color::Semantic(tag) => json!({"type": "semantic", "value": format!("{tag:?}").to_lowercase()}),
    }
}

fn command_json(command: &Command) -> Value {
    match command {
        Command::Begin { address, kind, parent } => json!({
            "type": "begin",
            "nodeId": address.as_str(),
            "nodeKind": kind.as_str(),
            "parentId": parent.as_ref().map(Address::as_str),
        }),
        Command::SetText { address, text } => json!({
            "type": "set_text",
            "nodeId": address.as_str(),
            "text": text,
        }),
        Command::Frame { address, info } => json!({
            "type": "frame",
            "nodeId": address.as_str(),
            "frame": info.frame_index,
            "progress": info.progress,
        }),
        Command::End { address } => json!({
            "type": "end",
            "nodeId": address.as_str(),
        }),
        Command::Clear => json!({"type": "clear"}),
        Command::ClearLine => json!({"type": "clear_line"}),
        Command::ClearToEndOfLine => json!({"type": "clear_to_end_of_line"}),
        Command::MoveCursor { row, column } => json!({
            "type": "move_cursor",
            "row": row,
            "column": column,
        }),
        Command::SaveCursor => json!({"type": "save_cursor"}),
        Command::RestoreCursor => json!({"type": "restore_cursor"}),
        Command::HideCursor => json!({"type": "hide_cursor"}),
        Command::ShowCursor => json!({"type": "show_cursor"}),
        Command::SetForeground(color) => json!({
            "type": "set_foreground",
            "color": color_json(*color),
        }),
        Command::SetBackground(color) => json!({
            "type": "set_background",
            "color": color_json(*color),
        }),
        Command::SetStyle(style) => json!({
            "type": "set_style",
            "styles": style.names(),
        }),
        Command::Reset => json!({"type": "reset"}),
        Command::Write(text) => json!({"type": "write", "text": text}),
        Command::WriteLine(text) => json!({"type": "write_line", "text": text}),
        Command::Flush => json!({"type": "flush"}),
    }
}

/// Tracks `begin`/`end` nesting so a malformed command stream (an `end`
/// with no matching `begin`, or one that closes the wrong node) surfaces as
/// an error instead of silently desynchronizing the log.
pub struct EventBackend<W: std::io::Write> {
    writer: W,
    open_stack: Vec<Address>,
}

impl<W: std::io::Write> EventBackend<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, open_stack: Vec::new() }
    }

    pub fn node_count(&self) -> usize {
        self.open_stack.len()
    }
}

impl<W: std::io::Write> Backend for EventBackend<W> {
    fn apply(&mut self, commands: &[Command]) -> Result<(), RenderError> {
        let mut events = Vec::with_capacity(commands.len());
        for command in commands {
            match command {
                Command::Begin { address, .. } => self.open_stack.push(address.clone()),
                Command::End { address } => match self.open_stack.last() {
                    Some(top) if top == address => {
                        self.open_stack.pop();
                    }
                    Some(_) => {
                        return Err(RenderError::InvalidState(format!(
                            "end({address}) does not match open node {}",
                            self.open_stack.last().expect("checked Some above")
                        )))
                    }
                    None => {
                        return Err(RenderError::InvalidState(format!("end({address}) with no matching begin")))
                    }
                },
                Command::Clear => self.open_stack.clear(),
                _ => {}
            }
            events.push(command_json(command));
        }

        let envelope = json!({"events": events, "nodeCount": self.open_stack.len()});
        let line = serde_json::to_string(&envelope)
            .map_err(|err| RenderError::WriteFailed(err.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|err| RenderError::WriteFailed(err.to_string()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.writer.flush().map_err(|err| RenderError::WriteFailed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_command::NodeKind;

    fn backend() -> EventBackend<Vec<u8>> {
        EventBackend::new(Vec::new())
    }

    #[test]
    fn well_formed_begin_end_pair_balances_the_stack() {
        let mut backend = backend();
        let address = Address::new("root.text");
        backend
            .apply(&[
                Command::Begin { address: address.clone(), kind: NodeKind::Text, parent: None },
                Command::SetText { address: address.clone(), text: "hi".to_string() },
                Command::End { address },
            ])
            .unwrap();
        assert_eq!(backend.node_count(), 0);
    }

    #[test]
    fn end_with_no_matching_begin_is_an_error() {
        let mut backend = backend();
        let result = backend.apply(&[Command::End { address: Address::new("root.text") }]);
        assert!(result.is_err());
    }

    #[test]
    fn clear_empties_the_open_stack() {
        let mut backend = backend();
        let address = Address::new("root.text");
        backend
            .apply(&[Command::Begin { address, kind: NodeKind::Text, parent: None }, Command::Clear])
            .unwrap();
        assert_eq!(backend.node_count(), 0);
    }

    #[test]
    fn envelope_reports_current_depth() {
        let mut backend = backend();
        let address = Address::new("root.text");
        backend
            .apply(&[Command::Begin { address, kind: NodeKind::Text, parent: None }])
            .unwrap();
        let output = String::from_utf8(backend.writer.clone()).unwrap();
        let parsed: Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(parsed["nodeCount"], 1);
        assert_eq!(parsed["events"][0]["type"], "begin");
    }
}
