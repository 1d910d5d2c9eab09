//! End-to-end scenarios spanning elaboration, paint, and both backends.

use std::io;
use std::sync::{Arc, Mutex};

use stage_builtins::{Panel, Text};
use stage_command::{Capabilities, Color, Command, NoopTheme};
use stage_paint::{PaintContext, PaintEngine};
use stage_render::{AnsiBackend, Backend, EventBackend};
use stage_view::{RenderContext, View};

#[test]
fn plain_text_begins_with_a_cursor_move_and_its_content() {
    let mut ctx = RenderContext::for_test(80, 24);
    let node = Text::new("hi").make_node(&mut ctx);
    let engine = PaintEngine::new(Arc::new(NoopTheme));
    let paint_ctx = PaintContext::new(80, 24, true);
    let commands = engine.paint(&node, &paint_ctx);

    assert_eq!(commands[0], Command::MoveCursor { row: 0, column: 0 });
    assert_eq!(commands[1], Command::Write("hi".to_string()));
}

#[test]
fn plain_text_event_log_is_a_single_begin_settext_end() {
    let mut ctx = RenderContext::for_test(80, 24);
    let node = Text::new("hi").make_node(&mut ctx);
    let begin = Command::Begin { address: node.address.clone(), kind: node.kind, parent: None };
    let set_text = Command::SetText { address: node.address.clone(), text: "hi".to_string() };
    let end = Command::End { address: node.address.clone() };

    let mut backend = EventBackend::new(Vec::new());
    backend.apply(&[begin, set_text, end]).unwrap();
    assert_eq!(backend.node_count(), 0);
}

#[test]
fn panel_with_title_width_twenty_matches_the_documented_border() {
    let mut ctx = RenderContext::for_test(20, 5);
    let panel = Panel::new(Text::new("x")).title("T");
    let node = panel.make_node(&mut ctx);
    let engine = PaintEngine::new(Arc::new(NoopTheme));
    let paint_ctx = PaintContext::new(20, 5, true);
    let commands = engine.paint(&node, &paint_ctx);

    let mut backend = AnsiBackend::new(Vec::new(), Capabilities::new(true, true, true, 20, 5, true));
    backend.apply(&commands).unwrap();
    backend.flush().unwrap();
    // move(0,0)+top border, then the content row's three segments, then the
    // bottom border: reconstructing exact terminal output from cursor moves
    // would need a screen buffer, so this just asserts the command shape.
    assert!(commands.iter().any(|c| matches!(c, Command::Write(text) if text.contains("┌─ T "))));
    assert!(commands.iter().any(|c| matches!(c, Command::Write(text) if text.starts_with("└"))));
}

#[test]
fn rgb_downgrade_to_xterm256_matches_the_known_cube_index() {
    let downgraded = stage_render::downgrade(Color::Rgb(255, 0, 0), &Capabilities::new(false, true, true, 80, 24, true));
    assert_eq!(downgraded, Color::Xterm256(196));
}

#[test]
fn rgb_downgrade_to_sixteen_colors_matches_bright_red() {
    let downgraded = stage_render::downgrade(Color::Rgb(255, 0, 0), &Capabilities::new(false, false, true, 80, 24, true));
    assert_eq!(downgraded, Color::Indexed(9));
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn move_cursor_emits_the_documented_csi_sequence() {
    let sink = SharedBuffer::default();
    let mut backend = AnsiBackend::new(sink.clone(), Capabilities::default());
    backend.apply(&[Command::MoveCursor { row: 2, column: 5 }]).unwrap();
    backend.flush().unwrap();
    assert_eq!(sink.0.lock().unwrap().as_slice(), b"\x1b[3;6H");
}
