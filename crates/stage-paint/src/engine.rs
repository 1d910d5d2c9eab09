//! Translates a finalized node tree into the screen/cursor/style/content
//! commands a backend applies. Painting never touches a backend directly —
//! it only produces [`Command`]s — and it resolves semantic colors through
//! its theme before a backend ever sees them; capability-driven downgrading
//! (truecolor to indexed, say) is the backend's job, not this one's.

use std::collections::BTreeSet;
use std::sync::Arc;

use stage_command::{Color, Command, SemanticColor, TextStyle, Theme};
use stage_node::{keys, Node, NodeKind};
use unicode_width::UnicodeWidthStr;

use crate::measure::natural_size;
use crate::theme::DefaultTheme;

/// The ambient state a paint pass needs beyond the node tree itself.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext {
    pub width: u16,
    pub height: u16,
    /// Whether box-drawing characters may be used; when false, borders and
    /// dividers fall back to plain ASCII.
    pub unicode: bool,
}

impl PaintContext {
    pub fn new(width: u16, height: u16, unicode: bool) -> Self {
        Self { width, height, unicode }
    }
}

pub struct PaintEngine {
    theme: Arc<dyn Theme>,
}

impl Default for PaintEngine {
    fn default() -> Self {
        Self::new(Arc::new(DefaultTheme))
    }
}

impl PaintEngine {
    pub fn new(theme: Arc<dyn Theme>) -> Self {
        Self { theme }
    }

    /// Paints `node` into the full width of `ctx`, starting at the origin.
    pub fn paint(&self, node: &Node, ctx: &PaintContext) -> Vec<Command> {
        self.paint_at(node, 0, 0, ctx.width, ctx)
    }

    fn resolve(&self, color: Color) -> Color {
        match color {
            Color::Semantic(tag) => self.theme.resolve(tag),
            other => other,
        }
    }

    /// Paints `node` anchored at an arbitrary `(row, col)` rather than the
    /// origin — the live session uses this to repaint a single tracked
    /// element at its own position without disturbing the rest of the
    /// screen.
    pub fn paint_at(&self, node: &Node, row: u16, col: u16, width: u16, ctx: &PaintContext) -> Vec<Command> {
        match node.kind {
            NodeKind::Text => self.paint_text(node, row, col, width),
            NodeKind::Divider => self.paint_divider(row, col, width, ctx),
            NodeKind::Spacer => Vec::new(),
            NodeKind::Badge => self.paint_badge(node, row, col, width),
            NodeKind::Note => self.paint_note(node, row, col, width),
            NodeKind::Code => self.paint_code(node, row, col, width),
            NodeKind::TextField => self.paint_text_field(node, row, col, width),
            NodeKind::Button => self.paint_button(node, row, col, width),
            NodeKind::Selector => self.paint_selector(node, row, col, width),
            NodeKind::Progress => self.paint_progress(node, row, col, width),
            NodeKind::Spinner => self.paint_spinner(node, row, col, width),
            NodeKind::Panel => self.paint_panel(node, row, col, width, ctx),
            NodeKind::HStack => self.paint_hstack(node, row, col, width, ctx),
            NodeKind::VStack => self.paint_vstack(node, row, col, width, ctx, ctx.height.saturating_sub(row)),
            NodeKind::Group => Vec::new(),
        }
    }

    fn write_plain(&self, row: u16, col: u16, text: &str, width: u16) -> Vec<Command> {
        vec![
            Command::MoveCursor { row, column: col },
            Command::Write(truncate_to_width(text, width)),
        ]
    }

    fn write_styled(&self, row: u16, col: u16, text: &str, width: u16, foreground: Color, style: TextStyle) -> Vec<Command> {
        let mut commands = vec![Command::MoveCursor { row, column: col }];
        let resolved = self.resolve(foreground);
        let mut opened = false;
        if !resolved.is_none() {
            commands.push(Command::SetForeground(resolved));
            opened = true;
        }
        if !style.is_empty() {
            commands.push(Command::SetStyle(style));
            opened = true;
        }
        commands.push(Command::Write(truncate_to_width(text, width)));
        if opened {
            commands.push(Command::Reset);
        }
        commands
    }

    fn paint_text(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let content: String = node.properties.get(keys::TEXT).unwrap_or_default();
        let foreground: Color = node.properties.get(keys::FOREGROUND).unwrap_or(Color::None);
        let style_bits: i64 = node.properties.get(keys::STYLE_BITS).unwrap_or(0);
        let style = TextStyle::from_bits_truncate(style_bits as u8);
        self.write_styled(row, col, &content, width, foreground, style)
    }

    fn paint_divider(&self, row: u16, col: u16, width: u16, ctx: &PaintContext) -> Vec<Command> {
        let glyph = if ctx.unicode { '─' } else { '-' };
        let line: String = std::iter::repeat(glyph).take(width as usize).collect();
        self.write_plain(row, col, &line, width)
    }

    fn paint_badge(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
        let foreground: Color = node.properties.get(keys::FOREGROUND).unwrap_or(Color::None);
        self.write_styled(row, col, &label, width, foreground, TextStyle::empty())
    }

    fn paint_note(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let content: String = node.properties.get(keys::TEXT).unwrap_or_default();
        self.write_styled(row, col, &content, width, Color::Semantic(SemanticColor::Muted), TextStyle::empty())
    }

    fn paint_code(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let content: String = node.properties.get(keys::TEXT).unwrap_or_default();
        self.write_plain(row, col, &content, width)
    }

    fn paint_text_field(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let value: String = node.properties.get(keys::VALUE).unwrap_or_default();
        let placeholder: String = node.properties.get(keys::PLACEHOLDER).unwrap_or_default();
        if value.is_empty() {
            self.write_styled(row, col, &placeholder, width, Color::Semantic(SemanticColor::Muted), TextStyle::empty())
        } else {
            self.write_plain(row, col, &value, width)
        }
    }

    fn paint_button(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
        let rendered = format!("[ {} ]", label);
        self.write_plain(row, col, &rendered, width)
    }

    fn paint_selector(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let options: Vec<String> = node.properties.get(keys::OPTIONS).unwrap_or_default();
        let selected: i64 = node.properties.get(keys::SELECTED_INDEX).unwrap_or(-1);
        let mut commands = Vec::new();
        for (index, option) in options.iter().enumerate() {
            let prefix = if index as i64 == selected { "> " } else { "  " };
            let line = format!("{prefix}{option}");
            commands.extend(self.write_plain(row + index as u16, col, &line, width));
        }
        commands
    }

    fn paint_progress(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let total: i64 = node.properties.get(keys::TOTAL).unwrap_or(0);
        let current: i64 = node.properties.get(keys::CURRENT).unwrap_or(0);
        let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
        let suffix = if label.is_empty() {
            String::new()
        } else {
            format!(" {label}")
        };
        let bar_width = width.saturating_sub(2).max(1) as usize;
        let fraction = if total > 0 { (current as f64 / total as f64).clamp(0.0, 1.0) } else { 0.0 };
        let filled = (bar_width as f64 * fraction).round() as usize;
        let bar: String = std::iter::repeat('#')
            .take(filled)
            .chain(std::iter::repeat(' ').take(bar_width - filled))
            .collect();
        let line = format!("[{bar}]{suffix}");
        self.write_plain(row, col, &line, width)
    }

    fn paint_spinner(&self, node: &Node, row: u16, col: u16, width: u16) -> Vec<Command> {
        let frames: Vec<String> = node.properties.get(keys::FRAMES).unwrap_or_default();
        let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
        let glyph = frames.first().cloned().unwrap_or_default();
        let line = if label.is_empty() {
            glyph
        } else {
            format!("{glyph} {label}")
        };
        self.write_plain(row, col, &line, width)
    }

    fn paint_panel(&self, node: &Node, row: u16, col: u16, width: u16, ctx: &PaintContext) -> Vec<Command> {
        let panel_width: i64 = node.properties.get(keys::WIDTH).unwrap_or(width as i64);
        let panel_width = (panel_width as u16).max(2);
        let title: Option<String> = node.properties.get(keys::TITLE);
        let (tl, tr, bl, br, horizontal, vertical) = if ctx.unicode {
            ('┌', '┐', '└', '┘', '─', '│')
        } else {
            ('+', '+', '+', '+', '-', '|')
        };

        let mut commands = Vec::new();
        let top = match &title {
            Some(title) if !title.is_empty() => {
                let prefix_len = 3 + text_width(title) + 1;
                let dashes = (panel_width as usize).saturating_sub(prefix_len as usize + 1);
                format!(
                    "{tl}{h} {title} {dashes}{tr}",
                    h = horizontal,
                    dashes = horizontal.to_string().repeat(dashes)
                )
            }
            _ => format!(
                "{tl}{fill}{tr}",
                fill = horizontal.to_string().repeat(panel_width as usize - 2)
            ),
        };
        commands.extend(self.write_plain(row, col, &top, panel_width));

        let inner_width = panel_width - 2;
        let mut next_row = row + 1;
        if let Some(child) = node.children.first() {
            let child_height = natural_size(child, inner_width).height;
            let child_commands = self.paint_at(child, next_row, col + 1, inner_width, ctx);
            commands.extend(wrap_with_border(child_commands, vertical, col, panel_width));
            next_row += child_height.max(1);
        }

        let bottom = format!(
            "{bl}{fill}{br}",
            fill = horizontal.to_string().repeat(panel_width as usize - 2)
        );
        commands.extend(self.write_plain(next_row, col, &bottom, panel_width));
        commands
    }

    fn paint_hstack(&self, node: &Node, row: u16, col: u16, width: u16, ctx: &PaintContext) -> Vec<Command> {
        let padding: i64 = node.properties.get(keys::PADDING).unwrap_or(0);
        let spacing: i64 = node.properties.get(keys::SPACING).unwrap_or(0);
        let padding = padding as u16;
        let spacing = spacing as u16;
        let inner_row = row + padding;
        let inner_col = col + padding;
        let inner_width = width.saturating_sub(2 * padding);

        let fixed_sizes: Vec<u16> = node
            .children
            .iter()
            .map(|c| if c.kind == NodeKind::Spacer { 0 } else { natural_size(c, inner_width).width })
            .collect();
        let n = node.children.len();
        let fixed_total: u16 = fixed_sizes.iter().sum();
        let spacing_total = spacing.saturating_mul(n.saturating_sub(1) as u16);
        let spacer_count = node.children.iter().filter(|c| c.kind == NodeKind::Spacer).count().max(1) as u16;
        let leftover = inner_width.saturating_sub(fixed_total + spacing_total);
        let share = leftover / spacer_count;

        let mut commands = Vec::new();
        let mut cursor = inner_col;
        for (child, fixed_width) in node.children.iter().zip(fixed_sizes) {
            let child_width = if child.kind == NodeKind::Spacer {
                let min_length: i64 = child.properties.get(keys::MIN_LENGTH).unwrap_or(0);
                share.max(min_length as u16)
            } else {
                fixed_width
            };
            commands.extend(self.paint_at(child, inner_row, cursor, child_width, ctx));
            cursor += child_width + spacing;
        }
        commands
    }

    fn paint_vstack(&self, node: &Node, row: u16, col: u16, width: u16, ctx: &PaintContext, avail_height: u16) -> Vec<Command> {
        let padding: i64 = node.properties.get(keys::PADDING).unwrap_or(0);
        let spacing: i64 = node.properties.get(keys::SPACING).unwrap_or(0);
        let padding = padding as u16;
        let spacing = spacing as u16;
        let inner_row = row + padding;
        let inner_col = col + padding;
        let inner_width = width.saturating_sub(2 * padding);
        let inner_height = avail_height.saturating_sub(2 * padding);

        let fixed_heights: Vec<u16> = node
            .children
            .iter()
            .map(|c| {
                if c.kind == NodeKind::Spacer {
                    0
                } else {
                    natural_size(c, inner_width).height.max(1)
                }
            })
            .collect();
        let n = node.children.len();
        let fixed_total: u16 = fixed_heights.iter().sum();
        let spacing_total = spacing.saturating_mul(n.saturating_sub(1) as u16);
        let spacer_count = node.children.iter().filter(|c| c.kind == NodeKind::Spacer).count().max(1) as u16;
        let leftover = inner_height.saturating_sub(fixed_total + spacing_total);
        let share = leftover / spacer_count;

        let mut commands = Vec::new();
        let mut cursor = inner_row;
        for (child, fixed_height) in node.children.iter().zip(fixed_heights) {
            let child_height = if child.kind == NodeKind::Spacer {
                let min_length: i64 = child.properties.get(keys::MIN_LENGTH).unwrap_or(0);
                share.max(min_length as u16)
            } else {
                fixed_height
            };
            if child.kind != NodeKind::Spacer {
                commands.extend(self.paint_at(child, cursor, inner_col, inner_width, ctx));
            }
            cursor += child_height + spacing;
        }
        commands
    }
}

/// Truncates `text` to at most `width` display columns, measured with
/// `unicode-width` rather than a raw character count.
fn truncate_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthStr::width(ch.to_string().as_str());
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

fn text_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// `Panel`'s border sits one column to the left and right of every row its
/// content occupies; since a child only ever emits `MoveCursor`+content
/// (never a border byte itself), the vertical bars for each row are appended
/// as their own writes rather than rewritten into the child's commands. A
/// multi-row child (a `VStack`, say) gets one left/right pair per row it
/// moved its cursor to.
fn wrap_with_border(child_commands: Vec<Command>, vertical: char, col: u16, panel_width: u16) -> Vec<Command> {
    let rows: BTreeSet<u16> = child_commands
        .iter()
        .filter_map(|command| match command {
            Command::MoveCursor { row, .. } => Some(*row),
            _ => None,
        })
        .collect();

    let mut commands = Vec::with_capacity(child_commands.len() + rows.len() * 4);
    for row in &rows {
        commands.push(Command::MoveCursor { row: *row, column: col });
        commands.push(Command::Write(vertical.to_string()));
    }
    commands.extend(child_commands);
    for row in &rows {
        commands.push(Command::MoveCursor { row: *row, column: col + panel_width - 1 });
        commands.push(Command::Write(vertical.to_string()));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_builtins::{Panel, Text, VStack};
    use stage_command::NoopTheme;
    use stage_view::{RenderContext, View};

    fn commands_to_text(commands: &[Command]) -> Vec<String> {
        let mut lines: Vec<(u16, u16, String)> = Vec::new();
        for command in commands {
            if let Command::Write(text) = command {
                if let Some(last) = lines.last_mut() {
                    last.2.push_str(text);
                }
            }
            if let Command::MoveCursor { row, column } = command {
                lines.push((*row, *column, String::new()));
            }
        }
        lines.into_iter().map(|(_, _, t)| t).collect()
    }

    #[test]
    fn panel_with_title_matches_expected_border_shape() {
        let mut ctx = RenderContext::for_test(20, 5);
        let panel = Panel::new(Text::new("x")).title("T");
        let node = panel.make_node(&mut ctx);
        let engine = PaintEngine::new(Arc::new(NoopTheme));
        let paint_ctx = PaintContext::new(20, 5, true);
        let commands = engine.paint(&node, &paint_ctx);
        let lines = commands_to_text(&commands);
        assert_eq!(lines[0], "┌─ T ────────────────┐");
        assert_eq!(lines.last().unwrap(), "└──────────────────┘");
    }

    #[test]
    fn panel_wrapping_a_multi_row_child_borders_every_interior_row() {
        let mut ctx = RenderContext::for_test(20, 6);
        let stack = VStack::new(vec![Box::new(Text::new("a")), Box::new(Text::new("b"))]);
        let panel = Panel::new(stack);
        let node = panel.make_node(&mut ctx);
        let engine = PaintEngine::new(Arc::new(NoopTheme));
        let paint_ctx = PaintContext::new(20, 6, true);
        let commands = engine.paint(&node, &paint_ctx);

        // Both interior rows (1 and 2) must get a left bar at column 0 and a
        // right bar at the panel's far column, not just the last one seen.
        let left_border_rows: Vec<u16> = commands
            .windows(2)
            .filter_map(|pair| match pair {
                [Command::MoveCursor { row, column: 0 }, Command::Write(text)] if text == "│" => Some(*row),
                _ => None,
            })
            .collect();
        let right_border_rows: Vec<u16> = commands
            .windows(2)
            .filter_map(|pair| match pair {
                [Command::MoveCursor { row, column: 19 }, Command::Write(text)] if text == "│" => Some(*row),
                _ => None,
            })
            .collect();
        assert_eq!(left_border_rows, vec![1, 2]);
        assert_eq!(right_border_rows, vec![1, 2]);
    }

    #[test]
    fn divider_fills_available_width() {
        let node = stage_node::Node::new(
            stage_node::Address::new("divider"),
            NodeKind::Divider,
            stage_node::Properties::new(),
        );
        let engine = PaintEngine::default();
        let paint_ctx = PaintContext::new(10, 3, true);
        let commands = engine.paint(&node, &paint_ctx);
        let lines = commands_to_text(&commands);
        assert_eq!(lines[0].chars().count(), 10);
    }

    #[test]
    fn truncate_to_width_respects_display_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }
}
