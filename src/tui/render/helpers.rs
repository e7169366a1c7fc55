use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::field::TextField;
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` out to `width` cells
pub(super) fn pad_to(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Right-align `right` after `left` within `width` cells. The right part is
/// dropped when it does not fit.
pub(super) fn push_right_aligned<'a>(
    spans: &mut Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    fill: Style,
) {
    let left_w = spans_width(spans);
    let right_w = spans_width(&right);
    if left_w + right_w < width {
        spans.push(Span::styled(" ".repeat(width - left_w - right_w), fill));
        spans.extend(right);
    }
}

/// Horizontal bar of `value / max` scaled to `width` cells
pub(super) fn bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { value * width / max };
    "\u{2588}".repeat(filled)
}

/// Spans for a one-line text input. The focused field shows a block caret
/// over the grapheme at the cursor; an empty field shows `placeholder`.
pub(super) fn input_spans<'a>(
    field: &TextField,
    focused: bool,
    placeholder: &'a str,
    masked: bool,
    theme: &Theme,
    bg: ratatui::style::Color,
) -> Vec<Span<'a>> {
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    let caret_style = Style::default()
        .fg(theme.background)
        .bg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    if field.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled(" ", caret_style));
        }
        spans.push(Span::styled(placeholder, Style::default().fg(theme.dim).bg(bg)));
        return spans;
    }

    let text = field.text();
    let cursor = field.cursor();
    let at = unicode::grapheme_at(text, cursor);
    let (before, after) = (&text[..cursor], &text[cursor + at.len()..]);
    let show = |s: &str| -> String {
        if masked {
            "\u{2022}".repeat(s.chars().count())
        } else {
            s.to_string()
        }
    };

    if !focused {
        return vec![Span::styled(show(text), text_style)];
    }
    let at_shown = if at.is_empty() { " ".to_string() } else { show(at) };
    vec![
        Span::styled(show(before), text_style),
        Span::styled(at_shown, caret_style),
        Span::styled(show(after), text_style),
    ]
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_w = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_w;

    for word in text.split_whitespace() {
        let word_w = unicode::display_width(word);
        let space = if current_w == indent_w { 0 } else { 1 };
        if current_w + space + word_w > max_width && current_w > indent_w {
            lines.push(current);
            current = indent.to_string();
            current_w = indent_w;
        }
        if current_w > indent_w {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if current_w > indent_w || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
