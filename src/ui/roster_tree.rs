use crate::app::state::*;
use crate::roster::{RowKind, VisibleRow};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.mode == InputMode::Normal;
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let display = state.roster.display();
    let title = if display.view_by_account {
        " Contacts · by account "
    } else {
        " Contacts "
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let width = block.inner(area).width as usize;
    let rows = state.roster.target().visible_rows();

    let mut items: Vec<ListItem> = rows
        .iter()
        .map(|(_, row)| ListItem::new(row_line(row, width)))
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " No contacts",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("▌");

    let mut list_state = ListState::default();
    if !rows.is_empty() {
        list_state.select(Some(state.selected.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_line<'a>(row: &VisibleRow<'a>, width: usize) -> Line<'a> {
    let node = row.node;
    let indent = "  ".repeat(row.depth);

    let expander = match node.row.kind {
        RowKind::Peer => "  ",
        _ if node.children.is_empty() => "  ",
        _ if node.expanded => "▾ ",
        _ => "▸ ",
    };

    let mut spans = vec![Span::raw(indent.clone()), Span::styled(expander, Theme::hint())];
    let mut used = indent.width() + expander.width();

    if let Some(icon) = node.row.icon {
        let (glyph, color) = Theme::icon(icon);
        spans.push(Span::styled(format!("{} ", glyph), Style::default().fg(color)));
        used += glyph.width() + 1;
    }

    let fg = node
        .row
        .foreground
        .map(Theme::color)
        .unwrap_or(Theme::TEXT_SECONDARY);
    let style = Theme::weighted(
        Style::default().fg(fg).bg(Theme::color(node.row.background)),
        node.row.weight,
    );
    let label = truncate(&node.row.label, width.saturating_sub(used + 1));
    spans.push(Span::styled(label, style));

    Line::from(spans)
}

/// Cuts `s` to at most `max` terminal columns, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
