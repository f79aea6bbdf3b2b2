use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let display = state.roster.display();
    let view = if display.view_by_account { "BY ACCOUNT" } else { "MERGED" };
    parts.push(Span::styled(
        format!(" [{}] ", view),
        Style::default().fg(Theme::ACCENT_GREEN).bg(Theme::BG_ELEVATED),
    ));

    // Status text
    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let mut flags = Vec::new();
    if display.show_only_online {
        flags.push("online");
    }
    if display.show_only_confirmed {
        flags.push("confirmed");
    }
    if display.sort_by_status {
        flags.push("by-status");
    }
    if display.show_empty_groups {
        flags.push("empty-groups");
    }
    if !flags.is_empty() {
        parts.push(Span::styled(
            format!("| {} ", flags.join(" ")),
            Style::default().fg(Theme::ACCENT_AMBER).bg(Theme::BG_ELEVATED),
        ));
    }

    // Mode indicator
    let mode = match state.mode {
        InputMode::Normal => "ROSTER",
        InputMode::Rename { .. } => "RENAME",
        InputMode::EditGroups { .. } => "GROUPS",
    };
    let collapsed = state.roster.collapse_state().collapsed_count();
    let rows = state.roster.target().len();
    let updated = state
        .last_rebuild
        .map(|t| format!("{} ", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let right = format!(" {} rows · {} collapsed  {}[{}] ", rows, collapsed, updated, mode);

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + right.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        right,
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED),
    ));

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
