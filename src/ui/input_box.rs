use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match &state.mode {
        InputMode::Rename { jid, .. } => Some(format!(" Nickname for {} ", jid)),
        InputMode::EditGroups { account, jid } => {
            let known = state.roster.registry().read().group_names_for(account);
            Some(if known.is_empty() {
                format!(" Groups for {} (comma separated) ", jid)
            } else {
                format!(" Groups for {} · known: {} ", jid, known.join(", "))
            })
        }
        InputMode::Normal => None,
    };
    let editing = title.is_some();
    let (border_style, border_type, bg) = if editing {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let block = Block::default()
        .title(title.unwrap_or_else(|| " Input ".to_string()))
        .title_style(if editing {
            Theme::title()
        } else {
            Theme::border()
        })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if editing {
        // Prompt chevron + input text
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(state.input.text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        // Cursor offset: chevron "❯ " (2 columns)
        let prompt_offset = 2u16;
        let typed = state.input.text[..state.input.cursor].width() as u16;
        let cursor_x = inner.x + prompt_offset + typed;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    } else {
        let hint = Paragraph::new("Enter: open  m: menu  r: rename  g: groups  q: quit").style(Theme::hint());
        frame.render_widget(hint, inner);
    }
}
