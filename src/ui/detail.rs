use crate::app::state::*;
use crate::roster::{ContextTarget, RenderTarget, RowKind};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const KEYS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "Move"),
    ("Enter", "Open chat / collapse"),
    ("m", "Context menu"),
    ("r", "Rename contact"),
    ("g", "Edit groups"),
    ("x", "Remove contact"),
    ("c", "Connect / disconnect"),
    ("Ctrl-R", "Reload contacts"),
    ("v", "Merged / by account"),
    ("o", "Hide offline"),
    ("w", "Hide unconfirmed"),
    ("s", "Sort by status"),
    ("e", "Show empty groups"),
    ("q", "Quit"),
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, lines) = match &state.detail {
        Some(Detail::Conversation {
            account,
            peer,
            name,
            status,
        }) => (
            format!(" {} ", name),
            vec![
                field("Contact", peer),
                field("Account", &account.display_name),
                field("Status", status.as_str()),
                Line::from(""),
                Line::from(Span::styled(
                    "No messages yet.",
                    Style::default().fg(Theme::TEXT_MUTED),
                )),
            ],
        ),
        Some(Detail::Menu(target)) => (" Menu ".to_string(), menu_lines(target)),
        None => (" Help ".to_string(), help_lines(state)),
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .padding(Padding::horizontal(1))
        .style(Theme::panel_bg());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn field<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled(value.to_string(), Style::default().fg(Theme::TEXT_PRIMARY)),
    ])
}

fn menu_lines(target: &ContextTarget) -> Vec<Line<'static>> {
    let entry = |s: &str| {
        Line::from(Span::styled(
            format!("  {}", s),
            Style::default().fg(Theme::TEXT_PRIMARY),
        ))
    };
    match target {
        ContextTarget::PeerMenu {
            account,
            peer,
            resources,
            can_send_files,
        } => {
            let mut lines = vec![
                field("Contact", peer),
                field("Account", &account.display_name),
                Line::from(""),
                entry("Start conversation"),
                entry("Edit contact"),
                entry("Remove contact"),
            ];
            if *can_send_files {
                lines.push(entry("Send file"));
            }
            if !resources.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Resources",
                    Style::default().fg(Theme::TEXT_SECONDARY),
                )));
                for r in resources {
                    lines.push(entry(r));
                }
            }
            lines
        }
        ContextTarget::AccountMenu { account } => vec![
            field("Account", &account.display_name),
            Line::from(""),
            entry(if account.is_connected() { "Disconnect" } else { "Connect" }),
            entry("Add contact"),
            entry("Edit account"),
        ],
    }
}

fn help_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(path) = state.selected_path() {
        if let Some(node) = state.roster.target().node(&path) {
            if node.row.kind == RowKind::Peer {
                if let Some(tooltip) = &node.row.tooltip {
                    lines.push(field("Selected", tooltip));
                    lines.push(Line::from(""));
                }
            }
        }
    }

    let groups = state.roster.registry().read().all_group_names();
    if !groups.is_empty() {
        lines.push(field("Groups", &groups.join(", ")));
        lines.push(Line::from(""));
    }

    for (key, what) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", key),
                Style::default()
                    .fg(Theme::ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*what, Style::default().fg(Theme::TEXT_SECONDARY)),
        ]));
    }
    lines
}
