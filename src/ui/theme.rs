use crate::roster::{ColorKey, StatusIcon};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 24, 30);
    pub const BG_PANEL: Color = Color::Rgb(28, 31, 38);
    pub const BG_ELEVATED: Color = Color::Rgb(40, 44, 54);
    pub const BORDER_DIM: Color = Color::Rgb(70, 76, 90);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 224, 232);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 166, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(105, 110, 125);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);
    pub const ACCENT_RED: Color = Color::Rgb(225, 95, 95);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Thick
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Self::BG_PANEL)
    }

    pub fn panel_bg_focused() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Self::BG_ELEVATED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn hint() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Resolves a row color key.
    pub fn color(key: ColorKey) -> Color {
        match key {
            ColorKey::PeerOnlineForeground => Self::TEXT_PRIMARY,
            ColorKey::PeerOfflineForeground => Self::TEXT_MUTED,
            ColorKey::PeerBackground => Self::BG_PANEL,
            ColorKey::GroupBackground => Color::Rgb(34, 38, 47),
            ColorKey::AccountOnlineBackground => Color::Rgb(30, 48, 44),
            ColorKey::AccountOfflineBackground => Color::Rgb(52, 34, 36),
        }
    }

    pub fn icon(icon: StatusIcon) -> (&'static str, Color) {
        match icon {
            StatusIcon::Available => ("●", Self::ACCENT_GREEN),
            StatusIcon::Away => ("◐", Self::ACCENT_AMBER),
            StatusIcon::ExtendedAway => ("◑", Color::Rgb(200, 140, 60)),
            StatusIcon::Busy => ("⊘", Self::ACCENT_RED),
            StatusIcon::Offline => ("○", Self::TEXT_MUTED),
            StatusIcon::Unknown => ("?", Self::TEXT_SECONDARY),
            StatusIcon::Connecting => ("◇", Self::ACCENT_AMBER),
        }
    }

    /// Rows with a heavy weight render bold.
    pub fn weighted(style: Style, weight: Option<u16>) -> Style {
        match weight {
            Some(w) if w >= 600 => style.add_modifier(Modifier::BOLD),
            Some(w) if w >= 500 => style.add_modifier(Modifier::ITALIC),
            _ => style,
        }
    }
}
