use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub roster: Rect,
    pub detail: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | input | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let input_box = main_chunks[1];
    let status_bar = main_chunks[2];

    // Horizontal: roster | gap | detail
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Percentage(45), // Roster
            Constraint::Min(30),        // Detail
        ])
        .split(content);

    AppLayout {
        roster: h_chunks[0],
        detail: h_chunks[1],
        input_box,
        status_bar,
    }
}
