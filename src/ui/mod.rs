mod detail;
mod input_box;
mod layout;
mod roster_tree;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    roster_tree::render(frame, app_layout.roster, state);
    detail::render(frame, app_layout.detail, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
