use std::time::Duration;

use lark_core::util::millis_to_hms_string;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::App, keys};

/// Draws the two-row player bar: position and track on the first row,
/// duration, volume and playback keys on the second.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let player = &app.player;
    let chrome = app.config.style.chrome_style();

    let track = player
        .index
        .and_then(|index| app.catalog.get(index))
        .map(|entry| format!("  {}: {} - {}", player.state, entry.title, entry.artist))
        .unwrap_or_else(|| format!("  {}", player.state));

    let mut second_row = vec![Span::raw(format!(
        " {}  vol {:3.0}% ",
        duration_string(player.duration),
        player.volume * 100.0
    ))];
    for action in keys::PLAYER_HELP {
        if let Some((key, label)) = action.help_label(player.state) {
            second_row.push(Span::raw(format!(" {key}:{label}")));
        }
    }

    let lines = vec![
        Line::from(format!(" {}{track}", duration_string(player.position))),
        Line::from(second_row),
    ];
    frame.render_widget(Paragraph::new(lines).style(chrome), area);
}

fn duration_string(duration: Duration) -> String {
    millis_to_hms_string(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
