pub(crate) mod layout;
pub(crate) mod library;
pub(crate) mod logs;
pub(crate) mod now_playing;

use lark_core::view;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    app::{App, FocusedPanel},
    keys,
};

/// Repaints the whole screen from the app's current state.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let bg = Block::default().style(app.config.style.normal_style());
    frame.render_widget(bg, size);

    let main = layout::split_main(size);

    match app.focused_panel {
        FocusedPanel::Library => library::draw(frame, app, main.list),
        FocusedPanel::Logs => logs::draw(frame, &mut app.logs, &app.config.style, main.list),
    }
    now_playing::draw(frame, app, main.player_bar);
    draw_status_bar(frame, app, main.status_bar);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chrome = app.config.style.chrome_style();

    let line = if let Some(input) = &app.prompt {
        let prompt = format!(":{input}");
        frame.set_cursor_position((area.x + prompt.len() as u16, area.y));
        Line::from(prompt)
    } else if app.focused_panel == FocusedPanel::Logs {
        let mut spans = Vec::new();
        for action in keys::LOGS_HELP {
            if let Some((key, label)) = action.help_label(app.player.state) {
                spans.push(Span::raw(format!("{key}:{label} ")));
            }
        }
        Line::from(spans)
    } else {
        Line::from(view::status_line(&app.song_number))
    };

    frame.render_widget(Paragraph::new(line).style(chrome), area);
}
