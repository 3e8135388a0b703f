use lark_core::{NavEvent, PlaybackAction, view};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, keys::Action};

use super::layout;

/// Draws the list box: title, column header and the visible entry rows.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.config.style;
    let normal = style.normal_style();
    let selected = style.selected_style();

    let block = Block::default()
        .title(Line::from(view::TITLE).centered())
        .borders(Borders::ALL)
        .style(normal);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list = layout::split_list(inner);
    let view = app.viewport.view(&app.catalog);

    frame.render_widget(
        Paragraph::new(view.column_header()).style(style.chrome_style()),
        list.header,
    );

    if let Some(reason) = view.empty {
        let target = if list.rows.height > 0 { list.rows } else { inner };
        frame.render_widget(Paragraph::new(reason.message()).style(normal), target);
        return;
    }

    let lines: Vec<Line> = view
        .rows
        .iter()
        .map(|row| {
            Line::styled(
                row.text(view.width),
                if row.highlighted { selected } else { normal },
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list.rows);
}

pub fn handle_key(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::MoveUp => app.navigate(NavEvent::ScrollUp),
        Action::MoveDown => app.navigate(NavEvent::ScrollDown),
        Action::PageLeft => app.navigate(NavEvent::PageLeft),
        Action::PageRight => app.navigate(NavEvent::PageRight),
        Action::PlayPause => app.request_playback(PlaybackAction::TogglePlayback),
        Action::Next => app.request_playback(PlaybackAction::Next),
        Action::Previous => app.request_playback(PlaybackAction::Previous),
        Action::VolumeUp => app.adjust_volume(true),
        Action::VolumeDown => app.adjust_volume(false),
        Action::SeekForward => app.seek_relative(true),
        Action::SeekBackward => app.seek_relative(false),
        Action::JumpPrompt => app.open_prompt(),
        Action::Logs => app.toggle_logs(),
        _ => {}
    }
}
