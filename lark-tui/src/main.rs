mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::{
    io::Stdout,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use app::{App, FocusedPanel};
use clap::Parser;
use config::Config;
use keys::Action;
use lark_core::Catalog;
use log_buffer::{LogBuffer, LogBufferLayer};

use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Browse a directory of music in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory containing the media files to list.
    path: PathBuf,

    /// Config file to use instead of `lark-config.toml` in the working directory.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to the TUI's log panel instead of stdout.
    let log_buffer = LogBuffer::new();

    let log_file = std::fs::File::create("lark.log").context("Failed to create lark.log")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lark=info")),
        )
        .init();

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    let entries = lark_scan::scan_directory(&args.path, &config.library.scan_options())?;
    let catalog = Catalog::build(entries);
    tracing::info!("{} entries in catalog", catalog.len());

    let (mut terminal, size) = setup_terminal()?;
    let mut app = App::new(config, config_path, catalog, size, log_buffer);

    let tick_rate = app.config.general.tick_rate();
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_state() {
        tracing::error!("Failed to save config: {e:#}");
    }

    result
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode and the alternate screen, returning the terminal and
/// its size. If any step fails the shell is restored before the error is
/// returned.
fn setup_terminal() -> anyhow::Result<(Tui, (u16, u16))> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    restore_on_error(enter_alternate_screen(), restore_terminal)
}

fn enter_alternate_screen() -> anyhow::Result<(Tui, (u16, u16))> {
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let size = terminal.size()?;
    Ok((terminal, (size.width, size.height)))
}

/// Best-effort undo of [`setup_terminal`], used when setup fails part way.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show);
}

fn restore_on_error<T>(result: anyhow::Result<T>, restore: impl FnOnce()) -> anyhow::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            handle_event(app, event::read()?);
            // Drain anything else that queued up before repainting.
            while event::poll(Duration::ZERO)? {
                handle_event(app, event::read()?);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            handle_key_event(app, &key);
            app.needs_redraw = true;
        }
        Event::Resize(width, height) => app.resize(width, height),
        _ => {}
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    // The song-number prompt takes every key until it is closed.
    if let Some(input) = app.prompt.as_mut() {
        if let Some(action) = keys::prompt_action(key) {
            match action {
                Action::Char(c) => input.push(c),
                Action::DeleteChar => {
                    input.pop();
                }
                Action::Select => app.submit_prompt(),
                Action::Back => app.close_prompt(),
                _ => {}
            }
        }
        return;
    }

    match app.focused_panel {
        FocusedPanel::Library => {
            if let Some(action) = keys::library_action(key) {
                ui::library::handle_key(app, action);
            }
        }
        FocusedPanel::Logs => {
            if let Some(action) = keys::logs_action(key)
                && let Some(la) = ui::logs::handle_key(&mut app.logs, action)
            {
                match la {
                    ui::logs::LogsAction::ToggleLogs => app.toggle_logs(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn jump_prompt_round_trip() {
        let mut app = App::for_test(12, 5);
        type_str(&mut app, ":1x2");
        assert_eq!(app.prompt.as_deref(), Some("12"));

        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "0");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.prompt, None);
        assert_eq!(app.viewport.selected(), Some(9));
        assert_eq!(app.viewport.top(), 5);
        assert_eq!(app.song_number, "10");
    }

    #[test]
    fn escape_cancels_prompt_without_moving() {
        let mut app = App::for_test(12, 5);
        type_str(&mut app, ":7");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.prompt, None);
        assert_eq!(app.viewport.selected(), Some(0));
        assert_eq!(app.song_number, "1");
    }

    #[test]
    fn q_in_prompt_does_not_quit() {
        let mut app = App::for_test(12, 5);
        type_str(&mut app, ":q");
        assert!(!app.should_quit);
        assert_eq!(app.prompt.as_deref(), Some(""));
    }

    #[test]
    fn q_closes_logs_before_quitting() {
        let mut app = App::for_test(12, 5);
        type_str(&mut app, "L");
        assert_eq!(app.focused_panel, FocusedPanel::Logs);

        type_str(&mut app, "q");
        assert_eq!(app.focused_panel, FocusedPanel::Library);
        assert!(!app.should_quit);

        type_str(&mut app, "q");
        assert!(app.should_quit);
    }

    #[test]
    fn arrows_are_ignored_while_logs_are_open() {
        let mut app = App::for_test(12, 5);
        type_str(&mut app, "L");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.viewport.selected(), Some(0));
    }

    #[test]
    fn resize_event_updates_viewport() {
        let mut app = App::for_test(12, 5);
        app.needs_redraw = false;
        handle_event(&mut app, Event::Resize(100, 30));
        assert_eq!(app.viewport.visible_rows(), 24);
        assert_eq!(app.viewport.width(), 100);
        assert!(app.needs_redraw);
    }

    #[test]
    fn failed_setup_step_restores_terminal() {
        let restored = std::cell::Cell::new(false);
        let result: anyhow::Result<()> =
            restore_on_error(Err(anyhow::anyhow!("no tty")), || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());

        restored.set(false);
        let result = restore_on_error(Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut app = App::for_test(12, 5);
        let mut key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_event(&mut app, Event::Key(key));
        assert_eq!(app.viewport.selected(), Some(0));
    }
}
