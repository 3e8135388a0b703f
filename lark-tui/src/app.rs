use std::{path::PathBuf, time::Duration};

use lark_core::{
    Catalog, NavEvent, PlaybackAction, PlaybackRequest, PlaybackState, PlaybackThread,
    PlaybackUpdate, PlaybackUpdateRx, Viewport,
};

use crate::{config::Config, log_buffer::LogBuffer, ui::logs::LogsState};

/// Which panel/mode the UI is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Library,
    Logs,
}

/// What the playback thread last reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    pub index: Option<usize>,
    pub state: PlaybackState,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f32,
}
impl PlayerStatus {
    fn new(volume: f32) -> Self {
        Self {
            index: None,
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume,
        }
    }

    fn apply(&mut self, update: PlaybackUpdate) {
        match update {
            PlaybackUpdate::TrackStarted(index) => {
                self.index = Some(index);
                self.position = Duration::ZERO;
            }
            PlaybackUpdate::StateChanged(state) => self.state = state,
            PlaybackUpdate::Position {
                index,
                position,
                duration,
            } => {
                self.index = Some(index);
                self.position = position;
                self.duration = duration;
            }
            PlaybackUpdate::Volume(volume) => self.volume = volume,
        }
    }
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub config_path: PathBuf,
    pub catalog: Catalog,
    pub viewport: Viewport,
    playback: PlaybackThread,
    playback_update_rx: Option<PlaybackUpdateRx>,

    // Global UI orchestration
    pub focused_panel: FocusedPanel,
    pub should_quit: bool,
    pub needs_redraw: bool,

    /// Digits typed since `:` was pressed; `None` when the prompt is closed.
    pub prompt: Option<String>,
    /// The last song number jumped to, as shown in the status bar.
    pub song_number: String,

    pub player: PlayerStatus,
    pub logs: LogsState,
}

impl App {
    pub fn new(
        config: Config,
        config_path: PathBuf,
        catalog: Catalog,
        (width, height): (u16, u16),
        log_buffer: LogBuffer,
    ) -> Self {
        let volume = config.general.volume.clamp(0.0, 1.0);
        let mut playback = PlaybackThread::new(catalog.durations(), volume);
        let playback_update_rx = playback.take_updates();
        let viewport = Viewport::new(catalog.len(), height, width);

        Self {
            config,
            config_path,
            catalog,
            viewport,
            playback,
            playback_update_rx,

            focused_panel: FocusedPanel::Library,
            should_quit: false,
            needs_redraw: true,

            prompt: None,
            song_number: "1".to_string(),

            player: PlayerStatus::new(volume),
            logs: LogsState::new(log_buffer),
        }
    }

    pub fn tick(&mut self) {
        let Some(rx) = &self.playback_update_rx else {
            return;
        };
        let mut changed = false;
        while let Ok(update) = rx.try_recv() {
            self.player.apply(update);
            changed = true;
        }
        if changed || self.focused_panel == FocusedPanel::Logs {
            self.needs_redraw = true;
        }
    }

    pub fn navigate(&mut self, event: NavEvent) {
        if self.viewport.apply(event) {
            self.needs_redraw = true;
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.apply(NavEvent::Resize { height, width });
        self.needs_redraw = true;
    }

    /// Sends a playback request for the selected entry.
    pub fn request_playback(&self, action: PlaybackAction) {
        let selected = self.viewport.selected().unwrap_or_default();
        self.playback.send(PlaybackRequest::new(selected, action));
    }

    pub fn adjust_volume(&self, up: bool) {
        let step = self.config.general.volume_step;
        self.request_playback(PlaybackAction::AdjustVolume(if up { step } else { -step }));
    }

    pub fn seek_relative(&self, forward: bool) {
        let step = self.config.general.seek_step_secs;
        self.request_playback(PlaybackAction::SeekBy(if forward { step } else { -step }));
    }

    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    /// Closes the prompt and jumps to the 1-based song number typed into it.
    pub fn submit_prompt(&mut self) {
        let Some(input) = self.prompt.take() else {
            return;
        };
        match input.parse::<usize>() {
            Ok(number) if number > 0 => {
                self.navigate(NavEvent::JumpTo(number - 1));
                self.song_number = input;
            }
            _ => tracing::debug!("ignoring song number {input:?}"),
        }
    }

    pub fn toggle_logs(&mut self) {
        if self.focused_panel == FocusedPanel::Logs {
            self.focused_panel = FocusedPanel::Library;
        } else {
            self.focused_panel = FocusedPanel::Logs;
            self.logs.scroll_to_end();
        }
    }

    pub fn save_state(&self) -> anyhow::Result<()> {
        let mut config = self.config.clone();
        config.general.volume = self.player.volume;
        config.save(&self.config_path)
    }
}

#[cfg(test)]
impl App {
    /// An 80-column app over `entries` songs with room for `rows` entry rows.
    pub(crate) fn for_test(entries: usize, rows: u16) -> App {
        let catalog = Catalog::build((0..entries).map(|i| {
            lark_core::Entry::new(format!("Song {i}"), format!("Artist {i}"), 61_000)
        }));
        App::new(
            Config::default(),
            PathBuf::from(Config::FILENAME),
            catalog,
            (80, rows + lark_core::CHROME_ROWS as u16),
            LogBuffer::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(entries: usize, rows: u16) -> App {
        App::for_test(entries, rows)
    }

    #[test]
    fn prompt_jumps_to_song_number() {
        let mut app = app(12, 5);
        app.open_prompt();
        app.prompt.as_mut().unwrap().push_str("9");
        app.submit_prompt();

        assert_eq!(app.prompt, None);
        assert_eq!(app.viewport.selected(), Some(8));
        assert_eq!(app.song_number, "9");
    }

    #[test]
    fn empty_or_zero_song_number_is_ignored() {
        let mut app = app(12, 5);
        for input in ["", "0"] {
            app.open_prompt();
            app.prompt.as_mut().unwrap().push_str(input);
            app.submit_prompt();
            assert_eq!(app.viewport.selected(), Some(0));
            assert_eq!(app.song_number, "1");
        }
    }

    #[test]
    fn song_number_past_the_end_selects_last_entry() {
        let mut app = app(12, 5);
        app.open_prompt();
        app.prompt.as_mut().unwrap().push_str("500");
        app.submit_prompt();
        assert_eq!(app.viewport.selected(), Some(11));
    }

    #[test]
    fn player_status_follows_updates() {
        let mut status = PlayerStatus::new(1.0);
        status.apply(PlaybackUpdate::TrackStarted(3));
        status.apply(PlaybackUpdate::StateChanged(PlaybackState::Playing));
        status.apply(PlaybackUpdate::Position {
            index: 3,
            position: Duration::from_secs(5),
            duration: Duration::from_secs(61),
        });
        status.apply(PlaybackUpdate::Volume(0.5));

        assert_eq!(status.index, Some(3));
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.position, Duration::from_secs(5));
        assert_eq!(status.duration, Duration::from_secs(61));
        assert_eq!(status.volume, 0.5);
    }

    #[test]
    fn playback_updates_reach_the_player_bar() {
        let mut app = app(3, 5);
        app.request_playback(PlaybackAction::TogglePlayback);

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while app.player.state != PlaybackState::Playing && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.tick();
        }
        assert_eq!(app.player.state, PlaybackState::Playing);
        assert_eq!(app.player.index, Some(0));
        assert_eq!(app.player.duration, Duration::from_secs(61));
    }

    #[test]
    fn save_state_writes_volume() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut app = app(1, 5);
        app.config_path = tmp.path().join(Config::FILENAME);
        app.player.volume = 0.4;
        app.save_state().unwrap();

        let saved = Config::load(&app.config_path).unwrap();
        assert_eq!(saved.general.volume, 0.4);
    }
}
