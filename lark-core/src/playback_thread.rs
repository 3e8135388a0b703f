use std::{
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

/// How often the playback thread wakes up to advance the clock.
const TICK: Duration = Duration::from_millis(10);

/// Going back within this much of the start of a track skips to the previous
/// track; further in, it restarts the current one.
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

pub type PlaybackUpdateRx = mpsc::Receiver<PlaybackUpdate>;

struct PlaybackThreadSendHandle(mpsc::Sender<PlaybackMessage>);
impl PlaybackThreadSendHandle {
    /// Sends a request. Requests to a thread that has already shut down are
    /// dropped.
    fn send(&self, request: PlaybackRequest) {
        let _ = self.0.send(PlaybackMessage::Request(request));
    }
}

/// A playback control request, tagged with the entry selected in the browser
/// when it was made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    pub selected: usize,
    pub action: PlaybackAction,
}
impl PlaybackRequest {
    pub fn new(selected: usize, action: PlaybackAction) -> Self {
        Self { selected, action }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackAction {
    /// Play/pause; starts the selected entry if nothing is loaded.
    TogglePlayback,
    Next,
    Previous,
    /// Seek relative to the current position, in seconds.
    SeekBy(i64),
    /// Change the volume by this much, clamped to 0.0..=1.0.
    AdjustVolume(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackUpdate {
    TrackStarted(usize),
    StateChanged(PlaybackState),
    Position {
        index: usize,
        position: Duration,
        duration: Duration,
    },
    Volume(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    Playing,
    Paused,
    #[default]
    Stopped,
}
impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Stopped => "Stopped",
        }
    }
}
impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
enum PlaybackMessage {
    Request(PlaybackRequest),
    Shutdown,
}

/// Transport state for the entries of a catalog. Keeps time, tracks what is
/// loaded and reports changes; it does not produce any sound.
#[derive(Debug, Clone)]
pub struct Transport {
    durations: Vec<Duration>,
    loaded: Option<usize>,
    state: PlaybackState,
    position: Duration,
    volume: f32,
}
impl Transport {
    pub fn new(durations: Vec<Duration>, volume: f32) -> Self {
        Self {
            durations,
            loaded: None,
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn loaded(&self) -> Option<usize> {
        self.loaded
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn handle(&mut self, request: PlaybackRequest) -> Vec<PlaybackUpdate> {
        let mut updates = Vec::new();
        match request.action {
            PlaybackAction::TogglePlayback => match (self.loaded, self.state) {
                (Some(_), PlaybackState::Playing) => {
                    self.set_state(PlaybackState::Paused, &mut updates);
                }
                (Some(_), PlaybackState::Paused) => {
                    self.set_state(PlaybackState::Playing, &mut updates);
                }
                _ => self.start(request.selected, &mut updates),
            },
            PlaybackAction::Next => {
                let base = self.loaded.unwrap_or(request.selected);
                if base + 1 < self.durations.len() {
                    self.start(base + 1, &mut updates);
                }
            }
            PlaybackAction::Previous => {
                let base = self.loaded.unwrap_or(request.selected);
                if self.loaded.is_some() && self.position > RESTART_THRESHOLD {
                    self.start(base, &mut updates);
                } else {
                    self.start(base.saturating_sub(1), &mut updates);
                }
            }
            PlaybackAction::SeekBy(seconds) => {
                if let Some(index) = self.loaded {
                    let delta = Duration::from_secs(seconds.unsigned_abs());
                    let position = if seconds >= 0 {
                        self.position + delta
                    } else {
                        self.position.saturating_sub(delta)
                    };
                    self.position = position.min(self.durations[index]);
                    updates.push(self.position_update(index));
                }
            }
            PlaybackAction::AdjustVolume(delta) => {
                self.volume = (self.volume + delta).clamp(0.0, 1.0);
                updates.push(PlaybackUpdate::Volume(self.volume));
            }
        }
        updates
    }

    /// Moves the clock forward by `elapsed`. Only whole-second changes are
    /// reported.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<PlaybackUpdate> {
        let mut updates = Vec::new();
        let Some(index) = self.loaded else {
            return updates;
        };
        if self.state != PlaybackState::Playing {
            return updates;
        }

        let before = self.position.as_secs();
        let duration = self.durations[index];
        self.position = (self.position + elapsed).min(duration);

        if self.position >= duration {
            if index + 1 < self.durations.len() {
                self.start(index + 1, &mut updates);
            } else {
                updates.push(self.position_update(index));
                self.set_state(PlaybackState::Stopped, &mut updates);
            }
        } else if self.position.as_secs() != before {
            updates.push(self.position_update(index));
        }
        updates
    }

    fn start(&mut self, index: usize, updates: &mut Vec<PlaybackUpdate>) {
        if index >= self.durations.len() {
            tracing::warn!(index, "ignoring playback request for a missing entry");
            return;
        }
        self.loaded = Some(index);
        self.position = Duration::ZERO;
        updates.push(PlaybackUpdate::TrackStarted(index));
        self.set_state(PlaybackState::Playing, updates);
        updates.push(self.position_update(index));
    }

    fn set_state(&mut self, state: PlaybackState, updates: &mut Vec<PlaybackUpdate>) {
        if self.state != state {
            self.state = state;
            updates.push(PlaybackUpdate::StateChanged(state));
        }
    }

    fn position_update(&self, index: usize) -> PlaybackUpdate {
        PlaybackUpdate::Position {
            index,
            position: self.position,
            duration: self.durations[index],
        }
    }
}

/// Runs a [`Transport`] on its own thread. Requests go in over one channel
/// and updates come back over another, so the UI never blocks on playback.
pub struct PlaybackThread {
    send_handle: PlaybackThreadSendHandle,
    playback_thread_handle: Option<std::thread::JoinHandle<()>>,
    playback_update_rx: Option<PlaybackUpdateRx>,
}

impl PlaybackThread {
    pub fn new(durations: Vec<Duration>, volume: f32) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<PlaybackMessage>();
        let (update_tx, update_rx) = mpsc::channel::<PlaybackUpdate>();

        let transport = Transport::new(durations, volume);
        let playback_thread_handle = std::thread::spawn(move || {
            Self::run(transport, request_rx, update_tx);
        });

        Self {
            send_handle: PlaybackThreadSendHandle(request_tx),
            playback_thread_handle: Some(playback_thread_handle),
            playback_update_rx: Some(update_rx),
        }
    }

    pub fn send(&self, request: PlaybackRequest) {
        self.send_handle.send(request);
    }

    /// Takes the update receiver. There is a single consumer, so this returns
    /// `None` after the first call.
    pub fn take_updates(&mut self) -> Option<PlaybackUpdateRx> {
        self.playback_update_rx.take()
    }

    fn run(
        mut transport: Transport,
        request_rx: mpsc::Receiver<PlaybackMessage>,
        update_tx: mpsc::Sender<PlaybackUpdate>,
    ) {
        let mut last_tick = Instant::now();

        loop {
            let updates = match request_rx.recv_timeout(TICK) {
                Ok(PlaybackMessage::Request(request)) => transport.handle(request),
                Ok(PlaybackMessage::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => Vec::new(),
            };

            let now = Instant::now();
            let elapsed = now.duration_since(last_tick);
            last_tick = now;

            for update in updates.into_iter().chain(transport.advance(elapsed)) {
                if update_tx.send(update).is_err() {
                    // Nobody is listening any more.
                    return;
                }
            }
        }
        tracing::debug!("playback thread shutting down");
    }
}

impl Drop for PlaybackThread {
    fn drop(&mut self) {
        let _ = self.send_handle.0.send(PlaybackMessage::Shutdown);
        if let Some(handle) = self.playback_thread_handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn transport() -> Transport {
        Transport::new(vec![secs(10), secs(20), secs(30)], 0.5)
    }

    fn request(selected: usize, action: PlaybackAction) -> PlaybackRequest {
        PlaybackRequest::new(selected, action)
    }

    #[test]
    fn toggle_starts_selected_entry() {
        let mut t = transport();
        let updates = t.handle(request(1, PlaybackAction::TogglePlayback));
        assert_eq!(
            updates,
            vec![
                PlaybackUpdate::TrackStarted(1),
                PlaybackUpdate::StateChanged(PlaybackState::Playing),
                PlaybackUpdate::Position {
                    index: 1,
                    position: Duration::ZERO,
                    duration: secs(20),
                },
            ]
        );
        assert_eq!(t.loaded(), Some(1));
    }

    #[test]
    fn toggle_pauses_and_resumes_loaded_entry() {
        let mut t = transport();
        t.handle(request(0, PlaybackAction::TogglePlayback));

        // The selection moving doesn't change what is loaded.
        let updates = t.handle(request(2, PlaybackAction::TogglePlayback));
        assert_eq!(
            updates,
            vec![PlaybackUpdate::StateChanged(PlaybackState::Paused)]
        );
        assert!(t.advance(secs(5)).is_empty());
        assert_eq!(t.position(), Duration::ZERO);

        t.handle(request(2, PlaybackAction::TogglePlayback));
        assert_eq!(t.state(), PlaybackState::Playing);
        assert_eq!(t.loaded(), Some(0));
    }

    #[test]
    fn advance_reports_whole_seconds() {
        let mut t = transport();
        t.handle(request(0, PlaybackAction::TogglePlayback));

        assert!(t.advance(Duration::from_millis(400)).is_empty());
        assert_eq!(
            t.advance(Duration::from_millis(700)),
            vec![PlaybackUpdate::Position {
                index: 0,
                position: Duration::from_millis(1100),
                duration: secs(10),
            }]
        );
    }

    #[test]
    fn advance_rolls_over_to_next_entry() {
        let mut t = transport();
        t.handle(request(0, PlaybackAction::TogglePlayback));
        let updates = t.advance(secs(11));
        assert_eq!(updates[0], PlaybackUpdate::TrackStarted(1));
        assert_eq!(t.loaded(), Some(1));
        assert_eq!(t.position(), Duration::ZERO);
    }

    #[test]
    fn advance_stops_after_last_entry() {
        let mut t = transport();
        t.handle(request(2, PlaybackAction::TogglePlayback));
        let updates = t.advance(secs(31));
        assert_eq!(
            updates.last(),
            Some(&PlaybackUpdate::StateChanged(PlaybackState::Stopped))
        );
        assert_eq!(t.position(), secs(30));

        // Play again restarts the selected entry.
        t.handle(request(0, PlaybackAction::TogglePlayback));
        assert_eq!(t.loaded(), Some(0));
        assert_eq!(t.state(), PlaybackState::Playing);
    }

    #[test]
    fn next_and_previous() {
        let mut t = transport();
        // Nothing loaded: relative to the selection.
        t.handle(request(0, PlaybackAction::Next));
        assert_eq!(t.loaded(), Some(1));

        t.handle(request(0, PlaybackAction::Next));
        assert_eq!(t.loaded(), Some(2));
        assert!(t.handle(request(0, PlaybackAction::Next)).is_empty());
        assert_eq!(t.loaded(), Some(2));

        t.handle(request(0, PlaybackAction::Previous));
        assert_eq!(t.loaded(), Some(1));

        // Far enough in, previous restarts the track.
        t.advance(secs(5));
        t.handle(request(0, PlaybackAction::Previous));
        assert_eq!(t.loaded(), Some(1));
        assert_eq!(t.position(), Duration::ZERO);
    }

    #[test]
    fn seek_is_clamped() {
        let mut t = transport();
        assert!(t.handle(request(0, PlaybackAction::SeekBy(5))).is_empty());

        t.handle(request(0, PlaybackAction::TogglePlayback));
        t.handle(request(0, PlaybackAction::SeekBy(-5)));
        assert_eq!(t.position(), Duration::ZERO);
        t.handle(request(0, PlaybackAction::SeekBy(7)));
        assert_eq!(t.position(), secs(7));
        t.handle(request(0, PlaybackAction::SeekBy(100)));
        assert_eq!(t.position(), secs(10));
    }

    #[test]
    fn volume_is_clamped() {
        let mut t = transport();
        assert_eq!(
            t.handle(request(0, PlaybackAction::AdjustVolume(0.25))),
            vec![PlaybackUpdate::Volume(0.75)]
        );
        t.handle(request(0, PlaybackAction::AdjustVolume(1.0)));
        assert_eq!(t.volume(), 1.0);
        t.handle(request(0, PlaybackAction::AdjustVolume(-3.0)));
        assert_eq!(t.volume(), 0.0);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut t = Transport::new(Vec::new(), 1.0);
        assert!(
            t.handle(request(0, PlaybackAction::TogglePlayback))
                .is_empty()
        );
        assert_eq!(t.loaded(), None);
    }

    #[test]
    fn thread_streams_updates() {
        let mut thread = PlaybackThread::new(vec![secs(60)], 1.0);
        let rx = thread.take_updates().unwrap();
        assert!(thread.take_updates().is_none());

        thread.send(request(0, PlaybackAction::TogglePlayback));
        let first = rx.recv_timeout(secs(5)).unwrap();
        assert_eq!(first, PlaybackUpdate::TrackStarted(0));

        drop(thread);
    }

    #[test]
    fn drop_shuts_the_thread_down() {
        let mut thread = PlaybackThread::new(vec![secs(60)], 1.0);
        let rx = thread.take_updates().unwrap();
        drop(thread);

        // The thread has been joined, so its sender is gone.
        assert!(rx.recv_timeout(secs(5)).is_err());
    }
}
