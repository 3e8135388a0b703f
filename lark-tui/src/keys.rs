use crossterm::event::{KeyCode, KeyEvent};
use lark_core::PlaybackState;
use smol_str::{SmolStr, ToSmolStr};

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PlayPause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBackward,
    JumpPrompt,
    Logs,
    MoveUp,
    MoveDown,
    PageLeft,
    PageRight,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    Select,
    Back,
    Char(char),
    DeleteChar,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_PLAY_PAUSE: KeyCode = KeyCode::Char(' ');
pub const KEY_NEXT: KeyCode = KeyCode::Char('n');
pub const KEY_PREVIOUS: KeyCode = KeyCode::Char('p');
pub const KEY_VOLUME_UP: KeyCode = KeyCode::Char('+');
pub const KEY_VOLUME_DOWN: KeyCode = KeyCode::Char('-');
pub const KEY_SEEK_FWD: KeyCode = KeyCode::Char('f');
pub const KEY_SEEK_BACK: KeyCode = KeyCode::Char('r');
pub const KEY_JUMP: KeyCode = KeyCode::Char(':');
pub const KEY_LOGS: KeyCode = KeyCode::Char('L');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_LEFT: KeyCode = KeyCode::Left;
pub const KEY_RIGHT: KeyCode = KeyCode::Right;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;
pub const KEY_DELETE_CHAR: KeyCode = KeyCode::Backspace;

impl Action {
    /// Label shown in the help hints. Returns `None` for actions that
    /// shouldn't appear (navigation, text input, etc.).
    pub fn help_label(&self, playback_state: PlaybackState) -> Option<(SmolStr, SmolStr)> {
        let (key, desc): (KeyCode, SmolStr) = match self {
            Action::Quit => (KEY_QUIT, "quit".into()),
            Action::PlayPause => {
                let label = if playback_state == PlaybackState::Playing {
                    "pause"
                } else {
                    "play"
                };
                (KEY_PLAY_PAUSE, label.into())
            }
            Action::Next => (KEY_NEXT, "next".into()),
            Action::Previous => (KEY_PREVIOUS, "prev".into()),
            Action::VolumeUp => (KEY_VOLUME_UP, "vol+".into()),
            Action::VolumeDown => (KEY_VOLUME_DOWN, "vol-".into()),
            Action::SeekForward => (KEY_SEEK_FWD, "seek+".into()),
            Action::SeekBackward => (KEY_SEEK_BACK, "seek-".into()),
            Action::JumpPrompt => (KEY_JUMP, "jump".into()),
            Action::Logs => (KEY_LOGS, "logs".into()),
            Action::Back => (KEY_BACK, "close".into()),
            _ => return None,
        };
        let key_str: SmolStr = match key {
            KeyCode::Char(' ') => "space".into(),
            KeyCode::Char(c) => c.to_smolstr(),
            other => other.to_smolstr().to_lowercase().into(),
        };
        Some((key_str, desc))
    }
}

/// Resolve a key event into an action in library context.
pub fn library_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_PLAY_PAUSE => Some(Action::PlayPause),
        KEY_NEXT => Some(Action::Next),
        KEY_PREVIOUS => Some(Action::Previous),
        KEY_VOLUME_UP => Some(Action::VolumeUp),
        KEY_VOLUME_DOWN => Some(Action::VolumeDown),
        KEY_SEEK_FWD => Some(Action::SeekForward),
        KEY_SEEK_BACK => Some(Action::SeekBackward),
        KEY_JUMP => Some(Action::JumpPrompt),
        KEY_LOGS => Some(Action::Logs),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_LEFT => Some(Action::PageLeft),
        KEY_RIGHT => Some(Action::PageRight),
        _ => None,
    }
}

/// Resolve a key event into an action while the song-number prompt is open.
/// Only digits are accepted as input.
pub fn prompt_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK => Some(Action::Back),
        KEY_SELECT => Some(Action::Select),
        KEY_DELETE_CHAR => Some(Action::DeleteChar),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::Char(c)),
        _ => None,
    }
}

/// Resolve a key event into an action in logs context.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_LOGS | KEY_QUIT => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Ordered list of actions to show in the logs panel's title.
pub const LOGS_HELP: &[Action] = &[Action::Back];

/// Ordered list of actions to show in the player bar.
pub const PLAYER_HELP: &[Action] = &[
    Action::PlayPause,
    Action::Previous,
    Action::Next,
    Action::SeekBackward,
    Action::SeekForward,
    Action::VolumeDown,
    Action::VolumeUp,
    Action::JumpPrompt,
    Action::Logs,
];
