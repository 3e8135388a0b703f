use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ── Main vertical layout ────────────────────────────────────────────────────

pub const PLAYER_BAR_HEIGHT: u16 = 2;
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// The column header inside the list box. With the box's two borders and the
/// player and status bars this makes up [`lark_core::CHROME_ROWS`].
pub const HEADER_HEIGHT: u16 = 1;

pub struct MainLayout {
    pub list: Rect,
    pub player_bar: Rect,
    pub status_bar: Rect,
}

pub fn split_main(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAYER_BAR_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    MainLayout {
        list: chunks[0],
        player_bar: chunks[1],
        status_bar: chunks[2],
    }
}

// ── List box ────────────────────────────────────────────────────────────────

pub struct ListLayout {
    pub header: Rect,
    pub rows: Rect,
}

/// Splits the inside of the list box into the column header and entry rows.
pub fn split_list(inner: Rect) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(inner);
    ListLayout {
        header: chunks[0],
        rows: chunks[1],
    }
}

// ── Logs view ───────────────────────────────────────────────────────────────

pub const PAGE_SCROLL_SIZE: usize = 20;
pub const LOG_TARGET_WIDTH: usize = 24;
pub const LOG_TARGET_SUFFIX_LEN: usize = 21;
