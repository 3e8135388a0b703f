//! What a renderer needs to repaint the browser after a transition.

use unicode_width::UnicodeWidthStr as _;

use crate::{
    Catalog, Entry, Viewport,
    util::{ELLIPSIS, pad_to_width, truncate_with_ellipsis},
};

/// Title drawn centred on the list box's top border.
pub const TITLE: &str = " Music Player ";

/// Separator between the title, artist and duration columns.
const COLUMN_SEPARATOR: &str = "   |   ";

/// Why there is nothing to show in the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No media entries were found.
    EmptyCatalog,
    /// The terminal has no room left for entry rows once the chrome is drawn.
    ViewportTooSmall,
}
impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::EmptyCatalog => "No media entries found",
            EmptyReason::ViewportTooSmall => "Terminal too small",
        }
    }
}

/// A single visible entry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// Absolute catalog index.
    pub index: usize,
    pub entry: &'a Entry,
    /// Numbered, width-truncated title.
    pub label: String,
    pub duration: String,
    pub highlighted: bool,
}
impl Row<'_> {
    /// The row as one line of text, padded to the list box's inner width.
    pub fn text(&self, width: u16) -> String {
        let third = width as usize / 3;
        let sixth = width as usize / 6;
        let artist_column = sixth.saturating_sub(3);
        let artist = if self.entry.artist.width() > artist_column {
            truncate_with_ellipsis(&self.entry.artist, artist_column.saturating_sub(ELLIPSIS.len()))
        } else {
            self.entry.artist.to_string()
        };

        let row = format!(
            "{}{COLUMN_SEPARATOR}{}{COLUMN_SEPARATOR}{}",
            pad_to_width(&self.label, third.saturating_sub(3)),
            pad_to_width(&artist, artist_column),
            self.duration,
        );
        pad_to_width(&row, inner_width(width))
    }
}

/// A read-only snapshot of everything the renderer draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub rows: Vec<Row<'a>>,
    /// Absolute index of the selected entry.
    pub selected: Option<usize>,
    /// Position of the highlighted row within `rows`.
    pub highlighted_row: Option<usize>,
    pub empty: Option<EmptyReason>,
    pub width: u16,
}
impl View<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_header(&self) -> String {
        column_header(self.width)
    }
}

impl Viewport {
    /// Builds the render snapshot for the current state. Labels are formatted
    /// here for the current width, so they always track the latest resize.
    pub fn view<'a>(&self, catalog: &'a Catalog) -> View<'a> {
        let width = self.width();
        let empty = if catalog.is_empty() {
            Some(EmptyReason::EmptyCatalog)
        } else if self.visible_rows() == 0 {
            Some(EmptyReason::ViewportTooSmall)
        } else {
            None
        };

        let window = self.window();
        let selected = self.selected();
        let rows: Vec<Row<'a>> = if empty.is_some() {
            Vec::new()
        } else {
            catalog
                .slice(window.start, window.end)
                .iter()
                .enumerate()
                .map(|(offset, entry)| {
                    let index = window.start + offset;
                    Row {
                        index,
                        entry,
                        label: catalog.label(index, width).unwrap_or_default(),
                        duration: entry.duration_string(),
                        highlighted: Some(index) == selected,
                    }
                })
                .collect()
        };
        let highlighted_row = rows.iter().position(|row| row.highlighted);

        View {
            rows,
            selected,
            highlighted_row,
            empty,
            width,
        }
    }
}

/// Column header aligned with [`Row::text`].
pub fn column_header(width: u16) -> String {
    let third = width as usize / 3;
    let sixth = width as usize / 6;
    let header = format!(
        "Title{}Artist{}Duration",
        " ".repeat(third.saturating_sub(1)),
        " ".repeat(sixth.saturating_sub(2)),
    );
    pad_to_width(&header, inner_width(width))
}

/// Status bar text showing the last requested song number.
pub fn status_line(song_number: &str) -> String {
    format!("q to exit:{song_number}")
}

/// Width inside the list box's borders.
fn inner_width(width: u16) -> usize {
    (width as usize).saturating_sub(2)
}
