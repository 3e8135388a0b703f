//! The navigation state machine: which slice of the catalog is visible and
//! which entry in it is selected.
//!
//! All transitions are total. Anything that would move past an edge of the
//! catalog is absorbed as a no-op, and an empty catalog or a viewport with no
//! room for rows turns every transition into a no-op.

use std::ops::Range;

/// Rows taken up by everything that isn't the entry list: the list box's top
/// border and column header, its bottom border, the two-row player bar and the
/// status bar.
pub const CHROME_ROWS: usize = 6;

/// A single navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ScrollUp,
    ScrollDown,
    PageLeft,
    PageRight,
    /// The terminal is now `height` rows by `width` columns.
    Resize { height: u16, width: u16 },
    /// Select the entry at this absolute index, clamped to the catalog.
    JumpTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageDirection {
    Left,
    Right,
}

/// Positional state over a catalog of `len` entries.
///
/// `top` is the absolute index of the first visible entry and `current` is the
/// selected row relative to `top`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    current: usize,
    visible_rows: usize,
    len: usize,
    width: u16,
}

impl Viewport {
    /// Creates a viewport at the first entry for a terminal of the given size.
    pub fn new(len: usize, height: u16, width: u16) -> Self {
        let mut viewport = Self {
            top: 0,
            current: 0,
            visible_rows: 0,
            len,
            width,
        };
        viewport.resize(height, width);
        viewport
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of full pages; only used to bound paging.
    pub fn page_count(&self) -> usize {
        if self.visible_rows == 0 {
            0
        } else {
            self.len / self.visible_rows
        }
    }

    /// The page the selection is on.
    pub fn current_page(&self) -> usize {
        if self.visible_rows == 0 {
            0
        } else {
            (self.top + self.current) / self.visible_rows
        }
    }

    /// Absolute index of the selected entry, if there are any entries.
    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.top + self.current)
    }

    /// Absolute indices currently on screen.
    pub fn window(&self) -> Range<usize> {
        let end = (self.top + self.visible_rows).min(self.len);
        self.top.min(end)..end
    }

    /// True when there is nothing that could be navigated or drawn.
    pub fn is_degenerate(&self) -> bool {
        self.len == 0 || self.visible_rows == 0
    }

    /// Applies one event. Returns whether any positional state changed.
    pub fn apply(&mut self, event: NavEvent) -> bool {
        let changed = match event {
            NavEvent::ScrollUp => self.scroll_up(),
            NavEvent::ScrollDown => self.scroll_down(),
            NavEvent::PageLeft => self.page(PageDirection::Left),
            NavEvent::PageRight => self.page(PageDirection::Right),
            NavEvent::Resize { height, width } => self.resize(height, width),
            NavEvent::JumpTo(index) => self.jump_to(index),
        };
        tracing::debug!(
            ?event,
            changed,
            top = self.top,
            current = self.current,
            visible_rows = self.visible_rows,
            "navigation"
        );
        changed
    }

    fn scroll_up(&mut self) -> bool {
        if self.is_degenerate() {
            return false;
        }
        if self.top > 0 && self.current == 0 {
            self.top -= 1;
            true
        } else if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    fn scroll_down(&mut self) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let rows = self.visible_rows;
        if self.current + 1 == rows && self.top + rows < self.len {
            self.top += 1;
            true
        } else if self.current + 1 < rows && self.top + self.current + 1 < self.len {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn page(&mut self, direction: PageDirection) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let rows = self.visible_rows;
        let page_count = self.page_count();
        let current_page = self.current_page();

        let (next_page, next_top) = match direction {
            PageDirection::Left => {
                if current_page == 0 {
                    return false;
                }
                (current_page - 1, self.top.saturating_sub(rows))
            }
            PageDirection::Right => {
                // The new window must still start inside the catalog.
                if current_page >= page_count || self.top + rows >= self.len {
                    return false;
                }
                (current_page + 1, self.top + rows)
            }
        };

        // The last page may be short.
        let remainder = self.len % rows;
        if next_page == page_count && remainder > 0 {
            self.current = self.current.min(remainder - 1);
        }
        self.top = next_top;
        self.current = self.current.min(self.len - 1 - self.top);
        true
    }

    fn resize(&mut self, height: u16, width: u16) -> bool {
        let before = (self.top, self.current, self.visible_rows, self.width);

        self.width = width;
        self.visible_rows = (height as usize).saturating_sub(CHROME_ROWS);
        let rows = self.visible_rows;

        if self.len == 0 {
            self.top = 0;
            self.current = 0;
        } else {
            // Keep the same entry selected, sliding the window if the
            // selection would otherwise fall off the bottom.
            let selected = (self.top + self.current).min(self.len - 1);
            if rows == 0 {
                self.top = selected;
                self.current = 0;
            } else {
                self.top = self.top.min(selected);
                self.current = selected - self.top;
                if self.current >= rows {
                    self.current = rows - 1;
                    self.top = selected - self.current;
                }
            }
        }

        before != (self.top, self.current, self.visible_rows, self.width)
    }

    fn jump_to(&mut self, index: usize) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let rows = self.visible_rows;
        let target = index.min(self.len - 1);

        let (top, current) = if target < self.top {
            (target, 0)
        } else if target >= self.top + rows {
            (target + 1 - rows, rows - 1)
        } else {
            (self.top, target - self.top)
        };

        let changed = (top, current) != (self.top, self.current);
        self.top = top;
        self.current = current;
        changed
    }
}
