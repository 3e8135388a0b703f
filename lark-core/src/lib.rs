pub mod catalog;
pub mod util;
pub mod view;
pub mod viewport;

mod playback_thread;
pub use playback_thread::{
    PlaybackAction, PlaybackRequest, PlaybackState, PlaybackThread, PlaybackUpdate,
    PlaybackUpdateRx, Transport,
};

pub use catalog::{Catalog, Entry};
pub use view::{EmptyReason, Row, View};
pub use viewport::{CHROME_ROWS, NavEvent, Viewport};
