use std::time::Duration;

use smol_str::SmolStr;

use crate::util;

/// One media entry, as `lark` cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry title
    pub title: SmolStr,
    /// The performing artist
    pub artist: SmolStr,
    /// The duration in milliseconds
    pub duration_millis: u64,
}
impl Entry {
    pub fn new(title: impl Into<SmolStr>, artist: impl Into<SmolStr>, duration_millis: u64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration_millis,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_millis)
    }

    /// The duration as "H:MM:SS", or "M:SS" when under an hour.
    pub fn duration_string(&self) -> String {
        util::millis_to_hms_string(self.duration_millis)
    }
}
impl<T: Into<SmolStr>, A: Into<SmolStr>> From<(T, A, u64)> for Entry {
    fn from((title, artist, duration_millis): (T, A, u64)) -> Self {
        Entry::new(title, artist, duration_millis)
    }
}

/// The ordered, immutable list of entries for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}
impl Catalog {
    /// Builds a catalog from raw entries, preserving their order.
    pub fn build<E: Into<Entry>>(raw: impl IntoIterator<Item = E>) -> Self {
        Self {
            entries: raw.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Entries in `start..end`, clipped to the catalog bounds.
    pub fn slice(&self, start: usize, end: usize) -> &[Entry] {
        let end = end.min(self.entries.len());
        let start = start.min(end);
        &self.entries[start..end]
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.entries.iter().map(Entry::duration).collect()
    }

    /// The numbered display label for the entry at `index`, truncated for a
    /// terminal `width` columns wide.
    pub fn label(&self, index: usize, width: u16) -> Option<String> {
        let entry = self.entries.get(index)?;
        Some(util::truncate_with_ellipsis(
            &format!("{}. {}", index + 1, entry.title),
            label_width(width),
        ))
    }
}
impl From<Vec<Entry>> for Catalog {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

/// The widest a numbered title may be before it gets an ellipsis.
pub fn label_width(width: u16) -> usize {
    (width as usize / 3).saturating_sub(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::build([
            Entry::new("Intro", "Band", 61_000),
            Entry::new("A Very Long Song Title That Exceeds Width", "Band", 3_725_000),
            Entry::new("Outro", "Other Band", 0),
        ])
    }

    #[test]
    fn build_preserves_order() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().title, "Intro");
        assert_eq!(catalog.get(2).unwrap().artist, "Other Band");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::build(Vec::<Entry>::new());
        assert!(catalog.is_empty());
        assert!(catalog.slice(0, 10).is_empty());
        assert!(catalog.label(0, 80).is_none());
    }

    #[test]
    fn slice_is_clipped() {
        let catalog = sample();
        assert_eq!(catalog.slice(1, 10).len(), 2);
        assert_eq!(catalog.slice(5, 10).len(), 0);
    }

    #[test]
    fn label_truncates_at_a_third_of_width_minus_ten() {
        let catalog = Catalog::build((0..12).map(|i| {
            let title = if i == 11 {
                "A Very Long Song Title That Exceeds Width".to_string()
            } else {
                format!("Song {i}")
            };
            Entry::new(title, "Artist", 1000)
        }));

        assert_eq!(label_width(60), 10);
        assert_eq!(catalog.label(11, 60).unwrap(), "12. A Very...");
        assert_eq!(catalog.label(0, 60).unwrap(), "1. Song 0");
        // Wider terminal, no truncation.
        assert_eq!(
            catalog.label(11, 240).unwrap(),
            "12. A Very Long Song Title That Exceeds Width"
        );
    }

    #[test]
    fn label_on_narrow_terminal_is_only_the_ellipsis() {
        let catalog = sample();
        assert_eq!(label_width(20), 0);
        assert_eq!(catalog.label(0, 20).unwrap(), "...");
    }

    #[test]
    fn duration_strings() {
        let catalog = sample();
        assert_eq!(catalog.get(0).unwrap().duration_string(), "1:01");
        assert_eq!(catalog.get(1).unwrap().duration_string(), "1:02:05");
        assert_eq!(catalog.get(2).unwrap().duration_string(), "0:00");
    }
}
