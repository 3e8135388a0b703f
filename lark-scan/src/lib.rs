//! Builds catalog entries from the media files in a directory.

use std::path::Path;

use anyhow::{Context, Result};
use lark_core::Entry;
use lofty::{
    file::{AudioFile, TaggedFileExt},
    read_from_path,
    tag::Accessor,
};
use walkdir::WalkDir;

/// Extensions treated as media files when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "aac", "ogg", "wav", "wma", "mp4"];

/// Artist shown for files without an artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Lower-case extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Descend into subdirectories instead of only listing the top level.
    pub recursive: bool,
}
impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
        }
    }
}
impl ScanOptions {
    fn matches(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Scans `directory` for media files, ordered by path.
///
/// Files whose metadata can't be read, and subdirectories that can't be
/// listed, are logged and left out; only a missing or unreadable `directory`
/// is an error.
pub fn scan_directory(directory: &Path, options: &ScanOptions) -> Result<Vec<Entry>> {
    let metadata = std::fs::metadata(directory)
        .with_context(|| format!("Failed to read directory {}", directory.display()))?;
    anyhow::ensure!(
        metadata.is_dir(),
        "{} is not a directory",
        directory.display()
    );

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for dir_entry in WalkDir::new(directory)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let dir_entry = match dir_entry {
            Ok(dir_entry) => dir_entry,
            Err(e) if e.depth() == 0 => {
                return Err(e)
                    .with_context(|| format!("Failed to list directory {}", directory.display()));
            }
            Err(e) => {
                skipped += 1;
                let path = e.path().unwrap_or(directory).to_path_buf();
                tracing::warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        if !dir_entry.file_type().is_file() {
            continue;
        }

        let path = dir_entry.path();
        if !options.matches(path) {
            continue;
        }

        match read_entry(path) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping {}: {e:#}", path.display());
            }
        }
    }

    tracing::info!(
        found = entries.len(),
        skipped,
        "scanned {}",
        directory.display()
    );
    Ok(entries)
}

/// Reads the title, artist and duration of a single media file.
pub fn read_entry(path: &Path) -> Result<Entry> {
    let tagged_file = read_from_path(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let duration = tagged_file.properties().duration();

    // Get the primary tag or first available tag
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .with_context(|| format!("No usable title for {}", path.display()))?;

    let artist = tag
        .and_then(|t| t.artist())
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    Ok(Entry::new(
        title,
        artist,
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
    ))
}
