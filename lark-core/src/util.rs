use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

/// Marker appended to labels that were cut short.
pub const ELLIPSIS: &str = "...";

/// Convert a number of milliseconds to a string in the format "H:MM:SS".
/// If the number of hours is 0, it will be omitted.
pub fn millis_to_hms_string(millis: u64) -> String {
    let total_seconds = millis / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Cuts `text` down to at most `max_width` display columns, appending
/// [`ELLIPSIS`] if anything was removed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::with_capacity(max_width + ELLIPSIS.len());
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Pads `text` with spaces on the right until it is `width` columns wide.
/// Text that is already wider is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_hms_string() {
        // Test with hours
        assert_eq!(millis_to_hms_string(3_661_000), "1:01:01");
        assert_eq!(millis_to_hms_string(7_323_000), "2:02:03");
        assert_eq!(millis_to_hms_string(3_600_000), "1:00:00");

        // Test without hours
        assert_eq!(millis_to_hms_string(61_000), "1:01");
        assert_eq!(millis_to_hms_string(123_000), "2:03");
        assert_eq!(millis_to_hms_string(60_000), "1:00");

        // Sub-second remainders are dropped
        assert_eq!(millis_to_hms_string(0), "0:00");
        assert_eq!(millis_to_hms_string(999), "0:00");
        assert_eq!(millis_to_hms_string(59_999), "0:59");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exactly10!", 10), "exactly10!");
        assert_eq!(
            truncate_with_ellipsis("12. A Very Long Song Title That Exceeds Width", 10),
            "12. A Very..."
        );
        assert_eq!(truncate_with_ellipsis("anything", 0), "...");
    }

    #[test]
    fn test_truncate_counts_display_columns() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_with_ellipsis("日本語の歌", 5), "日本...");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
        assert_eq!(pad_to_width("", 0), "");
    }
}
