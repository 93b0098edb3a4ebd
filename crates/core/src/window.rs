//! Windowing over a filtered list
//!
//! The window is the prefix of the filtered list that is currently rendered.

use serde::Serialize;

/// Rendered prefix of a list plus whether anything is left past it.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Window<'a, T> {
    pub shown: &'a [T],
    pub has_more: bool,
}

/// Take the first `min(visible_count, filtered.len())` elements.
///
/// `visible_count` is unsigned, so a negative count cannot be expressed.
pub fn window<T>(filtered: &[T], visible_count: usize) -> Window<'_, T> {
    let end = visible_count.min(filtered.len());

    Window {
        shown: &filtered[..end],
        has_more: visible_count < filtered.len(),
    }
}

/// Window metadata used for JSON output and navigation hints
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WindowInfo {
    pub shown: usize,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
    pub next_window_command: Option<String>,
}

/// Build window metadata for a one-shot listing.
///
/// `command_base` is the command that produced the listing; when more rows
/// remain, the hint repeats it with a larger `--limit`.
pub fn window_info(
    total_matches: usize,
    visible_count: usize,
    chunk_size: usize,
    command_base: &str,
) -> WindowInfo {
    let shown = visible_count.min(total_matches);
    let has_more = visible_count < total_matches;

    let next_window_command = if has_more {
        let next = (visible_count + chunk_size).min(total_matches);
        Some(format!("{command_base} --limit {next}"))
    } else {
        None
    };

    WindowInfo {
        shown,
        total_matches,
        visible_count,
        has_more,
        next_window_command,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shorter_than_count() {
        let filtered = vec!["Chile", "China"];

        let w = window(&filtered, 20);

        assert_eq!(w.shown, &["Chile", "China"]);
        assert!(!w.has_more);
    }

    #[test]
    fn test_window_longer_than_count() {
        let filtered: Vec<usize> = (0..45).collect();

        let w = window(&filtered, 20);

        assert_eq!(w.shown.len(), 20);
        assert_eq!(w.shown[19], 19);
        assert!(w.has_more);
    }

    #[test]
    fn test_window_exact_fit_has_no_more() {
        let filtered: Vec<usize> = (0..40).collect();

        let w = window(&filtered, 40);

        assert_eq!(w.shown.len(), 40);
        assert!(!w.has_more);
    }

    #[test]
    fn test_window_zero_count() {
        let filtered = vec![1, 2, 3];

        let w = window(&filtered, 0);

        assert!(w.shown.is_empty());
        assert!(w.has_more);
    }

    #[test]
    fn test_window_empty_list() {
        let filtered: Vec<u8> = Vec::new();

        let w = window(&filtered, 20);

        assert!(w.shown.is_empty());
        assert!(!w.has_more);
    }

    #[test]
    fn test_window_length_law() {
        for len in [0usize, 1, 19, 20, 21, 45] {
            let filtered: Vec<usize> = (0..len).collect();
            for count in [0usize, 1, 20, 40, 60] {
                let w = window(&filtered, count);
                assert_eq!(w.shown.len(), count.min(len));
                assert_eq!(w.has_more, count < len);
            }
        }
    }

    #[test]
    fn test_window_info_with_more() {
        let info = window_info(45, 20, 20, "countries list");

        assert_eq!(info.shown, 20);
        assert!(info.has_more);
        assert_eq!(
            info.next_window_command.as_deref(),
            Some("countries list --limit 40")
        );
    }

    #[test]
    fn test_window_info_clamps_next_limit() {
        let info = window_info(45, 40, 20, "countries list --search a");

        assert_eq!(
            info.next_window_command.as_deref(),
            Some("countries list --search a --limit 45")
        );
    }

    #[test]
    fn test_window_info_exhausted() {
        let info = window_info(2, 20, 20, "countries list");

        assert_eq!(info.shown, 2);
        assert!(!info.has_more);
        assert!(info.next_window_command.is_none());
    }
}
