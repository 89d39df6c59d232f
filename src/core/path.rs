//! Lexical path cleanup for frame text
//!
//! Only path-like runs inside a frame are rewritten; line numbers, method
//! names and messages pass through untouched. Nothing here touches the
//! filesystem.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// An optional root followed by at least two separated segments
static PATH_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[/\\]*[\w.\-]+(?:[/\\]+[\w.\-]+)+").expect("Failed to compile path regex")
});

/// Clean every path-like run inside `text`
pub fn clean_within(text: &str) -> String {
    PATH_LIKE
        .replace_all(text, |caps: &Captures| clean_path(&caps[0]))
        .into_owned()
}

/// Normalize one path lexically.
///
/// Separators become `/` and collapse, `.` segments go away, `dir/..` pairs
/// resolve. `..` cannot climb above the root of an absolute path.
pub fn clean_path(path: &str) -> String {
    path_clean::clean(path.replace('\\', "/"))
        .to_string_lossy()
        .replace('\\', "/")
}
