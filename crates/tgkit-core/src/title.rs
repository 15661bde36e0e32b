//! Chat title sanitization for use in file and directory names.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that are not allowed in file names on common filesystems.
static INVALID_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\n]"#).expect("Invalid title regex"));

/// Regex for runs of underscores.
static UNDERSCORE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid underscore regex"));

/// Replaces characters that cannot appear in a file name with `_`.
///
/// The replaced set is `/ \ : * ? " < > |` plus newline. With
/// `collapse_underscores`, every run of underscores (including ones already
/// in the title) becomes a single `_`.
///
/// # Example
///
/// ```
/// use tgkit_core::title::sanitize_title;
///
/// assert_eq!(sanitize_title("a/b:c*d", false), "a_b_c_d");
/// assert_eq!(sanitize_title("a//b", true), "a_b");
/// ```
pub fn sanitize_title(title: &str, collapse_underscores: bool) -> String {
    let replaced = INVALID_CHARS_REGEX.replace_all(title, "_");
    if collapse_underscores {
        UNDERSCORE_RUN_REGEX.replace_all(&replaced, "_").into_owned()
    } else {
        replaced.into_owned()
    }
}
