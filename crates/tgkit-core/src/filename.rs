//! Filename truncation for filesystems with byte-length limits.

use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Default byte limit for a file name (stem plus extension).
pub const DEFAULT_FILENAME_LIMIT: usize = 230;

/// Shortens the file name stem so the name fits in `byte_limit` UTF-8 bytes.
///
/// The path is normalized lexically first (`.` segments dropped, `..`
/// folded into its parent), then only the stem is cut; the directory and the
/// extension are kept. The stem is NFC-normalized first, and a cut that would land inside a
/// multi-byte character drops that character entirely. Paths without a file
/// name component are returned unchanged.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tgkit_core::filename::truncate_filename;
///
/// let path = truncate_filename("downloads/abcdefgh.mp4", 8);
/// assert_eq!(path, PathBuf::from("downloads/abcd.mp4"));
/// ```
pub fn truncate_filename(path: impl AsRef<Path>, byte_limit: usize) -> PathBuf {
    let path = normalize_lexically(path.as_ref());
    let path = path.as_path();
    let Some(stem) = path.file_stem() else {
        return path.to_path_buf();
    };

    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let stem: String = stem.to_string_lossy().nfc().collect();

    let max_stem = byte_limit.saturating_sub(extension.len());
    let truncated = truncate_at_char_boundary(&stem, max_stem);
    if truncated.len() < stem.len() {
        tracing::debug!(
            path = %path.display(),
            from = stem.len(),
            to = truncated.len(),
            "truncated file name stem"
        );
    }

    let file_name = format!("{truncated}{extension}");
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Resolves `.` and `..` segments without touching the filesystem.
///
/// A `..` that cannot be folded is kept on relative paths and dropped at the
/// root. An empty result becomes `.`.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Returns the longest prefix of `s` that is at most `max_bytes` long and
/// ends on a character boundary.
fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
