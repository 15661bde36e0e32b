//! Text helper commands.
//!
//! Each command returns the text to print so the rendering can be tested
//! without capturing stdout.

use std::path::Path;

use serde::Serialize;
use tgkit_core::{
    DateTimeNormalizer, ResolvedLink, bytes_from_str, format_byte, render_progress_bar,
    resolve_link, sanitize_title, truncate_filename,
};

use crate::error::{CliError, CliResult};

/// Output shape chosen by the `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Plain,
    Json,
}

impl Output {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Plain }
    }
}

/// Normalizes every date/time in `text`, or shows only the first match.
pub fn dates(text: &str, format: &str, first: bool, output: Output) -> CliResult<String> {
    let normalizer = DateTimeNormalizer::new(format)?;

    if first {
        let found = normalizer.find_first(text);
        return match output {
            Output::Json => Ok(serde_json::to_string_pretty(&found)?),
            Output::Plain if found.matched => Ok(format!(
                "value: {}\nleft: {:?}\nright: {:?}",
                found.value, found.left_text, found.right_text
            )),
            Output::Plain => Ok("no date/time found".to_string()),
        };
    }

    let normalized = normalizer.normalize_all(text);
    match output {
        Output::Json => json_value(&serde_json::json!({ "text": normalized })),
        Output::Plain => Ok(normalized),
    }
}

/// Decodes a message link.
pub fn link(link: &str, output: Output) -> CliResult<String> {
    let resolved = resolve_link(link)?;
    match output {
        Output::Json => json_value(&resolved),
        Output::Plain => Ok(render_link(&resolved)),
    }
}

/// Formats a byte count.
pub fn format_size(size: f64, precision: u32, output: Output) -> CliResult<String> {
    let formatted = format_byte(size, precision)?;
    match output {
        Output::Json => json_value(&serde_json::json!({ "bytes": size, "formatted": formatted })),
        Output::Plain => Ok(formatted),
    }
}

/// Parses a leading size token.
pub fn parse_size(text: &str, output: Output) -> CliResult<String> {
    let bytes = bytes_from_str(text).ok_or_else(|| {
        CliError::InvalidInput(format!("{text:?} does not start with a size such as 10MB"))
    })?;
    match output {
        Output::Json => json_value(&serde_json::json!({ "bytes": bytes })),
        Output::Plain => Ok(bytes.to_string()),
    }
}

/// Shortens a file name to `limit` bytes.
pub fn filename(path: &Path, limit: usize, output: Output) -> CliResult<String> {
    let truncated = truncate_filename(path, limit);
    match output {
        Output::Json => json_value(&serde_json::json!({ "path": truncated })),
        Output::Plain => Ok(truncated.display().to_string()),
    }
}

/// Sanitizes a chat title.
pub fn title(title: &str, collapse: bool, output: Output) -> CliResult<String> {
    let sanitized = sanitize_title(title, collapse);
    match output {
        Output::Json => json_value(&serde_json::json!({ "title": sanitized })),
        Output::Plain => Ok(sanitized),
    }
}

/// Renders a progress bar.
pub fn progress(percent: f64, width: usize, output: Output) -> CliResult<String> {
    let bar = render_progress_bar(percent, width);
    match output {
        Output::Json => json_value(&serde_json::json!({ "percent": percent, "bar": bar })),
        Output::Plain => Ok(format!("[{}] ({}%)", bar, percent)),
    }
}

fn json_value<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render_link(link: &ResolvedLink) -> String {
    fn field<T: ToString>(value: Option<&T>) -> String {
        value.map_or_else(|| "-".to_string(), ToString::to_string)
    }

    [
        format!("group_id: {}", field(link.group_id.as_ref())),
        format!("topic_id: {}", field(link.topic_id.as_ref())),
        format!("post_id: {}", field(link.post_id.as_ref())),
        format!("comment_id: {}", field(link.comment_id.as_ref())),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgkit_core::DEFAULT_OUTPUT_FORMAT;

    mod dates {
        use super::*;

        #[test]
        fn normalizes_plain() {
            let out = dates(
                "meeting on 2013.8.15 22:46:21 room A",
                DEFAULT_OUTPUT_FORMAT,
                false,
                Output::Plain,
            )
            .unwrap();
            assert_eq!(out, "meeting on 2013-08-15 22:46:21 room A");
        }

        #[test]
        fn first_match_plain() {
            let out = dates("due 2024/3/9 noon", "%Y-%m-%d", true, Output::Plain).unwrap();
            insta::assert_snapshot!(out, @r#"
            value: 2024-03-09
            left: "due "
            right: " noon"
            "#);
        }

        #[test]
        fn first_match_json() {
            let out = dates("due 2024/3/9", "%Y-%m-%d", true, Output::Json).unwrap();
            insta::assert_snapshot!(out, @r#"
            {
              "value": "2024-03-09",
              "left_text": "due ",
              "right_text": "",
              "matched": true
            }
            "#);
        }

        #[test]
        fn no_match_plain() {
            let out = dates("nothing", DEFAULT_OUTPUT_FORMAT, true, Output::Plain).unwrap();
            assert_eq!(out, "no date/time found");
        }

        #[test]
        fn bad_format_is_an_error() {
            let err = dates("2020.1.2", "%Q", false, Output::Plain).unwrap_err();
            assert!(matches!(err, CliError::DateTime(_)));
        }
    }

    mod link {
        use super::*;

        #[test]
        fn channel_post_plain() {
            let out = link("https://t.me/c/123456789/42", Output::Plain).unwrap();
            insta::assert_snapshot!(out, @r"
            group_id: -100123456789
            topic_id: -
            post_id: 42
            comment_id: -
            ");
        }

        #[test]
        fn handle_json() {
            let out = link("https://t.me/durov", Output::Json).unwrap();
            insta::assert_snapshot!(out, @r#"
            {
              "group_id": "durov",
              "post_id": null,
              "comment_id": null,
              "topic_id": null
            }
            "#);
        }

        #[test]
        fn invalid_number_is_an_error() {
            let err = link("https://t.me/durov/abc", Output::Plain).unwrap_err();
            assert_eq!(
                err.to_string(),
                "invalid link: invalid post_id in link: \"abc\" is not an integer"
            );
        }
    }

    mod sizes {
        use super::*;

        #[test]
        fn format_plain() {
            assert_eq!(format_size(1536.0, 2, Output::Plain).unwrap(), "1.5KB");
        }

        #[test]
        fn format_negative_is_an_error() {
            assert!(format_size(-1.0, 2, Output::Plain).is_err());
        }

        #[test]
        fn parse_plain() {
            assert_eq!(parse_size("10MB", Output::Plain).unwrap(), "10485760");
        }

        #[test]
        fn parse_json() {
            let out = parse_size("2KB", Output::Json).unwrap();
            insta::assert_snapshot!(out, @r#"
            {
              "bytes": 2048
            }
            "#);
        }

        #[test]
        fn parse_rejects_non_size() {
            let err = parse_size("ten megabytes", Output::Plain).unwrap_err();
            assert!(matches!(err, CliError::InvalidInput(_)));
        }
    }

    #[test]
    fn filename_plain() {
        let out = filename(Path::new("dl/abcdefgh.mp4"), 8, Output::Plain).unwrap();
        assert_eq!(out, Path::new("dl").join("abcd.mp4").display().to_string());
    }

    #[test]
    fn title_collapse() {
        assert_eq!(title("a/b:c*d", true, Output::Plain).unwrap(), "a_b_c_d");
    }

    #[test]
    fn progress_plain() {
        assert_eq!(progress(50.0, 4, Output::Plain).unwrap(), "[██░░] (50%)");
    }
}
