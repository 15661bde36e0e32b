//! Date/time token normalization for free text.
//!
//! Finds date and time substrings written with `-`, `/` or `.` separators and
//! rewrites them in a single canonical format, leaving the rest of the text
//! alone (apart from whitespace runs, which collapse to one space once a token
//! is found).
//!
//! # Example
//!
//! ```
//! use tgkit_core::datetime::normalize_date_times;
//!
//! let text = "meeting on 2013.8.15 22:46:21 room A";
//! assert_eq!(normalize_date_times(text), "meeting on 2013-08-15 22:46:21 room A");
//! ```

use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DateTimeError;

/// The canonical output format (`YYYY-MM-DD HH:MM:SS`).
pub const DEFAULT_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Regex for collapsing whitespace runs.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// chrono encodes a leap second (`:60`) as a nanosecond count past one second.
const LEAP_SECOND_NANOS: u32 = 1_000_000_000;

/// Candidate patterns, most specific first.
///
/// The order matters: the first pattern that matches anywhere in the text
/// wins, even if a later pattern would match earlier in the string.
static DATE_PATTERNS: LazyLock<[DatePattern; 4]> = LazyLock::new(|| {
    [
        // 2013.8.15 22:46:21
        DatePattern::new(
            r"[0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2} +[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}",
            Precision::Second,
        ),
        // 2013.8.15 22:46
        DatePattern::new(
            r"[0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2} +[0-9]{1,2}:[0-9]{1,2}",
            Precision::Minute,
        ),
        // 2014.5.11
        DatePattern::new(r"[0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2}", Precision::Day),
        // 2014.5
        DatePattern::new(r"[0-9]{4}[-/.][0-9]{1,2}", Precision::Month),
    ]
});

/// How much of a date/time a pattern captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Second,
    Minute,
    Day,
    Month,
}

impl Precision {
    /// The strict format a token of this precision is parsed under.
    fn format(self) -> &'static str {
        match self {
            Self::Second => "%Y-%m-%d %H:%M:%S",
            Self::Minute => "%Y-%m-%d %H:%M",
            Self::Day => "%Y-%m-%d",
            Self::Month => "%Y-%m",
        }
    }

    /// Parses a `-`-separated token. Fields the precision does not carry
    /// default to the first day of the month at midnight.
    fn parse(self, token: &str) -> Option<NaiveDateTime> {
        match self {
            Self::Second | Self::Minute => NaiveDateTime::parse_from_str(token, self.format()).ok(),
            Self::Day => NaiveDate::parse_from_str(token, self.format())
                .ok()?
                .and_hms_opt(0, 0, 0),
            // chrono cannot build a date without a day; supply day one.
            Self::Month => NaiveDate::parse_from_str(&format!("{token}-1"), Self::Day.format())
                .ok()?
                .and_hms_opt(0, 0, 0),
        }
    }
}

/// A search pattern paired with the precision its match is parsed at.
struct DatePattern {
    regex: Regex,
    precision: Precision,
}

impl DatePattern {
    fn new(pattern: &str, precision: Precision) -> Self {
        Self {
            regex: Regex::new(pattern).expect("Invalid date pattern regex"),
            precision,
        }
    }

    /// Parses a matched token, rewriting its separators to `-` first.
    fn parse(&self, token: &str) -> Option<NaiveDateTime> {
        let normalized = token.replace(['/', '.'], "-");
        let parsed = self.precision.parse(normalized.trim())?;
        // Year zero and leap seconds are not valid calendar values here.
        (parsed.year() >= 1 && parsed.nanosecond() < LEAP_SECOND_NANOS).then_some(parsed)
    }
}

/// The result of searching a text for its first date/time token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMatch {
    /// The token rendered in the output format; empty when nothing matched.
    pub value: String,
    /// Collapsed text before the token.
    pub left_text: String,
    /// Collapsed text after the token.
    pub right_text: String,
    /// Whether a token was found and parsed as a calendar value.
    pub matched: bool,
}

/// Location of a token inside a span.
struct Located {
    range: Range<usize>,
    value: String,
}

/// Pending work for [`DateTimeNormalizer::normalize_all`].
enum Work {
    /// A span of the collapsed text still to be searched.
    Scan(Range<usize>),
    /// An already-rendered token.
    Emit(String),
}

/// Finds date/time tokens in text and rewrites them in one output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeNormalizer {
    output_format: String,
}

impl Default for DateTimeNormalizer {
    fn default() -> Self {
        Self {
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl DateTimeNormalizer {
    /// Creates a normalizer rendering tokens with the given chrono format.
    ///
    /// # Errors
    ///
    /// Returns [`DateTimeError::InvalidFormat`] if the format cannot be
    /// rendered for a naive date-time.
    pub fn new(output_format: impl Into<String>) -> Result<Self, DateTimeError> {
        let output_format = output_format.into();
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| DateTimeError::InvalidFormat(output_format.clone()))?;
        if render(&sample, &output_format).is_none() {
            return Err(DateTimeError::InvalidFormat(output_format));
        }
        Ok(Self { output_format })
    }

    /// Returns the output format.
    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// Finds the first date/time token in `text`.
    ///
    /// Whitespace runs are collapsed before searching, and `left_text` and
    /// `right_text` are slices of that collapsed text.
    pub fn find_first(&self, text: &str) -> DateMatch {
        let collapsed = collapse_whitespace(text);
        match locate(&collapsed, &self.output_format) {
            Some(found) => DateMatch {
                left_text: collapsed[..found.range.start].to_string(),
                right_text: collapsed[found.range.end..].to_string(),
                value: found.value,
                matched: true,
            },
            None => DateMatch::default(),
        }
    }

    /// Rewrites every date/time token in `text` into the output format.
    ///
    /// Text without any token is returned unchanged. Otherwise the token
    /// found first is rendered in this normalizer's format and the spans on
    /// either side are normalized with [`DEFAULT_OUTPUT_FORMAT`], so a less
    /// specific token to the left of a more specific one is still rewritten.
    pub fn normalize_all(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let collapsed = collapse_whitespace(text);
        let Some(first) = locate(&collapsed, &self.output_format) else {
            return text.to_string();
        };

        let mut out = String::with_capacity(collapsed.len());
        let mut stack = vec![
            Work::Scan(first.range.end..collapsed.len()),
            Work::Emit(first.value),
            Work::Scan(0..first.range.start),
        ];

        while let Some(work) = stack.pop() {
            match work {
                Work::Emit(value) => out.push_str(&value),
                Work::Scan(span) if span.is_empty() => {}
                Work::Scan(span) => {
                    let Some(found) = locate(&collapsed[span.clone()], DEFAULT_OUTPUT_FORMAT)
                    else {
                        out.push_str(&collapsed[span]);
                        continue;
                    };
                    let start = span.start + found.range.start;
                    let end = span.start + found.range.end;
                    stack.push(Work::Scan(end..span.end));
                    stack.push(Work::Emit(found.value));
                    stack.push(Work::Scan(span.start..start));
                }
            }
        }

        out
    }
}

/// Finds the first date/time token using the default output format.
///
/// See [`DateTimeNormalizer::find_first`].
pub fn find_first_date_time(text: &str) -> DateMatch {
    DateTimeNormalizer::default().find_first(text)
}

/// Rewrites every date/time token using the default output format.
///
/// See [`DateTimeNormalizer::normalize_all`].
pub fn normalize_date_times(text: &str) -> String {
    DateTimeNormalizer::default().normalize_all(text)
}

/// Searches an already-collapsed span for its first token and renders it
/// with `format`.
///
/// A token that matches a pattern but fails to parse ends the search;
/// weaker patterns are not tried.
fn locate(text: &str, format: &str) -> Option<Located> {
    for pattern in DATE_PATTERNS.iter() {
        let Some(m) = pattern.regex.find(text) else {
            continue;
        };

        let Some(parsed) = pattern.parse(m.as_str()) else {
            tracing::debug!(
                token = m.as_str(),
                precision = ?pattern.precision,
                "date token is not a valid calendar value"
            );
            return None;
        };

        let value = render(&parsed, format)?;
        tracing::trace!(token = m.as_str(), %value, "normalized date token");
        return Some(Located {
            range: m.range(),
            value,
        });
    }
    None
}

/// Replaces each whitespace run with a single space.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").into_owned()
}

/// Renders a date-time, returning `None` when chrono rejects the format.
fn render(dt: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format(format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(format: &str) -> DateTimeNormalizer {
        DateTimeNormalizer::new(format).unwrap()
    }

    mod find_first {
        use super::*;

        #[test]
        fn full_timestamp_with_dots() {
            let res = find_first_date_time("meeting on 2013.8.15 22:46:21 room A");
            assert!(res.matched);
            assert_eq!(res.value, "2013-08-15 22:46:21");
            assert_eq!(res.left_text, "meeting on ");
            assert_eq!(res.right_text, " room A");
        }

        #[test]
        fn hour_and_minute_only() {
            let res = find_first_date_time("at 2013/8/15 9:05 sharp");
            assert!(res.matched);
            assert_eq!(res.value, "2013-08-15 09:05:00");
        }

        #[test]
        fn date_only() {
            let res = find_first_date_time("released 2014.5.11");
            assert!(res.matched);
            assert_eq!(res.value, "2014-05-11 00:00:00");
            assert_eq!(res.left_text, "released ");
            assert_eq!(res.right_text, "");
        }

        #[test]
        fn year_and_month_default_to_first_day() {
            let res = find_first_date_time("2014.5 archive");
            assert!(res.matched);
            assert_eq!(res.value, "2014-05-01 00:00:00");
            assert_eq!(res.left_text, "");
            assert_eq!(res.right_text, " archive");
        }

        #[test]
        fn custom_output_format() {
            let res = normalizer("%d/%m/%Y").find_first("2020-1-2 03:04:05");
            assert_eq!(res.value, "02/01/2020");
        }

        #[test]
        fn no_token() {
            let res = find_first_date_time("nothing to see here");
            assert_eq!(res, DateMatch::default());
            assert!(!res.matched);
        }

        #[test]
        fn offsets_use_collapsed_text() {
            let res = find_first_date_time("a \t\n b   2020-01-02   c");
            assert!(res.matched);
            assert_eq!(res.left_text, "a b ");
            assert_eq!(res.right_text, " c");
        }

        #[test]
        fn split_reconstructs_collapsed_input() {
            let text = "from 2013-08-15 22:46:21 to tomorrow";
            let res = find_first_date_time(text);
            let rebuilt = format!("{}{}{}", res.left_text, "2013-08-15 22:46:21", res.right_text);
            assert_eq!(rebuilt, text);
        }

        #[test]
        fn more_specific_pattern_wins_over_earlier_date() {
            let res = find_first_date_time("2014.5 then 2013.8.15 22:46:21");
            assert_eq!(res.value, "2013-08-15 22:46:21");
            assert_eq!(res.left_text, "2014.5 then ");
        }

        #[test]
        fn invalid_month_stops_search() {
            // The date pattern matches 2013-13-01 first; no fallback to the
            // year-month pattern is attempted.
            let res = find_first_date_time("2013-13-01");
            assert!(!res.matched);
            assert!(res.value.is_empty());
        }

        #[test]
        fn invalid_time_stops_search() {
            let res = find_first_date_time("2013-08-15 25:00:00 and 2014-01-01");
            assert!(!res.matched);
        }

        #[test]
        fn leap_second_stops_search() {
            let res = find_first_date_time("2013-08-15 22:46:60");
            assert!(!res.matched);
            assert!(res.value.is_empty());
        }

        #[test]
        fn year_zero_is_rejected() {
            assert!(!find_first_date_time("0000-01-01").matched);
        }

        #[test]
        fn non_ascii_digits_are_not_tokens() {
            assert!(!find_first_date_time("٢٠١٣-٠٨-١٥").matched);
        }
    }

    mod normalize_all {
        use super::*;

        #[test]
        fn rewrites_single_token() {
            assert_eq!(
                normalize_date_times("meeting on 2013.8.15 22:46:21 room A"),
                "meeting on 2013-08-15 22:46:21 room A"
            );
        }

        #[test]
        fn empty_input() {
            assert_eq!(normalize_date_times(""), "");
        }

        #[test]
        fn text_without_token_is_untouched() {
            let text = "no  dates\there, just   spacing";
            assert_eq!(normalize_date_times(text), text);
        }

        #[test]
        fn canonical_token_is_unchanged() {
            let text = "created 2020-01-02 03:04:05 by admin";
            assert!(find_first_date_time(text).matched);
            assert_eq!(normalize_date_times(text), text);
        }

        #[test]
        fn rewrites_every_token() {
            assert_eq!(
                normalize_date_times("from 2020/1/2 to 2020.2.3 9:30"),
                "from 2020-01-02 00:00:00 to 2020-02-03 09:30:00"
            );
        }

        #[test]
        fn rewrites_tokens_left_of_the_first_match() {
            assert_eq!(
                normalize_date_times("2014.5 then 2013.8.15 22:46:21 end"),
                "2014-05-01 00:00:00 then 2013-08-15 22:46:21 end"
            );
        }

        #[test]
        fn timestamp_next_to_bare_date_is_not_split() {
            assert_eq!(
                normalize_date_times("2013-08-15 2013-08-16 22:46:21"),
                "2013-08-15 00:00:00 2013-08-16 22:46:21"
            );
        }

        #[test]
        fn collapses_whitespace_once_a_token_is_found() {
            assert_eq!(
                normalize_date_times("on\t2020-01-02   at   noon"),
                "on 2020-01-02 00:00:00 at noon"
            );
        }

        #[test]
        fn invalid_span_is_kept_verbatim() {
            assert_eq!(
                normalize_date_times("2020.1.2 and 2020-13-40"),
                "2020-01-02 00:00:00 and 2020-13-40"
            );
        }

        #[test]
        fn leap_second_leaves_text_unchanged() {
            let text = "2013-08-15 22:46:60   and 2014.1.1";
            assert_eq!(normalize_date_times(text), text);
        }

        #[test]
        fn custom_format_applies_to_first_token_only() {
            let n = normalizer("%Y%m%d");
            assert_eq!(
                n.normalize_all("a 2020.1.2 b 2021.3.4 c"),
                "a 20200102 b 2021-03-04 00:00:00 c"
            );
        }

        #[test]
        fn custom_format_leaves_earlier_tokens_in_default_format() {
            let n = normalizer("%d/%m/%Y");
            assert_eq!(
                n.normalize_all("2014.5 then 2013.8.15 22:46:21"),
                "2014-05-01 00:00:00 then 15/08/2013"
            );
        }

        #[test]
        fn many_tokens_do_not_recurse() {
            let text = "2020-01-02 ".repeat(1_000);
            let out = normalize_date_times(&text);
            assert_eq!(out.matches("2020-01-02 00:00:00").count(), 1_000);
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn default_format() {
            assert_eq!(DateTimeNormalizer::default().output_format(), DEFAULT_OUTPUT_FORMAT);
        }

        #[test]
        fn rejects_unknown_specifier() {
            assert_eq!(
                DateTimeNormalizer::new("%Q"),
                Err(DateTimeError::InvalidFormat("%Q".to_string()))
            );
        }

        #[test]
        fn rejects_time_zone_fields() {
            assert!(DateTimeNormalizer::new("%Y %z").is_err());
        }
    }
}
