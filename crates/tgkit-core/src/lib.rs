//! Core text helpers: date/time normalization, link resolution, sizes, filenames

pub mod bytes;
pub mod datetime;
pub mod error;
pub mod filename;
pub mod links;
pub mod progress;
pub mod title;
pub mod tracing;

pub use bytes::{bytes_from_str, format_byte, ByteUnit, DEFAULT_PRECISION};
pub use datetime::{
    find_first_date_time, normalize_date_times, DateMatch, DateTimeNormalizer,
    DEFAULT_OUTPUT_FORMAT,
};
pub use error::{ByteSizeError, DateTimeError, LinkError, LinkResult};
pub use filename::{truncate_filename, DEFAULT_FILENAME_LIMIT};
pub use links::{resolve_link, GroupId, LinkResolver, ResolvedLink};
pub use progress::{render_progress_bar, DEFAULT_PROGRESS_WIDTH};
pub use title::sanitize_title;
pub use self::tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
