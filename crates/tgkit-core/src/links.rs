//! Resolution of `t.me`-style message links into chat identifiers.
//!
//! This module turns a link such as `https://t.me/c/123456789/42` into a
//! [`ResolvedLink`] naming the chat, and optionally the topic, post or
//! comment it points to. The shape of the link path decides which fields are
//! filled:
//!
//! | Path | Result |
//! |---|---|
//! | `/<handle>` | group handle |
//! | `/<handle>/<post>` | group handle + post |
//! | `/<handle>/<topic>/<post>` | group handle + topic + post |
//! | `/c/<channel>` | channel id |
//! | `/c/<channel>/<post>` | channel id + post |
//! | `/c/<channel>/<topic>/<post>` | channel id + topic + post |
//! | `/<handle>/...?comment=<id>` | group handle + comment |
//!
//! Private channel ids are prefixed with `-100` to form the platform's
//! canonical negative chat id.
//!
//! # Example
//!
//! ```
//! use tgkit_core::links::{resolve_link, GroupId};
//!
//! let link = resolve_link("https://t.me/c/123456789/42").unwrap();
//! assert_eq!(link.group_id, Some(GroupId::Channel(-100123456789)));
//! assert_eq!(link.post_id, Some(42));
//! ```

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LinkError, LinkResult};

/// Base used to resolve scheme-less links like `t.me/durov` or `durov`.
///
/// Relative input is joined onto this so its whole text becomes the path.
static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("relative:///").expect("Invalid relative base URL"));

/// Literal tokens that name the current user's own chat.
const SELF_TOKENS: [&str; 2] = ["me", "self"];

/// Path segment marking a private channel link.
const CHANNEL_MARKER: &str = "c";

/// Prefix turning an internal channel id into the canonical chat id.
const CHANNEL_ID_PREFIX: &str = "-100";

/// The chat a link points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupId {
    /// Numeric chat id of a private channel (`-100<internal id>`).
    Channel(i64),
    /// Public username, or the literal `me` / `self`.
    Handle(String),
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "{}", id),
            Self::Handle(handle) => f.write_str(handle),
        }
    }
}

/// Identifiers decoded from a message link.
///
/// Fields the link does not carry stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    /// The chat.
    pub group_id: Option<GroupId>,
    /// The message within the chat (or topic).
    pub post_id: Option<i64>,
    /// The comment in the discussion thread of a post.
    pub comment_id: Option<i64>,
    /// The forum topic the post belongs to.
    pub topic_id: Option<i64>,
}

impl ResolvedLink {
    /// Returns `true` if no field was decoded.
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.post_id.is_none()
            && self.comment_id.is_none()
            && self.topic_id.is_none()
    }
}

/// The recognized layouts of a link path.
///
/// Borrowed segments are decoded into a [`ResolvedLink`] by
/// [`PathShape::decode`]; numeric conversion happens there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathShape<'a> {
    /// `?comment=<comment>` on a link whose first segment is the group.
    Comment {
        group: Option<&'a str>,
        comment: &'a str,
    },
    /// `/<handle>`
    Handle { group: &'a str },
    /// `/c/<channel>`
    Channel { channel: &'a str },
    /// `/<handle>/<post>`
    Post { group: &'a str, post: &'a str },
    /// `/c/<channel>/<post>`
    ChannelPost { channel: &'a str, post: &'a str },
    /// `/<handle>/<topic>/<post>`
    TopicPost {
        group: &'a str,
        topic: &'a str,
        post: &'a str,
    },
    /// `/c/<channel>/<topic>/<post>`
    ChannelTopicPost {
        channel: &'a str,
        topic: &'a str,
        post: &'a str,
    },
    /// Anything else.
    Unrecognized,
}

impl<'a> PathShape<'a> {
    /// Classifies path segments (empty components already removed).
    fn classify(segments: &[&'a str], comment: Option<&'a str>) -> Self {
        if let Some(comment) = comment {
            return Self::Comment {
                group: segments.first().copied(),
                comment,
            };
        }

        match *segments {
            [group] if group != CHANNEL_MARKER => Self::Handle { group },
            [CHANNEL_MARKER, channel] => Self::Channel { channel },
            [group, post] => Self::Post { group, post },
            [CHANNEL_MARKER, channel, post] => Self::ChannelPost { channel, post },
            [group, topic, post] => Self::TopicPost { group, topic, post },
            [CHANNEL_MARKER, channel, topic, post] => Self::ChannelTopicPost {
                channel,
                topic,
                post,
            },
            _ => Self::Unrecognized,
        }
    }

    /// Builds the record for this shape.
    fn decode(self) -> LinkResult<ResolvedLink> {
        let link = match self {
            Self::Comment { group, comment } => ResolvedLink {
                group_id: Some(handle(group.ok_or(LinkError::MissingGroup)?)),
                comment_id: Some(parse_number("comment_id", comment)?),
                ..Default::default()
            },
            Self::Handle { group } => ResolvedLink {
                group_id: Some(handle(group)),
                ..Default::default()
            },
            Self::Channel { channel } => ResolvedLink {
                group_id: Some(channel_id(channel)?),
                ..Default::default()
            },
            Self::Post { group, post } => ResolvedLink {
                group_id: Some(handle(group)),
                post_id: Some(parse_number("post_id", post)?),
                ..Default::default()
            },
            Self::ChannelPost { channel, post } => ResolvedLink {
                group_id: Some(channel_id(channel)?),
                post_id: Some(parse_number("post_id", post)?),
                ..Default::default()
            },
            Self::TopicPost { group, topic, post } => ResolvedLink {
                group_id: Some(handle(group)),
                topic_id: Some(parse_number("topic_id", topic)?),
                post_id: Some(parse_number("post_id", post)?),
                ..Default::default()
            },
            Self::ChannelTopicPost {
                channel,
                topic,
                post,
            } => ResolvedLink {
                group_id: Some(channel_id(channel)?),
                topic_id: Some(parse_number("topic_id", topic)?),
                post_id: Some(parse_number("post_id", post)?),
                ..Default::default()
            },
            Self::Unrecognized => ResolvedLink::default(),
        };
        Ok(link)
    }
}

/// Link resolver.
///
/// Decodes message links into [`ResolvedLink`] records.
#[derive(Debug, Default)]
pub struct LinkResolver;

impl LinkResolver {
    /// Creates a new link resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolves a link into chat identifiers.
    ///
    /// `me` and `self` resolve to themselves. A link that cannot be parsed,
    /// or whose path has no known shape, resolves to an empty record.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidNumber`] if a segment that must be numeric
    /// is not, and [`LinkError::MissingGroup`] for a comment link without a
    /// path.
    pub fn resolve(&self, link: &str) -> LinkResult<ResolvedLink> {
        if SELF_TOKENS.contains(&link) {
            return Ok(ResolvedLink {
                group_id: Some(handle(link)),
                ..Default::default()
            });
        }

        let parsed = match Url::options().base_url(Some(&*RELATIVE_BASE)).parse(link) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(link, error = %err, "link is not a parseable URL");
                return Ok(ResolvedLink::default());
            }
        };

        let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();
        let comment = parsed
            .query_pairs()
            .find(|(key, value)| key == "comment" && !value.is_empty())
            .map(|(_, value)| value.into_owned());

        let shape = PathShape::classify(&segments, comment.as_deref());
        tracing::trace!(link, ?shape, "classified link path");
        shape.decode()
    }
}

/// Convenience function to resolve a single link.
///
/// See [`LinkResolver::resolve`] for details.
pub fn resolve_link(link: &str) -> LinkResult<ResolvedLink> {
    LinkResolver::new().resolve(link)
}

fn handle(segment: &str) -> GroupId {
    GroupId::Handle(segment.to_string())
}

/// Builds a private channel's chat id by prefixing `-100` to its text.
fn channel_id(segment: &str) -> LinkResult<GroupId> {
    let id = format!("{CHANNEL_ID_PREFIX}{segment}");
    id.parse::<i64>()
        .map(GroupId::Channel)
        .map_err(|_| LinkError::InvalidNumber {
            field: "channel",
            value: segment.to_string(),
        })
}

fn parse_number(field: &'static str, value: &str) -> LinkResult<i64> {
    value.parse::<i64>().map_err(|_| LinkError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
