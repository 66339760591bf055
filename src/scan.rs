//! Mention scanning: find the newest mention that names a color.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{extract_color, extract_effect, ColorDescriptor, Effect};

/// One social-media mention. Only `text` is interpreted; the rest is
/// passed through for the caller's benefit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub id: String,
    pub account: String,
    pub created_at: String,
}

/// Outcome of a scan. The fallback arms imply the default color;
/// serialization at the HTTP boundary renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// A mention named a color. `mention.text` is the cleaned text.
    Found {
        color: ColorDescriptor,
        effect: Option<Effect>,
        mention: Mention,
    },
    /// Mentions were examined but none named a color.
    NoColorFound { mentions_checked: usize },
    /// The platform returned no mentions at all.
    NoMentions,
}

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove markup tags from mention text. Mastodon statuses arrive as
/// HTML; this is a generic `<...>` removal pass, not an HTML parser,
/// and entities are left undecoded.
pub fn strip_markup(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Scan mentions, newest first, for the first one whose text yields a
/// color. The caller fetches and limits the sequence; `limit` is
/// informational only. The effect is extracted independently from the
/// same cleaned text as the winning color.
///
/// Recency dominates by construction: a newer mention with a color
/// beats any older one, and the scan is a plain linear pass since
/// mention counts are small.
pub fn scan(mentions: Vec<Mention>, limit: usize) -> ScanResult {
    debug!(limit, count = mentions.len(), "scanning mentions");

    if mentions.is_empty() {
        return ScanResult::NoMentions;
    }

    let checked = mentions.len();
    for mut mention in mentions {
        let cleaned = strip_markup(&mention.text);
        if let Some(color) = extract_color(&cleaned) {
            let effect = extract_effect(&cleaned);
            mention.text = cleaned;
            return ScanResult::Found {
                color,
                effect,
                mention,
            };
        }
    }

    ScanResult::NoColorFound {
        mentions_checked: checked,
    }
}
