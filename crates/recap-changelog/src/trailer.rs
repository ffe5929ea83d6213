//! Raw message splitting and trailer parsing
//!
//! The engine re-parses trailers from the raw message text instead of
//! trusting whatever the VCS layer extracted, so classification behaves
//! the same regardless of backend trailer configuration.

use std::sync::LazyLock;

use regex::Regex;

/// One line of a trailer block: `token: value` or `token #value`
static TRAILER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<token>(?i:BREAKING CHANGE)|[A-Za-z][A-Za-z0-9-]*)(?::[ \t]*(?P<value>.*)|[ \t]+#(?P<hvalue>.*))$",
    )
    .expect("invalid trailer regex")
});

/// Trailer mapping preserving every value per token, in message order
///
/// Token lookup is case-insensitive; a token that appears several times
/// keeps all of its values as a sequence so callers can pick first, last
/// or all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trailers {
    entries: Vec<(String, String)>,
}

impl Trailers {
    /// Whether the block was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of trailer lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All (token, value) pairs in message order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// All values recorded for a token, in message order
    pub fn values<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(t, _)| t.eq_ignore_ascii_case(token))
            .map(|(_, v)| v.as_str())
    }

    /// The last value recorded for a token
    pub fn last(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(t, _)| t.eq_ignore_ascii_case(token))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the token appears at least once
    pub fn contains(&self, token: &str) -> bool {
        self.entries
            .iter()
            .any(|(t, _)| t.eq_ignore_ascii_case(token))
    }

    fn push(&mut self, token: &str, value: &str) {
        self.entries
            .push((token.to_string(), value.trim().to_string()));
    }

    fn append_to_last(&mut self, continuation: &str) {
        if let Some((_, value)) = self.entries.last_mut() {
            value.push('\n');
            value.push_str(continuation.trim());
        }
    }
}

/// A raw message split into its three parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParts {
    /// First line; empty when the message starts with a blank line
    pub subject: String,
    /// Text between subject and trailer block, trimmed; empty becomes None
    pub body: Option<String>,
    /// The trailing trailer block
    pub trailers: Trailers,
}

/// Split a raw commit message into subject, body and trailer block
///
/// The trailer block is the maximal trailing run of trailer lines
/// (indented continuation lines fold into the preceding value). The
/// subject line is never consumed by the block, so a one-line message
/// always keeps its subject.
pub fn split_message(message: &str) -> MessageParts {
    let mut lines: Vec<&str> = message.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let block_start = find_trailer_block(&lines);

    let mut trailers = Trailers::default();
    for line in &lines[block_start..] {
        if let Some(caps) = TRAILER_LINE.captures(line) {
            let value = caps
                .name("value")
                .or_else(|| caps.name("hvalue"))
                .map(|m| m.as_str())
                .unwrap_or("");
            trailers.push(&caps["token"], value);
        } else {
            trailers.append_to_last(line);
        }
    }

    let subject = lines.first().copied().unwrap_or("").trim().to_string();

    let body = if block_start > 1 {
        let text = lines[1..block_start].join("\n").trim().to_string();
        (!text.is_empty()).then_some(text)
    } else {
        None
    };

    MessageParts {
        subject,
        body,
        trailers,
    }
}

/// Index where the trailing trailer block starts; `lines.len()` if none
///
/// Scans bottom-up. A continuation line (indented, non-empty) is only
/// part of the block once a trailer line is found above it. Line 0 is
/// reserved for the subject.
fn find_trailer_block(lines: &[&str]) -> usize {
    let mut start = lines.len();

    for idx in (1..lines.len()).rev() {
        let line = lines[idx];
        if TRAILER_LINE.is_match(line) {
            start = idx;
        } else if is_continuation(line) {
            // Tentative: only kept if a trailer line turns up above it.
            continue;
        } else {
            break;
        }
    }

    start
}

fn is_continuation(line: &str) -> bool {
    (line.starts_with(' ') || line.starts_with('\t')) && !line.trim().is_empty()
}
