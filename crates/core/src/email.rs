//! Email message model
//!
//! This module provides:
//! - Address: sender/recipient with `Name <email>` parsing and initials
//! - Segment / SegmentKind: typed text spans inside a paragraph
//! - Email: the immutable corpus document
//! - RawSegment / RawEmail: raw JSON forms and their conversion
//!
//! Identity is the opaque message id; the position in the corpus list is the
//! document index used by the search engines.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Pattern for `Full Name <user@host>` address strings
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+?)\s*<(.+)>").unwrap());

/// Strips a trailing `@…` run from a display name
static AT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@.+$").unwrap());

/// Strips parenthesized groups from a display name
static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.+?\)").unwrap());

// ============================================================================
// Address
// ============================================================================

/// A sender or recipient
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Display name
    pub full_name: String,
    /// Bare email address
    pub email: String,
}

impl Address {
    /// Create an address from its parts
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Address {
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Parse a `Full Name <user@host>` string
    ///
    /// # Example
    ///
    /// ```
    /// use mailsim_core::Address;
    ///
    /// let addr = Address::parse("Jane Doe <jane@example.com>").unwrap();
    /// assert_eq!(addr.full_name, "Jane Doe");
    /// assert_eq!(addr.email, "jane@example.com");
    /// ```
    pub fn parse(address: &str) -> Result<Self> {
        let caps = ADDRESS_RE
            .captures(address)
            .ok_or_else(|| Error::AddressParse(address.to_string()))?;
        Ok(Address {
            full_name: caps[1].trim().to_string(),
            email: caps[2].trim().to_string(),
        })
    }

    /// Derive display initials from the full name
    ///
    /// Trailing `@…` runs and parenthesized groups are stripped before
    /// splitting on non-alphanumerics. Two or more name parts give the
    /// first letters of the first and last parts; one part gives a single
    /// initial; none falls back to the first character of the raw name.
    pub fn initials(&self) -> String {
        let trimmed = self.full_name.trim();
        let cleaned = AT_SUFFIX_RE.replace(trimmed, "");
        let cleaned = PAREN_RE.replace_all(&cleaned, "");
        let parts: Vec<&str> = cleaned
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|p| !p.is_empty())
            .collect();
        let initial = |part: &str| -> String {
            part.chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default()
        };
        match parts.as_slice() {
            [] => self
                .full_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
            [only] => initial(only),
            [first, .., last] => format!("{}{}", initial(first), initial(last)),
        }
    }
}

// ============================================================================
// Segments and paragraphs
// ============================================================================

/// Kind of a text segment inside a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Plain text
    #[default]
    Span,
    /// Hyperlink text
    Link,
    /// Date reference
    Date,
    /// Person mention
    Mention,
}

/// A typed text span inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment identifier, unique within its email
    pub id: String,
    /// Segment kind
    pub kind: SegmentKind,
    /// Text content
    pub text: String,
}

/// Ordered segments rendered as one paragraph
pub type Paragraph = Vec<Segment>;

// ============================================================================
// Email
// ============================================================================

/// An immutable message in the experiment corpus
#[derive(Debug, Clone)]
pub struct Email {
    /// Opaque message id
    pub id: String,
    /// Sender
    pub from: Address,
    /// Primary recipients
    pub to: Vec<Address>,
    /// Carbon-copy recipients
    pub cc: Vec<Address>,
    /// Blind-copy recipients
    pub bcc: Vec<Address>,
    /// Send time
    pub time: DateTime<Utc>,
    /// Subject line
    pub subject: String,
    /// Body paragraphs
    pub body: Vec<Paragraph>,
    /// Whether the message has been read
    pub read: bool,
}

impl Email {
    /// Compose a message from plain text
    ///
    /// The sender and recipients are parsed from `Name <email>` strings and
    /// the body is split on blank lines into single-segment paragraphs with
    /// ids `p-0`, `p-1`, …. The send time is the current time; override it
    /// with [`with_time`](Email::with_time).
    ///
    /// # Example
    ///
    /// ```
    /// use mailsim_core::Email;
    ///
    /// let email = Email::compose(
    ///     "m-1",
    ///     "Jane Doe <jane@example.com>",
    ///     &["Sam Roe <sam@example.com>"],
    ///     "Quarterly sync",
    ///     "First paragraph.\n\nSecond paragraph.",
    /// )
    /// .unwrap();
    /// assert_eq!(email.body.len(), 2);
    /// assert_eq!(email.from.initials(), "JD");
    /// ```
    pub fn compose(
        id: &str,
        sender: &str,
        recipients: &[&str],
        subject: &str,
        body: &str,
    ) -> Result<Self> {
        let to = recipients
            .iter()
            .map(|a| Address::parse(a))
            .collect::<Result<_>>()?;
        Ok(Email {
            id: id.to_string(),
            from: Address::parse(sender)?,
            to,
            cc: Vec::new(),
            bcc: Vec::new(),
            time: Utc::now(),
            subject: subject.to_string(),
            body: body
                .split("\n\n")
                .enumerate()
                .map(|(i, text)| {
                    vec![Segment {
                        id: format!("p-{}", i),
                        kind: SegmentKind::Span,
                        text: text.to_string(),
                    }]
                })
                .collect(),
            read: false,
        })
    }

    /// Builder: set carbon-copy recipients
    pub fn with_cc(mut self, cc: &[&str]) -> Result<Self> {
        self.cc = cc.iter().map(|a| Address::parse(a)).collect::<Result<_>>()?;
        Ok(self)
    }

    /// Builder: set blind-copy recipients
    pub fn with_bcc(mut self, bcc: &[&str]) -> Result<Self> {
        self.bcc = bcc
            .iter()
            .map(|a| Address::parse(a))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Builder: set the read flag
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Builder: set the send time
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Flatten the body to plain text
    ///
    /// Segments within a paragraph and paragraphs themselves are joined
    /// with single spaces; this is the body view the index and the keyword
    /// detector read.
    pub fn body_text(&self) -> String {
        self.body
            .iter()
            .map(|p| {
                p.iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============================================================================
// Raw JSON forms
// ============================================================================

/// Raw JSON segment as stored in task definitions
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    /// Segment identifier
    pub id: String,
    /// Segment kind; absent means plain text
    #[serde(default)]
    pub p: SegmentKind,
    /// Text content
    pub t: String,
}

/// Raw JSON email as stored in task definitions
#[derive(Debug, Clone, Deserialize)]
pub struct RawEmail {
    /// Opaque message id
    pub id: String,
    /// Sender
    pub from: Address,
    /// Primary recipients
    pub to: Vec<Address>,
    /// Carbon-copy recipients
    pub cc: Vec<Address>,
    /// Blind-copy recipients
    pub bcc: Vec<Address>,
    /// RFC 3339 send time
    pub time: String,
    /// Subject line
    pub subject: String,
    /// Body paragraphs as raw segments
    pub body: Vec<Vec<RawSegment>>,
    /// Whether the message has been read
    pub read: bool,
}

impl TryFrom<RawEmail> for Email {
    type Error = Error;

    fn try_from(raw: RawEmail) -> Result<Self> {
        let time = DateTime::parse_from_rfc3339(&raw.time)
            .map_err(|_| Error::TimeParse {
                field: "time",
                value: raw.time.clone(),
            })?
            .with_timezone(&Utc);
        Ok(Email {
            id: raw.id,
            from: raw.from,
            to: raw.to,
            cc: raw.cc,
            bcc: raw.bcc,
            time,
            subject: raw.subject,
            body: raw
                .body
                .into_iter()
                .map(|p| {
                    p.into_iter()
                        .map(|s| Segment {
                            id: s.id,
                            kind: s.p,
                            text: s.t,
                        })
                        .collect()
                })
                .collect(),
            read: raw.read,
        })
    }
}

/// Convert a raw corpus into the typed model
///
/// Fails on the first unparseable send time.
pub fn convert_raw_emails(raw: Vec<RawEmail>) -> Result<Vec<Email>> {
    raw.into_iter().map(Email::try_from).collect()
}

// ============================================================================
// Tests
// ============================================================================
