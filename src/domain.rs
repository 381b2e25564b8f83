//! DNS domain names as ordered label lists.
//!
//! A query name carrying tunneled payload must stay inside the RFC 1035
//! naming limits no matter how many data labels get packed into it. `Domain`
//! owns its labels and re-checks the limits on every insertion, so a value
//! that exists is a value that renders to a legal name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Maximum bytes per DNS label (RFC 1035)
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum textual length of a full domain name
pub const MAX_NAME_LEN: usize = 253;

/// Errors from parsing or mutating a [`Domain`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("label too long: {0} bytes (max: 63)")]
    LabelTooLong(usize),

    #[error("domain name too long: {0} bytes (max: 253)")]
    DomainTooLong(usize),

    #[error("label contains separator: {0:?}")]
    LabelContainsSeparator(String),
}

/// An ordered list of DNS labels, most specific first.
///
/// `Domain` is a plain value: cloning produces an independent copy, and the
/// `prepended*` methods operate on such a copy without touching the
/// receiver. The two invariants it maintains are that no label exceeds
/// [`MAX_LABEL_LEN`] bytes and that [`textual_length`](Self::textual_length)
/// never exceeds [`MAX_NAME_LEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Domain {
    labels: Vec<String>,
}

impl Domain {
    /// Wrap an explicit label list verbatim, without validation.
    ///
    /// Trusted construction path for composing domains from parts that are
    /// already known to satisfy the length limits.
    pub fn from_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted name, enforcing the label and name length limits.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let labels: Vec<String> = text.split('.').map(str::to_owned).collect();
        for label in &labels {
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::LabelTooLong(label.len()));
            }
        }
        let domain = Self { labels };
        let textual = domain.textual_length();
        if textual > MAX_NAME_LEN {
            return Err(DomainError::DomainTooLong(textual));
        }
        Ok(domain)
    }

    /// Number of labels
    pub fn level(&self) -> usize {
        self.labels.len()
    }

    /// The labels, most specific first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Length of the rendered name: label bytes plus one separator between
    /// each pair of labels. An empty domain has length zero.
    pub fn textual_length(&self) -> usize {
        let label_bytes: usize = self.labels.iter().map(String::len).sum();
        label_bytes + self.labels.len().saturating_sub(1)
    }

    /// Room left for one more label and its separator, capped at
    /// [`MAX_LABEL_LEN`]. Zero means the name is full.
    pub fn max_next_label_length(&self) -> usize {
        MAX_NAME_LEN
            .saturating_sub(self.textual_length() + 1)
            .min(MAX_LABEL_LEN)
    }

    /// Insert `label` at `index`, validating before the vector is touched so
    /// a failed insert leaves the domain unchanged.
    fn insert(&mut self, label: String, index: usize) -> Result<(), DomainError> {
        if label.contains('.') {
            return Err(DomainError::LabelContainsSeparator(label));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::LabelTooLong(label.len()));
        }
        let separator = usize::from(!self.labels.is_empty());
        let textual = self.textual_length() + label.len() + separator;
        if textual > MAX_NAME_LEN {
            return Err(DomainError::DomainTooLong(textual));
        }
        self.labels.insert(index, label);
        Ok(())
    }

    /// Insert a label at the most specific position.
    pub fn prepend(&mut self, label: impl Into<String>) -> Result<(), DomainError> {
        self.insert(label.into(), 0)
    }

    /// Insert a label immediately above a fixed suffix of `level` labels.
    ///
    /// The insertion index is `self.level() - level`, so repeated calls with
    /// the same `level` stack new labels above an unchanging carrier suffix.
    /// A `level` deeper than the current label count clamps to the front.
    pub fn prepend_at_level(
        &mut self,
        label: impl Into<String>,
        level: usize,
    ) -> Result<(), DomainError> {
        let index = self.labels.len().saturating_sub(level);
        self.insert(label.into(), index)
    }

    /// Copying variant of [`prepend`](Self::prepend); the receiver is left
    /// unchanged.
    pub fn prepended(&self, label: impl Into<String>) -> Result<Self, DomainError> {
        let mut copy = self.clone();
        copy.prepend(label)?;
        Ok(copy)
    }

    /// Copying variant of [`prepend_at_level`](Self::prepend_at_level).
    pub fn prepended_at_level(
        &self,
        label: impl Into<String>,
        level: usize,
    ) -> Result<Self, DomainError> {
        let mut copy = self.clone();
        copy.prepend_at_level(label, level)?;
        Ok(copy)
    }

    /// Render to dotted form. Exact inverse of [`parse`](Self::parse) for
    /// any domain within the limits.
    pub fn render(&self) -> String {
        self.labels.join(".")
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_round_trip() {
        let domain = Domain::parse("data.tunnel.example.com").unwrap();
        assert_eq!(domain.level(), 4);
        assert_eq!(domain.render(), "data.tunnel.example.com");
        assert_eq!(Domain::parse(&domain.render()).unwrap(), domain);
    }

    #[test]
    fn test_round_trip_accepts_full_length_label() {
        let label = "a".repeat(MAX_LABEL_LEN);
        let domain = Domain::from_labels([label.as_str(), "example", "com"]);
        let parsed = Domain::parse(&domain.render()).unwrap();
        assert_eq!(parsed.labels(), domain.labels());
    }

    #[test]
    fn test_parse_rejects_oversized_label() {
        let text = format!("{}.example.com", "a".repeat(MAX_LABEL_LEN + 1));
        assert_eq!(
            Domain::parse(&text),
            Err(DomainError::LabelTooLong(MAX_LABEL_LEN + 1))
        );
    }

    #[test]
    fn test_parse_rejects_oversized_name() {
        // Five 62-byte labels render to 314 bytes, past the name limit.
        let text = vec!["b".repeat(62); 5].join(".");
        assert!(matches!(
            Domain::parse(&text),
            Err(DomainError::DomainTooLong(_))
        ));
    }

    #[test]
    fn test_textual_length_counts_separators() {
        assert_eq!(Domain::default().textual_length(), 0);
        assert_eq!(Domain::from_labels(["com"]).textual_length(), 3);
        assert_eq!(Domain::from_labels(["example", "com"]).textual_length(), 11);
    }

    #[test]
    fn test_max_next_label_length_capped() {
        let domain = Domain::from_labels(["example", "com"]);
        assert_eq!(domain.max_next_label_length(), MAX_LABEL_LEN);

        // 189 textual bytes leave exactly one full label of room.
        let carrier =
            Domain::from_labels([&"a".repeat(63), &"b".repeat(63), &"c".repeat(61)]);
        assert_eq!(carrier.textual_length(), 189);
        assert_eq!(carrier.max_next_label_length(), 63);
    }

    #[test]
    fn test_insert_of_exactly_max_room_fits() {
        let mut domain = Domain::from_labels(["tunnel", "example", "com"]);
        loop {
            let room = domain.max_next_label_length();
            if room == 0 {
                break;
            }
            domain.prepend("x".repeat(room)).unwrap();
            assert!(domain.textual_length() <= MAX_NAME_LEN);
        }
        assert!(domain.textual_length() <= MAX_NAME_LEN);
    }

    #[test]
    fn test_prepend_rejects_separator() {
        let mut domain = Domain::from_labels(["example", "com"]);
        let err = domain.prepend("a.b").unwrap_err();
        assert_eq!(err, DomainError::LabelContainsSeparator("a.b".into()));
    }

    #[test]
    fn test_failed_insert_leaves_domain_unchanged() {
        let mut domain =
            Domain::from_labels([&"a".repeat(63), &"b".repeat(63), &"c".repeat(61)]);
        let before = domain.clone();

        domain.prepend("x".repeat(64)).unwrap_err();
        assert_eq!(domain, before);

        // One full label fits, a second overflows the name.
        domain.prepend("y".repeat(63)).unwrap();
        let filled = domain.clone();
        assert!(matches!(
            domain.prepend("z"),
            Err(DomainError::DomainTooLong(_))
        ));
        assert_eq!(domain, filled);
    }

    #[test]
    fn test_prepend_at_level_stacks_above_suffix() {
        let mut domain = Domain::from_labels(["example", "com"]);
        let level = domain.level();
        domain.prepend_at_level("first", level).unwrap();
        domain.prepend_at_level("second", level).unwrap();
        assert_eq!(domain.render(), "first.second.example.com");
    }

    #[test]
    fn test_prepended_never_mutates_receiver() {
        let domain = Domain::from_labels(["example", "com"]);
        let grown = domain.prepended("data").unwrap();
        assert_eq!(domain.render(), "example.com");
        assert_eq!(grown.render(), "data.example.com");

        let pinned = domain.prepended_at_level("data", 2).unwrap();
        assert_eq!(domain.render(), "example.com");
        assert_eq!(pinned.render(), "data.example.com");
    }
}
