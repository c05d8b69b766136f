/// Fixed width of the short hashes keying artist, album and track records.
pub const SHORT_HASH_LEN: usize = 32;

/// Represents a short record hash.
///
/// Artist and album records start with one of these, and track records
/// reference artists and albums through them. The hash is opaque; it only
/// ever gets compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordHash(String);

impl RecordHash {
    /// Parses a field into a hash, rejecting fields of the wrong width.
    pub fn parse(field: &str) -> Option<Self> {
        if field.chars().count() == SHORT_HASH_LEN {
            Some(Self(field.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordHash;

    #[test]
    fn parse_accepts_exact_width_fields() {
        let hash = RecordHash::parse(&"a".repeat(32)).unwrap();
        assert_eq!(hash.as_str(), "a".repeat(32));
    }

    #[test]
    fn parse_rejects_wrong_width_fields() {
        assert!(RecordHash::parse("").is_none());
        assert!(RecordHash::parse(&"a".repeat(31)).is_none());
        assert!(RecordHash::parse(&"a".repeat(40)).is_none());
    }
}
