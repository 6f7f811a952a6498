use crate::alias::Alias;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Store-generated identifier of a URL record.
///
/// Ids are assigned by the store on save and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| CoreError::InvalidRecordId(format!("'{}': {e}", s)))
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// The address an alias points at.
///
/// Any text that is not blank is accepted and kept exactly as given; no
/// scheme policy is applied here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetUrl(String);

impl TargetUrl {
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let url = url.into();

        if url.trim().is_empty() {
            return Err(CoreError::InvalidUrl("url cannot be empty".to_string()));
        }

        Ok(Self(url))
    }

    /// Wraps a value read back from the store.
    pub fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TargetUrl {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TargetUrl {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetUrl> for String {
    fn from(value: TargetUrl) -> Self {
        value.0
    }
}

/// A stored URL record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: RecordId,
    pub alias: Alias,
    pub url: TargetUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_stored_verbatim() {
        let url = TargetUrl::new(" https://example.com ").unwrap();
        assert_eq!(url.as_str(), " https://example.com ");
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(TargetUrl::new("").is_err());
        assert!(TargetUrl::new("   ").is_err());
    }

    #[test]
    fn url_with_inner_whitespace_is_accepted() {
        let url = TargetUrl::new("https://example.com/a b").unwrap();
        assert_eq!(url.into_string(), "https://example.com/a b");
    }

    #[test]
    fn url_without_scheme_is_accepted() {
        assert!(TargetUrl::new("example.com/path").is_ok());
    }

    #[test]
    fn record_id_parses_canonical_uuid() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let id: RecordId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn record_id_rejects_garbage() {
        let err = "not-an-id".parse::<RecordId>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecordId(_)));
    }

    #[test]
    fn record_serializes_flat() {
        let record = UrlRecord {
            id: "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap(),
            alias: Alias::new("ex").unwrap(),
            url: TargetUrl::new("https://example.com").unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(json["alias"], "ex");
        assert_eq!(json["url"], "https://example.com");
    }
}
