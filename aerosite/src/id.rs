//! Identifiers and timestamps of sites and map elements.
//!
//! Generated identifiers have the form `{prefix}_{unix_millis}_{random6}`. They are unique enough
//! for a single editing session, but are not cryptographically random.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const RANDOM_SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Current time. All `createdAt`/`updatedAt` timestamps come from here.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generates a new identifier string with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{prefix}_{}_{suffix}", now().timestamp_millis())
}

/// Identifier of a map element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generates a fresh identifier.
    pub fn generate(prefix: &str) -> Self {
        Self(generate_id(prefix))
    }

    /// Generates a fresh identifier with the same prefix as `self`.
    ///
    /// Identifiers that were not generated by this module get the whole old id as a prefix.
    pub fn regenerate(&self) -> Self {
        Self::generate(self.prefix())
    }

    /// Prefix part of a generated id.
    pub fn prefix(&self) -> &str {
        // Prefix ends before the `_{millis}_{random}` tail.
        let mut parts = self.0.rsplitn(3, '_');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(millis), Some(prefix)) if millis.parse::<i64>().is_ok() => prefix,
            _ => &self.0,
        }
    }

    /// String representation of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Prefix of generated site ids.
    pub const PREFIX: &'static str = "site";

    /// Generates a fresh site identifier.
    pub fn generate() -> Self {
        Self(generate_id(Self::PREFIX))
    }

    /// String representation of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SiteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for SiteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_id_shape() {
        let id = generate_id("marker");
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "marker");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), RANDOM_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<_> = (0..200).map(|_| ElementId::generate("marker")).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn prefix() {
        assert_eq!(ElementId::generate("muster").prefix(), "muster");
        assert_eq!(ElementId::generate("launch_point").prefix(), "launch_point");
        assert_eq!(ElementId::from("custom-id").prefix(), "custom-id");
        assert_eq!(ElementId::from("a_b").prefix(), "a_b");
    }

    #[test]
    fn regenerate_keeps_prefix() {
        let id = ElementId::generate("obstacle");
        let new_id = id.regenerate();
        assert_ne!(id, new_id);
        assert_eq!(new_id.prefix(), "obstacle");

        let explicit = ElementId::from("tower-1");
        assert!(explicit.regenerate().as_str().starts_with("tower-1_"));
    }

    #[test]
    fn serializes_transparently() {
        assert_eq!(
            serde_json::to_value(SiteId::from("site_1")).unwrap(),
            serde_json::json!("site_1")
        );
    }
}
