//! Per-scope identifier assignment
//!
//! One [`Deduplicator`] covers one declaration scope (an enum body, the events
//! class). Repeats of the same raw name collapse onto the first occurrence;
//! distinct raw names that normalize to the same identifier are an error.

use hashbrown::HashMap;

use crate::error::IdentifierError;
use crate::ident::IdentifierStyle;

pub struct Deduplicator {
    style: IdentifierStyle,
    /// raw name -> index into `identifiers`
    by_raw: HashMap<String, usize>,
    /// identifier -> raw name that claimed it
    owners: HashMap<String, String>,
    identifiers: Vec<String>,
}

impl Deduplicator {
    pub fn new(style: IdentifierStyle) -> Self {
        Self {
            style,
            by_raw: HashMap::new(),
            owners: HashMap::new(),
            identifiers: Vec::new(),
        }
    }

    /// Assign an identifier to `raw`.
    ///
    /// Returns `Ok(None)` when `raw` was already seen in this scope.
    pub fn insert(&mut self, raw: &str) -> Result<Option<&str>, IdentifierError> {
        if self.by_raw.contains_key(raw) {
            return Ok(None);
        }

        let identifier = self.style.apply(raw);
        if identifier.trim().is_empty() {
            return Err(IdentifierError::Empty {
                raw: raw.to_string(),
            });
        }
        if let Some(existing) = self.owners.get(&identifier) {
            return Err(IdentifierError::Collision {
                raw: raw.to_string(),
                existing: existing.clone(),
                identifier,
            });
        }

        let index = self.identifiers.len();
        self.by_raw.insert(raw.to_string(), index);
        self.owners.insert(identifier.clone(), raw.to_string());
        self.identifiers.push(identifier);
        Ok(Some(&self.identifiers[index]))
    }

    /// Claim `identifier` for something other than a raw name (e.g. a member
    /// the emitter declares itself) so later names cannot take it.
    pub fn reserve(&mut self, identifier: &str, owner: &str) {
        self.owners.insert(identifier.to_string(), owner.to_string());
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Identifiers in first-seen order.
    pub fn into_identifiers(self) -> Vec<String> {
        self.identifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(style: IdentifierStyle, raws: &[&str]) -> Result<Vec<String>, IdentifierError> {
        let mut dedup = Deduplicator::new(style);
        for raw in raws {
            dedup.insert(raw)?;
        }
        Ok(dedup.into_identifiers())
    }

    #[test]
    fn test_repeated_raw_keeps_first_seen_order() {
        let ids = collect(IdentifierStyle::Verbatim, &["Volume", "Pitch", "Volume"]).unwrap();
        assert_eq!(ids, vec!["Volume", "Pitch"]);
    }

    #[test]
    fn test_repeat_returns_none() {
        let mut dedup = Deduplicator::new(IdentifierStyle::CamelCase);
        assert_eq!(dedup.insert("event:/SFX/Jump").unwrap(), Some("jump"));
        assert_eq!(dedup.insert("event:/SFX/Jump").unwrap(), None);
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_distinct_raws_colliding_is_an_error() {
        let err = collect(
            IdentifierStyle::CamelCase,
            &["event:/SFX/Door Open", "event:/UI/door_open"],
        )
        .unwrap_err();
        assert_eq!(
            err,
            IdentifierError::Collision {
                raw: "event:/UI/door_open".to_string(),
                existing: "event:/SFX/Door Open".to_string(),
                identifier: "doorOpen".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        let err = collect(IdentifierStyle::CamelCase, &["event:/SFX/???"]).unwrap_err();
        assert!(matches!(err, IdentifierError::Empty { raw } if raw == "event:/SFX/???"));
    }

    #[test]
    fn test_reserved_identifier_cannot_be_taken() {
        let mut dedup = Deduplicator::new(IdentifierStyle::Verbatim);
        dedup.reserve("IsInitialized", "<generated>");
        let err = dedup.insert("Is Initialized").unwrap_err();
        assert!(matches!(err, IdentifierError::Collision { .. }));
    }
}
