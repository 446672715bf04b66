use std::collections::BTreeMap;

use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Search queries must be at least 2 characters long after trimming.
    pub fn validate_search_query(query: &str) -> Result<(), AppError> {
        if query.trim().chars().count() < 2 {
            return Err(AppError::ValidationError(
                "Query must be at least 2 characters long".to_string(),
            ));
        }
        Ok(())
    }

    /// Episode/stream/season lookups require at least one per-source identifier.
    pub fn validate_source_ids<K: Ord, V>(ids: &BTreeMap<K, V>) -> Result<(), AppError> {
        if ids.is_empty() {
            return Err(AppError::ValidationError(
                "At least one source ID must be provided".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_queries() {
        assert!(Validator::validate_search_query("").is_err());
        assert!(Validator::validate_search_query("a").is_err());
        assert!(Validator::validate_search_query("  a  ").is_err());
    }

    #[test]
    fn trims_before_measuring() {
        assert!(Validator::validate_search_query("   ab   ").is_ok());
        assert!(Validator::validate_search_query(" a ").is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Two multi-byte characters are still two characters
        assert!(Validator::validate_search_query("巨人").is_ok());
    }

    #[test]
    fn rejects_empty_id_map() {
        let ids: BTreeMap<String, String> = BTreeMap::new();
        assert!(Validator::validate_source_ids(&ids).is_err());

        let mut ids = BTreeMap::new();
        ids.insert("AnimeWorld".to_string(), "123".to_string());
        assert!(Validator::validate_source_ids(&ids).is_ok());
    }
}
