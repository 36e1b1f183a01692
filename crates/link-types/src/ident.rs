//! Identifier validation, applied before any store access.

use crate::traits::EdgeStoreError;

/// Dataset ids name directories and table prefixes, so only a conservative
/// character set is accepted and a leading dot is rejected.
pub fn validate_dataset_id(dataset: &str) -> Result<(), EdgeStoreError> {
    if dataset.is_empty() || dataset.len() > 128 {
        return Err(EdgeStoreError::InvalidInput(
            "dataset id must be 1-128 characters".to_string(),
        ));
    }
    if dataset.starts_with('.') {
        return Err(EdgeStoreError::InvalidInput(
            "dataset id must not start with a dot".to_string(),
        ));
    }
    if !dataset
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(EdgeStoreError::InvalidInput(format!(
            "dataset id contains unsupported characters: {}",
            dataset
        )));
    }
    Ok(())
}

/// Tweet ids come from archival exports; shape is not guaranteed beyond
/// being a short token with no whitespace or control characters.
pub fn validate_tweet_id(tweet_id: &str) -> Result<(), EdgeStoreError> {
    if tweet_id.is_empty() || tweet_id.len() > 64 {
        return Err(EdgeStoreError::InvalidInput(
            "tweet id must be 1-64 characters".to_string(),
        ));
    }
    if tweet_id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(EdgeStoreError::InvalidInput(
            "tweet id contains whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}
