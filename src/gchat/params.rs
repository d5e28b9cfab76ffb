use std::collections::HashMap;

use secrecy::SecretString;

use crate::error::InputError;

/// Destination space and credentials taken from the inbound query string.
#[derive(Debug, Clone)]
pub struct QueryParameters {
    pub space: String,
    pub key: SecretString,
    pub token: SecretString,
}

impl QueryParameters {
    /// Pick `space`, `key` and `token` out of the inbound query.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingParameter`] for the first parameter that
    /// is absent or empty.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, InputError> {
        let space = required(query, "space")?;
        let key = required(query, "key")?;
        let token = required(query, "token")?;
        Ok(Self {
            space,
            key: key.into(),
            token: token.into(),
        })
    }
}

fn required(query: &HashMap<String, String>, name: &'static str) -> Result<String, InputError> {
    query
        .get(name)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or(InputError::MissingParameter { name })
}
