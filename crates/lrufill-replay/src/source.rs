//! Deterministic value source used for replays

use lrufill::ValueSource;
use thiserror::Error;

/// Fetch failure injected with `--fail-on`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value source has no value for key {key:?}")]
pub struct FetchError {
    key: String,
}

/// Produces `value-<key>` for every key except the one told to fail
#[derive(Debug, Default)]
pub struct SyntheticSource {
    fail_on: Option<String>,
}

impl SyntheticSource {
    pub fn new(fail_on: Option<String>) -> Self {
        Self { fail_on }
    }
}

impl ValueSource<String, String> for SyntheticSource {
    type Error = FetchError;

    fn fetch(&mut self, key: &String) -> Result<String, Self::Error> {
        if self.fail_on.as_deref() == Some(key.as_str()) {
            return Err(FetchError { key: key.clone() });
        }
        Ok(format!("value-{key}"))
    }
}
