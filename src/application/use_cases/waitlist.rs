use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::{all_non_empty, any_control_chars, is_valid_email};
use crate::domain::entities::waitlist_entry::WaitlistEntry;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields. Please provide firstName, lastName, email, and company.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const CONTROL_CHARS_MESSAGE: &str = "Fields must not contain control characters";
pub const ALREADY_REGISTERED_MESSAGE: &str = "Email already registered on waitlist";

// ============================================================================
// Store Trait
// ============================================================================

/// Key-value store holding serialized waitlist entries.
///
/// Any backend failure is reported as `AppError::StorageUnavailable`.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Atomically store `value` only if `key` has no value.
    /// Returns true if the value was written.
    async fn insert_if_absent(&self, key: &str, value: &str) -> AppResult<bool>;

    /// All values whose key starts with `prefix`, in no particular order.
    async fn scan_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    store: Arc<dyn KvStore>,
    key_prefix: String,
}

impl WaitlistUseCases {
    pub fn new(store: Arc<dyn KvStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Store key for an email. The email is used verbatim, without case folding.
    pub fn entry_key(&self, email: &str) -> String {
        format!("{}{}", self.key_prefix, email)
    }

    /// Register a new waitlist entry.
    ///
    /// Empty strings count as missing fields. Nothing is written unless the
    /// entry is accepted, and the write itself is insert-if-absent, so two
    /// concurrent sign-ups for one email cannot both succeed.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        company: &str,
    ) -> AppResult<WaitlistEntry> {
        if !all_non_empty(&[first_name, last_name, email, company]) {
            return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.into()));
        }

        if any_control_chars(&[first_name, last_name, email, company]) {
            return Err(AppError::InvalidInput(CONTROL_CHARS_MESSAGE.into()));
        }

        if !is_valid_email(email) {
            return Err(AppError::InvalidInput(INVALID_EMAIL_MESSAGE.into()));
        }

        let key = self.entry_key(email);

        if self.store.get(&key).await?.is_some() {
            return Err(AppError::Conflict(ALREADY_REGISTERED_MESSAGE.into()));
        }

        let entry = WaitlistEntry::new(first_name, last_name, email, company);
        let value = serde_json::to_string(&entry).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode waitlist entry");
            AppError::StorageUnavailable(format!("Failed to encode entry: {e}"))
        })?;

        if !self.store.insert_if_absent(&key, &value).await? {
            // Another request wrote this key after our lookup.
            tracing::warn!(email = %email, "Concurrent waitlist signup lost the insert");
            return Err(AppError::Conflict(ALREADY_REGISTERED_MESSAGE.into()));
        }

        tracing::info!(email = %email, company = %company, id = %entry.id, "New waitlist signup");

        Ok(entry)
    }

    /// Number of entries stored under the waitlist prefix.
    #[instrument(skip(self))]
    pub async fn count(&self) -> AppResult<u64> {
        let entries = self.store.scan_prefix(&self.key_prefix).await?;
        Ok(entries.len() as u64)
    }
}
