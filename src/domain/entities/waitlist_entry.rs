use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single accepted waitlist registration.
///
/// Serialized with camelCase field names; this is the value stored under the
/// entry's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub signup_date: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Build a new entry with a fresh id, signed up now.
    pub fn new(first_name: &str, last_name: &str, email: &str, company: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            company: company.to_owned(),
            signup_date: Utc::now(),
        }
    }
}
