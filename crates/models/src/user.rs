use chrono::serde::ts_microseconds;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by `UserRecord` itself; extra attributes may not reuse them.
pub const RESERVED_FIELDS: [&str; 6] = ["username", "role", "active", "create_time", "update_time", "gifts"];

/// Persisted user account, keyed by `username` in the user file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub role: String,
    pub active: bool,
    #[serde(with = "ts_microseconds")]
    pub create_time: DateTime<Utc>,
    #[serde(with = "ts_microseconds")]
    pub update_time: DateTime<Utc>,
    /// Ledger of awarded gifts; written by reward flows outside the store.
    #[serde(default)]
    pub gifts: Vec<Value>,
    /// Free-form attributes supplied at creation.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Fresh record stamped at `now`: active, no gifts.
    pub fn new(username: String, role: String, extra: Map<String, Value>, now: DateTime<Utc>) -> Self {
        Self {
            username,
            role,
            active: true,
            create_time: now,
            update_time: now,
            gifts: Vec::new(),
            extra,
        }
    }

    /// Refresh `update_time`, always moving it strictly forward.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.update_time + Duration::microseconds(1);
        self.update_time = if now > self.update_time { now } else { floor };
    }
}

/// Current instant at the precision the user file stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Creation input. Both `username` and `role` are required; they are optional here so
/// that a missing value is reported by the store rather than rejected at compile time.
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub username: Option<String>,
    pub role: Option<String>,
    pub extra: Map<String, Value>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self { username: Some(username.into()), role: Some(role.into()), extra: Map::new() }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A timestamp as returned by listings: raw, or rendered for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Instant(#[serde(with = "ts_microseconds")] DateTime<Utc>),
    Display(String),
}

/// Read-only view of a user, as produced by listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserView {
    pub username: String,
    pub role: String,
    pub active: bool,
    pub create_time: Timestamp,
    pub update_time: Timestamp,
    pub gifts: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserView {
    pub fn raw(rec: UserRecord) -> Self {
        Self::build(rec, Timestamp::Instant)
    }

    pub fn formatted(rec: UserRecord, render: impl Fn(DateTime<Utc>) -> String) -> Self {
        Self::build(rec, |ts| Timestamp::Display(render(ts)))
    }

    fn build(rec: UserRecord, ts: impl Fn(DateTime<Utc>) -> Timestamp) -> Self {
        Self {
            create_time: ts(rec.create_time),
            update_time: ts(rec.update_time),
            username: rec.username,
            role: rec.role,
            active: rec.active,
            gifts: rec.gifts,
            extra: rec.extra,
        }
    }
}
