use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row in the records table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub country: String,
}

/// Payload for creating a record via POST /data
///
/// All three fields are required; they are optional here so that an
/// absent field reaches the handler's own validation (400) instead of
/// being rejected by deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecord {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}
