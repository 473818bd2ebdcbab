use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub owner: String,
    pub owner_name: Option<String>,
    pub secret: String,
    pub server: String,
    pub farm: u32,
    pub title: String,
    /// Server-side upload time; the search endpoint filters on this one.
    pub date_upload: Option<DateTime<Utc>>,
    /// Camera time as reported by the owner, no zone attached.
    pub date_taken: Option<NaiveDateTime>,
    pub is_public: bool,
    pub is_friend: bool,
    pub is_family: bool,
}
