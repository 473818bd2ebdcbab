use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub owner_name: String,
    /// id of the cover photo
    pub primary: String,
    pub secret: String,
    pub server: String,
    pub farm: u32,
    pub photos: u32,
    pub videos: u32,
    pub views: u32,
    pub comments: u32,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}
