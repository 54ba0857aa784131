use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ArtworkId);

/// One catalog entry. Identity is `id` alone; every other field is opaque
/// display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: i64,
    pub date_end: i64,
}

/// One page of records as reported by the remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: u32,
    pub records: Vec<Artwork>,
    pub total_pages: u32,
    pub fetched_at: DateTime<Utc>,
}

impl Page {
    pub fn new(index: u32, records: Vec<Artwork>, total_pages: u32) -> Self {
        Self {
            index,
            records,
            total_pages,
            fetched_at: Utc::now(),
        }
    }
}
