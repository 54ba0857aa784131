use serde::{Deserialize, Serialize};

use crate::domain::{Artwork, ArtworkId};

/// Fields requested from the remote source; everything else is left out of
/// the response body.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworksResponse {
    pub pagination: PaginationInfo,
    pub data: Vec<ArtworkRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total_pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// Artwork as it appears on the wire. The source reports `null` for missing
/// text and dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl From<ArtworkRecord> for Artwork {
    fn from(value: ArtworkRecord) -> Self {
        Self {
            id: ArtworkId(value.id),
            title: value.title.unwrap_or_default(),
            place_of_origin: value.place_of_origin.unwrap_or_default(),
            artist_display: value.artist_display.unwrap_or_default(),
            inscriptions: value.inscriptions.unwrap_or_default(),
            date_start: value.date_start.unwrap_or_default(),
            date_end: value.date_end.unwrap_or_default(),
        }
    }
}

/// Error body returned by the source alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        match (&self.error, &self.detail) {
            (Some(error), Some(detail)) => Some(format!("{error}: {detail}")),
            (Some(text), None) | (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        }
    }
}
