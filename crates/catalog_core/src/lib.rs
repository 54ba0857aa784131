//! Paged artwork catalog with a selection that survives navigation.
//!
//! [`PageSelectionController`] owns the visible page and the selection. Page
//! data comes from a [`PageFetcher`]; [`HttpPageFetcher`] talks to the public
//! Art Institute of Chicago API.

pub mod controller;
pub mod fetcher;
pub mod selection;

pub use controller::{clamp_page, LoadState, PageSelectionController, PageView, ResponseOutcome};
pub use fetcher::{HttpPageFetcher, PageFetcher, DEFAULT_API_BASE_URL};
pub use selection::SelectionSet;
pub use shared::{
    domain::{Artwork, ArtworkId, Page},
    error::FetchError,
};
