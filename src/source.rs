use std::future::Future;

use crate::{
    criteria::SearchCriteria,
    model::{Album, PhotoPage},
};

/// Where the gallery gets its pages from.
pub trait PhotoSource {
    /// Album criteria are served from the album endpoint, anything else
    /// from search.
    fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = crate::Result<PhotoPage>> + Send;

    fn fetch_albums(&self) -> impl Future<Output = crate::Result<Vec<Album>>> + Send;
}
