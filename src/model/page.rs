use serde::{Deserialize, Serialize};

use super::Photo;

/// One page of photos, whichever endpoint produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub total: u64,
}

impl PhotoPage {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u32, total_pages: u32) -> PhotoPage {
        PhotoPage {
            photos: vec![],
            page,
            total_pages,
            per_page: 20,
            total: 0,
        }
    }

    #[test]
    fn has_more_until_last_page() {
        assert!(page(1, 3).has_more());
        assert!(page(2, 3).has_more());
        assert!(!page(3, 3).has_more());
        assert!(!page(1, 0).has_more());
        assert!(!page(4, 3).has_more());
    }
}
