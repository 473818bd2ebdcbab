pub mod config;
pub mod criteria;
pub mod error;
pub mod flickr;
pub mod model;
pub mod network;
pub mod refine;
pub mod source;
pub mod view;
pub mod viewport;

pub use crate::config::ClientConfig;
pub use crate::criteria::SearchCriteria;
pub use crate::error::Error;
pub use crate::flickr::FlickrClient;
pub use crate::source::PhotoSource;
pub use crate::view::GalleryView;

pub type Result<T> = std::result::Result<T, Error>;
