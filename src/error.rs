use crate::network;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Http: {0}")]
    Http(#[from] network::http::Error),

    #[error("Flickr: {0}")]
    Flickr(#[from] crate::flickr::Error),

    #[error("Criteria: {0}")]
    Criteria(#[from] crate::criteria::Error),

    #[error("Config: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(network::http::Error::from(err))
    }
}

impl Error {
    /// The request never produced a usable response.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// The remote answered, but with a failure payload or something that
    /// could not be decoded.
    pub fn is_remote_api(&self) -> bool {
        matches!(self, Error::Flickr(_))
    }
}
