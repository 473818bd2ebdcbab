//! Loads the album list and the first two gallery pages.
//!
//! Reads `FLICKR_API_KEY` / `FLICKR_USER_ID` or a config file given as the
//! first argument.

use std::path::PathBuf;

use flickr_gallery::{
    flickr::photo_url, model::Size, ClientConfig, FlickrClient, GalleryView, SearchCriteria,
};

#[tokio::main]
async fn main() -> flickr_gallery::Result<()> {
    tracing_subscriber::fmt().init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = ClientConfig::load(path.as_deref())?;
    let per_page = config.per_page;

    let client = FlickrClient::new(config);
    let mut view = GalleryView::new(per_page, true);

    let criteria = SearchCriteria::from_form("", "", "", "")?;

    if let Some(req) = view.set_criteria(criteria) {
        let (albums, page) = futures::join!(
            flickr_gallery::PhotoSource::fetch_albums(&client),
            req.send(&client)
        );
        view.complete_albums(albums);
        view.complete(req, page);
    }

    if let Some(req) = view.on_scroll(true) {
        let page = req.send(&client).await;
        view.complete(req, page);
    }

    for album in view.albums() {
        println!("[{}] {} ({} photos)", album.id, album.title, album.photos);
    }

    if let Some(err) = &view.state().error {
        println!("{err}");
    }

    for photo in view.displayed() {
        println!("{} {}", photo.title, photo_url(photo, Size::default()));
    }

    Ok(())
}
