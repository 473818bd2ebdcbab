use bytes::Bytes;
use itertools::Itertools;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tap::Pipe;

use crate::{
    config::ClientConfig,
    criteria::SearchCriteria,
    model::{Album, Comment, Photo, PhotoPage, Size},
    network::http,
    source::PhotoSource,
};

pub const IMAGE_HOST: &str = "https://live.staticflickr.com";

const EXTRAS: &str = "owner_name,date_taken,date_upload,geo,tags";
const DEFAULT_SEARCH_PER_PAGE: u32 = 30;
const PHOTOSETS_PER_PAGE: u32 = 500;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint answered with `stat: fail`.
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

mod sealed {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use either::Either;
    use serde::{Deserialize, Deserializer};

    use crate::model;

    /// Numbers come back as JSON numbers or as strings depending on endpoint.
    pub type Num<T> = Either<String, T>;

    pub fn num<T: std::str::FromStr + Default>(x: Num<T>) -> T {
        x.right_or_else(|x| x.parse().unwrap_or_default())
    }

    fn zero<T: Default>() -> Num<T> {
        Either::Right(T::default())
    }

    fn null_to_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        let opt = Option::deserialize(d)?;
        Ok(opt.unwrap_or_default())
    }

    fn epoch(x: Option<String>) -> Option<DateTime<Utc>> {
        x?.parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// `0000-00-00 00:00:00` and other placeholders decode to `None`.
    fn taken(x: Option<String>) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&x?, "%Y-%m-%d %H:%M:%S").ok()
    }

    #[derive(Debug, Deserialize)]
    pub struct Status {
        pub stat: String,
        pub code: Option<i64>,
        pub message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Content {
        #[serde(rename = "_content", default)]
        pub content: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photo {
        pub id: String,
        /// absent on photoset items; the envelope carries it instead
        pub owner: Option<String>,
        pub ownername: Option<String>,
        #[serde(default)]
        pub secret: String,
        #[serde(default)]
        pub server: String,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub farm: Num<u32>,
        #[serde(default, deserialize_with = "null_to_default")]
        pub title: String,
        pub dateupload: Option<String>,
        pub datetaken: Option<String>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub ispublic: Num<u8>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub isfriend: Num<u8>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub isfamily: Num<u8>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PhotoEnvelope {
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub page: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub pages: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub perpage: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub total: Num<u64>,
        #[serde(default, deserialize_with = "null_to_default")]
        pub photo: Vec<Photo>,
        /// set only on photoset envelopes
        pub owner: Option<String>,
        pub ownername: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub photos: PhotoEnvelope,
    }

    #[derive(Debug, Deserialize)]
    pub struct PhotosetPhotosResponse {
        pub photoset: PhotoEnvelope,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photoset {
        pub id: String,
        #[serde(default)]
        pub owner: String,
        #[serde(default)]
        pub username: String,
        #[serde(default)]
        pub primary: String,
        #[serde(default)]
        pub secret: String,
        #[serde(default)]
        pub server: String,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub farm: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub count_views: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub count_comments: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub count_photos: Num<u32>,
        #[serde(with = "either::serde_untagged", default = "zero")]
        pub count_videos: Num<u32>,
        pub title: Content,
        pub description: Option<Content>,
        pub date_create: Option<String>,
        pub date_update: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PhotosetList {
        #[serde(default, deserialize_with = "null_to_default")]
        pub photoset: Vec<Photoset>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PhotosetsResponse {
        pub photosets: PhotosetList,
    }

    #[derive(Debug, Deserialize)]
    pub struct Comment {
        pub id: String,
        #[serde(default)]
        pub author: String,
        #[serde(default)]
        pub authorname: String,
        #[serde(rename = "_content", default)]
        pub content: String,
        pub datecreate: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct CommentList {
        #[serde(default, deserialize_with = "null_to_default")]
        pub comment: Vec<Comment>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CommentsResponse {
        #[serde(default)]
        pub comments: CommentList,
    }

    impl From<Photo> for model::Photo {
        fn from(x: Photo) -> Self {
            Self {
                id: x.id,
                owner: x.owner.unwrap_or_default(),
                owner_name: x.ownername.filter(|x| !x.is_empty()),
                secret: x.secret,
                server: x.server,
                farm: num(x.farm),
                title: x.title,
                date_upload: epoch(x.dateupload),
                date_taken: taken(x.datetaken),
                is_public: num(x.ispublic) == 1,
                is_friend: num(x.isfriend) == 1,
                is_family: num(x.isfamily) == 1,
            }
        }
    }

    impl From<PhotoEnvelope> for model::PhotoPage {
        fn from(x: PhotoEnvelope) -> Self {
            let owner = x.owner;
            let ownername = x.ownername;

            let photos = x
                .photo
                .into_iter()
                .map(|mut photo| {
                    if photo.owner.is_none() {
                        photo.owner.clone_from(&owner);
                    }
                    if photo.ownername.is_none() {
                        photo.ownername.clone_from(&ownername);
                    }
                    model::Photo::from(photo)
                })
                .collect();

            Self {
                photos,
                page: num(x.page),
                total_pages: num(x.pages),
                per_page: num(x.perpage),
                total: num(x.total),
            }
        }
    }

    impl From<Photoset> for model::Album {
        fn from(x: Photoset) -> Self {
            Self {
                id: x.id,
                title: x.title.content,
                description: x.description.map(|x| x.content).unwrap_or_default(),
                owner: x.owner,
                owner_name: x.username,
                primary: x.primary,
                secret: x.secret,
                server: x.server,
                farm: num(x.farm),
                photos: num(x.count_photos),
                videos: num(x.count_videos),
                views: num(x.count_views),
                comments: num(x.count_comments),
                created: epoch(x.date_create),
                updated: epoch(x.date_update),
            }
        }
    }

    impl From<Comment> for model::Comment {
        fn from(x: Comment) -> Self {
            Self {
                id: x.id,
                author: x.author,
                author_name: x.authorname,
                content: x.content,
                created: epoch(x.datecreate),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    DatePostedDesc,
    DatePostedAsc,
    DateTakenDesc,
    DateTakenAsc,
    InterestingnessDesc,
    InterestingnessAsc,
    Relevance,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        use Sort::*;

        match self {
            DatePostedDesc => "date-posted-desc",
            DatePostedAsc => "date-posted-asc",
            DateTakenDesc => "date-taken-desc",
            DateTakenAsc => "date-taken-asc",
            InterestingnessDesc => "interestingness-desc",
            InterestingnessAsc => "interestingness-asc",
            Relevance => "relevance",
        }
    }
}

/// Parameters of `flickr.photos.search`. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub text: Option<String>,
    pub user_id: Option<String>,
    /// epoch seconds
    pub min_upload_date: Option<i64>,
    /// epoch seconds
    pub max_upload_date: Option<i64>,
    pub sort: Option<Sort>,
    pub nsfw: Option<bool>,
    pub tags: Vec<String>,
    pub in_gallery: Option<bool>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl SearchOptions {
    pub fn from_criteria(
        criteria: &SearchCriteria,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Self {
        Self {
            text: criteria.text().map(str::to_owned),
            user_id: Some(user_id.to_owned()).filter(|x| !x.is_empty()),
            min_upload_date: criteria.min_upload_date(),
            max_upload_date: criteria.max_upload_date(),
            sort: Some(Sort::DatePostedDesc),
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    fn to_params(&self, params: &mut Vec<(&'static str, String)>) {
        params.push(("extras", EXTRAS.to_owned()));
        params.push((
            "per_page",
            self.per_page.unwrap_or(DEFAULT_SEARCH_PER_PAGE).to_string(),
        ));
        params.push(("page", self.page.unwrap_or(1).to_string()));

        if let Some(text) = self.text.as_ref().filter(|x| !x.is_empty()) {
            params.push(("text", text.clone()));
        }
        if let Some(user_id) = self.user_id.as_ref().filter(|x| !x.is_empty()) {
            params.push(("user_id", user_id.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.iter().join(",")));
        }
        if let Some(min) = self.min_upload_date {
            params.push(("min_upload_date", min.to_string()));
        }
        if let Some(max) = self.max_upload_date {
            params.push(("max_upload_date", max.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_owned()));
        }
        if let Some(nsfw) = self.nsfw {
            params.push(("safe_search", if nsfw { "3" } else { "1" }.to_owned()));
        }
        if let Some(in_gallery) = self.in_gallery {
            params.push(("in_gallery", if in_gallery { "1" } else { "0" }.to_owned()));
        }
    }
}

/// `https://live.staticflickr.com/{server}/{id}_{secret}_{size}.jpg`
pub fn photo_url(photo: &Photo, size: Size) -> String {
    photo_url_on(IMAGE_HOST, photo, size)
}

fn photo_url_on(host: &str, photo: &Photo, size: Size) -> String {
    format!(
        "{}/{}/{}_{}_{}.jpg",
        host.trim_end_matches('/'),
        photo.server,
        photo.id,
        photo.secret,
        size
    )
}

pub struct FlickrClient {
    http: Client,
    config: ClientConfig,
    image_host: String,
}

impl FlickrClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            image_host: IMAGE_HOST.to_owned(),
        }
    }

    pub fn with_image_host(mut self, host: impl Into<String>) -> Self {
        self.image_host = host.into();
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn params(&self, method: &str) -> Vec<(&'static str, String)> {
        vec![
            ("method", method.to_owned()),
            ("api_key", self.config.api_key.clone()),
            ("format", "json".to_owned()),
            ("nojsoncallback", "1".to_owned()),
        ]
    }

    async fn call<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> crate::Result<T> {
        let method = params
            .iter()
            .find(|(k, _)| *k == "method")
            .map(|(_, v)| v.as_str())
            .unwrap_or_default();

        tracing::debug!(method, "flickr request");

        let buf = http::get_text(&self.http, &self.config.base_url, params).await?;

        let status: sealed::Status = serde_json::from_str(&buf).map_err(Error::Decode)?;

        if status.stat != "ok" {
            let err = Error::Api {
                code: status.code.unwrap_or_default(),
                message: status.message.unwrap_or(status.stat),
            };
            tracing::warn!(method, "{err}");
            return Err(err.into());
        }

        serde_json::from_str::<T>(&buf)
            .map_err(Error::Decode)?
            .pipe(Ok)
    }

    pub async fn search_photos(&self, options: &SearchOptions) -> crate::Result<PhotoPage> {
        let mut params = self.params("flickr.photos.search");
        options.to_params(&mut params);

        let resp: sealed::SearchResponse = self.call(&params).await?;
        let page = PhotoPage::from(resp.photos);

        tracing::debug!(
            page = page.page,
            pages = page.total_pages,
            photos = page.photos.len(),
            "search page"
        );

        Ok(page)
    }

    pub async fn photoset_photos(
        &self,
        album_id: &str,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> crate::Result<PhotoPage> {
        let mut params = self.params("flickr.photosets.getPhotos");
        params.extend([
            ("photoset_id", album_id.to_owned()),
            ("extras", EXTRAS.to_owned()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ]);
        if !user_id.is_empty() {
            params.push(("user_id", user_id.to_owned()));
        }

        let resp: sealed::PhotosetPhotosResponse = self.call(&params).await?;
        let page = PhotoPage::from(resp.photoset);

        tracing::debug!(
            album_id,
            page = page.page,
            pages = page.total_pages,
            photos = page.photos.len(),
            "album page"
        );

        Ok(page)
    }

    pub async fn photosets(&self, user_id: &str) -> crate::Result<Vec<Album>> {
        let mut params = self.params("flickr.photosets.getList");
        params.extend([
            ("user_id", user_id.to_owned()),
            ("per_page", PHOTOSETS_PER_PAGE.to_string()),
        ]);

        let resp: sealed::PhotosetsResponse = self.call(&params).await?;

        Ok(resp.photosets.photoset.into_iter().map_into().collect())
    }

    pub async fn photo_comments(&self, photo_id: &str) -> crate::Result<Vec<Comment>> {
        let mut params = self.params("flickr.photos.comments.getList");
        params.push(("photo_id", photo_id.to_owned()));

        let resp: sealed::CommentsResponse = self.call(&params).await?;

        Ok(resp.comments.comment.into_iter().map_into().collect())
    }

    /// Full detail record of one photo, left untyped.
    pub async fn photo_info(
        &self,
        photo_id: &str,
        secret: &str,
    ) -> crate::Result<serde_json::Value> {
        let mut params = self.params("flickr.photos.getInfo");
        params.extend([
            ("photo_id", photo_id.to_owned()),
            ("secret", secret.to_owned()),
        ]);

        self.call(&params).await
    }

    pub async fn owner_public_photos(
        &self,
        user_id: &str,
        per_page: u32,
    ) -> crate::Result<Vec<Photo>> {
        let mut params = self.params("flickr.people.getPublicPhotos");
        params.extend([
            ("extras", "owner_name,date_taken,date_upload".to_owned()),
            ("user_id", user_id.to_owned()),
            ("per_page", per_page.to_string()),
        ]);

        let resp: sealed::SearchResponse = self.call(&params).await?;

        Ok(PhotoPage::from(resp.photos).photos)
    }

    /// Most recently posted photo of an account, if it has any.
    pub async fn latest_photo(&self, user_id: &str) -> crate::Result<Option<Photo>> {
        let options = SearchOptions {
            user_id: Some(user_id.to_owned()),
            sort: Some(Sort::DatePostedDesc),
            per_page: Some(1),
            page: Some(1),
            ..Default::default()
        };

        let page = self.search_photos(&options).await?;

        Ok(page.photos.into_iter().next())
    }

    pub fn photo_url(&self, photo: &Photo, size: Size) -> String {
        photo_url_on(&self.image_host, photo, size)
    }

    pub async fn download(&self, photo: &Photo, size: Size) -> crate::Result<Bytes> {
        let url = self.photo_url(photo, size);

        tracing::debug!(%url, "download");

        let resp = http::get(&self.http, &url, &[]).await?;

        Ok(resp.bytes().await.map_err(http::Error::from)?)
    }
}

impl PhotoSource for FlickrClient {
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        page: u32,
        per_page: u32,
    ) -> crate::Result<PhotoPage> {
        let user_id = self.config.user_id.as_str();

        match criteria.album_id() {
            Some(album_id) => self.photoset_photos(album_id, user_id, page, per_page).await,
            None => {
                let options = SearchOptions::from_criteria(criteria, user_id, page, per_page);
                self.search_photos(&options).await
            }
        }
    }

    async fn fetch_albums(&self) -> crate::Result<Vec<Album>> {
        self.photosets(&self.config.user_id).await
    }
}
