//! Gallery state: filter criteria, accumulated pages and loading flags.
//!
//! The view never performs I/O on its own. Transitions hand out a
//! [`PageRequest`], the caller sends it through a [`PhotoSource`] and feeds
//! the outcome back with [`GalleryView::complete`]. Every change is published
//! on a watch channel so renderers can follow along.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    criteria::SearchCriteria,
    model::{Album, Photo, PhotoPage},
    refine::refine,
    source::PhotoSource,
    viewport::{Sentinel, Viewport},
};

pub const PHOTOS_ERROR: &str = "Could not retrieve photos, please try again later.";
pub const ALBUMS_ERROR: &str = "Could not retrieve albums, please try again later.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// page 1 after a criteria change, replaces the list
    Fresh,
    /// next page after a scroll, appends to the list
    More,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub criteria: SearchCriteria,
    pub page: u32,
    pub per_page: u32,
    pub kind: RequestKind,
    session: u64,
}

impl PageRequest {
    pub async fn send<S: PhotoSource>(&self, source: &S) -> crate::Result<PhotoPage> {
        source
            .fetch_page(&self.criteria, self.page, self.per_page)
            .await
    }
}

/// Pagination cursor and the photos gathered since the last criteria change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub photos: Vec<Photo>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub phase: Phase,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    pub accumulated: usize,
    pub displayed: Arc<Vec<Photo>>,
    pub albums: Arc<Vec<Album>>,
    pub albums_error: Option<String>,
}

pub struct GalleryView {
    criteria: SearchCriteria,
    per_page: u32,
    /// false where network and layout are unavailable, e.g. server rendering
    can_fetch: bool,
    session: u64,
    phase: Phase,
    state: PageState,
    displayed: Arc<Vec<Photo>>,
    albums: Arc<Vec<Album>>,
    albums_error: Option<String>,
    tx: watch::Sender<Snapshot>,
}

impl GalleryView {
    pub fn new(per_page: u32, can_fetch: bool) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());

        let view = Self {
            criteria: SearchCriteria::default(),
            per_page: per_page.max(1),
            can_fetch,
            session: 0,
            phase: Phase::Idle,
            state: PageState {
                page: 1,
                ..Default::default()
            },
            displayed: Arc::default(),
            albums: Arc::default(),
            albums_error: None,
            tx,
        };

        view.notify();

        view
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == Phase::LoadingMore
    }

    /// Accumulated photos after the client-side refinement pass.
    pub fn displayed(&self) -> &[Photo] {
        &self.displayed
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn albums_error(&self) -> Option<&str> {
        self.albums_error.as_deref()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Loads page 1 for the current criteria.
    pub fn start(&mut self) -> Option<PageRequest> {
        self.set_criteria(self.criteria.clone())
    }

    /// Starts a new criteria session: the list is emptied right away and
    /// page 1 is requested.
    pub fn set_criteria(&mut self, criteria: SearchCriteria) -> Option<PageRequest> {
        if !self.can_fetch {
            self.criteria = criteria;
            return None;
        }

        self.criteria = criteria;
        self.session += 1;
        self.state = PageState {
            page: 1,
            ..Default::default()
        };
        self.displayed = Arc::default();
        self.phase = Phase::Loading;

        tracing::debug!(session = self.session, criteria = ?self.criteria, "criteria changed");

        self.notify();

        Some(self.request(1, RequestKind::Fresh))
    }

    /// Requests the next page when the sentinel is visible, more pages
    /// exist and no load-more is pending.
    pub fn on_scroll(&mut self, sentinel_visible: bool) -> Option<PageRequest> {
        if !self.can_fetch
            || !sentinel_visible
            || self.phase == Phase::LoadingMore
            || !self.state.has_more
        {
            return None;
        }

        self.phase = Phase::LoadingMore;

        let next = self.state.page + 1;

        tracing::debug!(session = self.session, page = next, "load more");

        self.notify();

        Some(self.request(next, RequestKind::More))
    }

    pub fn on_viewport(&mut self, viewport: &Viewport, sentinel: &Sentinel) -> Option<PageRequest> {
        self.on_scroll(viewport.reveals(sentinel))
    }

    pub fn complete(&mut self, request: PageRequest, result: crate::Result<PhotoPage>) {
        if request.session != self.session {
            tracing::warn!(
                session = request.session,
                current = self.session,
                page = request.page,
                "discarding response of a previous criteria session"
            );
            return;
        }

        match result {
            Ok(page) => {
                let page_no = if page.page == 0 { request.page } else { page.page };

                match request.kind {
                    RequestKind::Fresh => self.state.photos = page.photos,
                    RequestKind::More => self.state.photos.extend(page.photos),
                }

                self.state.page = page_no;
                self.state.total_pages = page.total_pages;
                self.state.has_more = page_no < page.total_pages;
                self.state.error = None;

                self.displayed = Arc::new(refine(&self.state.photos, &self.criteria));
                self.phase = Phase::Ready;

                tracing::debug!(
                    page = self.state.page,
                    pages = self.state.total_pages,
                    accumulated = self.state.photos.len(),
                    displayed = self.displayed.len(),
                    "page loaded"
                );
            }
            Err(err) => {
                tracing::warn!(page = request.page, "could not retrieve photos: {err}");

                self.state.error = Some(PHOTOS_ERROR.to_owned());
                self.phase = Phase::Error;
            }
        }

        self.notify();
    }

    /// Fetches and applies the album list in one step. The view stays
    /// mutably borrowed until the fetch resolves, so callers that need to
    /// keep paging meanwhile should call [`PhotoSource::fetch_albums`]
    /// themselves and hand the result to [`GalleryView::complete_albums`].
    pub async fn load_albums<S: PhotoSource>(&mut self, source: &S) {
        if !self.can_fetch {
            return;
        }

        let result = source.fetch_albums().await;

        self.complete_albums(result);
    }

    pub fn complete_albums(&mut self, result: crate::Result<Vec<Album>>) {
        match result {
            Ok(albums) => {
                tracing::debug!(albums = albums.len(), "albums loaded");

                self.albums = Arc::new(albums);
                self.albums_error = None;
            }
            Err(err) => {
                tracing::warn!("could not retrieve albums: {err}");

                self.albums = Arc::default();
                self.albums_error = Some(ALBUMS_ERROR.to_owned());
            }
        }

        self.notify();
    }

    fn request(&self, page: u32, kind: RequestKind) -> PageRequest {
        PageRequest {
            criteria: self.criteria.clone(),
            page,
            per_page: self.per_page,
            kind,
            session: self.session,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            page: self.state.page,
            total_pages: self.state.total_pages,
            has_more: self.state.has_more,
            loading: self.is_loading(),
            loading_more: self.is_loading_more(),
            error: self.state.error.clone(),
            accumulated: self.state.photos.len(),
            displayed: self.displayed.clone(),
            albums: self.albums.clone(),
            albums_error: self.albums_error.clone(),
        }
    }

    fn notify(&self) {
        self.tx.send_replace(self.snapshot());
    }
}
