use crate::config::Achievement;
use crate::error::ShellError;
use crate::net::HttpClient;
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Everything the presenter does to the page. The DOM implementation lives
/// in `dom.rs`; `HeadlessRenderer` stands in for it natively.
pub trait Renderer {
    fn is_rendered(&self, page_id: &str) -> bool;
    fn insert_page(&mut self, page_id: &str, markup: &str) -> Result<(), ShellError>;
    /// Mark `page_id` active and every other page inactive.
    fn show_exclusively(&mut self, page_id: &str);
    fn scroll_to_top(&mut self);
    /// Transient visual acknowledgment after a page switch.
    fn flash(&mut self);
    fn populate_achievements(&mut self, achievements: &[Achievement]);
}

/// Where page markup comes from.
pub trait PageSource {
    fn fetch_page(&self, page_id: &str) -> LocalBoxFuture<'static, Result<String, ShellError>>;
}

/// Maps page ids to urls and fetches them over an [`HttpClient`].
pub struct PageLoader {
    client: Rc<dyn HttpClient>,
    pages: BTreeMap<String, String>,
}

impl PageLoader {
    pub fn new(client: Rc<dyn HttpClient>, pages: BTreeMap<String, String>) -> Self {
        Self { client, pages }
    }
}

impl PageSource for PageLoader {
    fn fetch_page(&self, page_id: &str) -> LocalBoxFuture<'static, Result<String, ShellError>> {
        let Some(url) = self.pages.get(page_id) else {
            log::error!("page {} not found in page map", page_id);
            return future::ready(Err(ShellError::page_load(page_id, "not in page map"))).boxed_local();
        };
        log::debug!("fetching {} from {}", page_id, url);
        let page = page_id.to_string();
        self.client
            .get_text(url)
            .map(move |result| {
                result.map_err(|e| {
                    log::error!("error loading page {}: {}", page, e);
                    ShellError::page_load(&page, e.to_string())
                })
            })
            .boxed_local()
    }
}

type PendingPage = Shared<LocalBoxFuture<'static, Result<String, ShellError>>>;

enum CacheSlot {
    Loading { generation: u64, pending: PendingPage },
    Ready(String),
}

#[derive(Default)]
struct CacheInner {
    slots: HashMap<String, CacheSlot>,
    next_generation: u64,
}

/// Memoized page markup. Concurrent loads of the same page share one fetch;
/// failed fetches are forgotten so a later activation can retry.
#[derive(Clone, Default)]
pub struct PageCache {
    inner: Rc<RefCell<CacheInner>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page_id: &str) -> Option<String> {
        match self.inner.borrow().slots.get(page_id) {
            Some(CacheSlot::Ready(markup)) => Some(markup.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self, page_id: &str) -> bool {
        matches!(self.inner.borrow().slots.get(page_id), Some(CacheSlot::Loading { .. }))
    }

    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .values()
            .filter(|slot| matches!(slot, CacheSlot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn load(&self, page_id: &str, source: &dyn PageSource) -> LocalBoxFuture<'static, Result<String, ShellError>> {
        let (generation, pending) = {
            let mut inner = self.inner.borrow_mut();
            match inner.slots.get(page_id) {
                Some(CacheSlot::Ready(markup)) => return future::ready(Ok(markup.clone())).boxed_local(),
                // someone's already fetching it, just wait on the same future
                Some(CacheSlot::Loading { generation, pending }) => (*generation, pending.clone()),
                None => {
                    inner.next_generation += 1;
                    let generation = inner.next_generation;
                    let pending = source.fetch_page(page_id).shared();
                    inner.slots.insert(
                        page_id.to_string(),
                        CacheSlot::Loading {
                            generation,
                            pending: pending.clone(),
                        },
                    );
                    (generation, pending)
                }
            }
        };

        let inner = Rc::clone(&self.inner);
        let page = page_id.to_string();
        async move {
            let result = pending.await;
            let mut inner = inner.borrow_mut();
            // only settle the slot if it's still the one we created - a failed
            // load drops the slot, and a retry puts a fresh one in its place
            let ours = matches!(
                inner.slots.get(&page),
                Some(CacheSlot::Loading { generation: g, .. }) if *g == generation
            );
            if ours {
                match &result {
                    Ok(markup) => {
                        inner.slots.insert(page, CacheSlot::Ready(markup.clone()));
                    }
                    Err(_) => {
                        inner.slots.remove(&page);
                    }
                }
            }
            result
        }
        .boxed_local()
    }
}

/// Outcome of a successful [`PagePresenter::activate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Shown(String),
    /// A newer activation was requested while this one was loading.
    Superseded,
}

#[derive(Default)]
struct PresenterState {
    active: Option<String>,
    requests: u64,
}

/// Fetches, inserts and shows content pages. Cheap to clone; clones share
/// state.
#[derive(Clone)]
pub struct PagePresenter {
    renderer: Rc<RefCell<dyn Renderer>>,
    source: Rc<dyn PageSource>,
    cache: PageCache,
    gallery_page: Option<String>,
    achievements: Rc<[Achievement]>,
    state: Rc<RefCell<PresenterState>>,
}

impl PagePresenter {
    pub fn new(renderer: Rc<RefCell<dyn Renderer>>, source: Rc<dyn PageSource>) -> Self {
        Self {
            renderer,
            source,
            cache: PageCache::new(),
            gallery_page: None,
            achievements: Rc::from(Vec::new()),
            state: Rc::new(RefCell::new(PresenterState::default())),
        }
    }

    /// Populate `achievements` into `page_id` whenever it is first inserted.
    pub fn with_gallery(mut self, page_id: &str, achievements: Vec<Achievement>) -> Self {
        self.gallery_page = Some(page_id.to_string());
        self.achievements = Rc::from(achievements);
        self
    }

    pub fn active_page(&self) -> Option<String> {
        self.state.borrow().active.clone()
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Show `page_id`, loading it first if it is not in the document yet.
    /// On failure nothing about the visible page changes.
    pub fn activate(&self, page_id: &str) -> LocalBoxFuture<'static, Result<Activation, ShellError>> {
        let ticket = {
            let mut state = self.state.borrow_mut();
            state.requests += 1;
            state.requests
        };
        self.clone().run_activation(page_id.to_string(), ticket).boxed_local()
    }

    async fn run_activation(self, page_id: String, ticket: u64) -> Result<Activation, ShellError> {
        let rendered = self.renderer.borrow().is_rendered(&page_id);
        if !rendered {
            let markup = self.cache.load(&page_id, self.source.as_ref()).await?;
            let mut renderer = self.renderer.borrow_mut();
            // an overlapping activation may have inserted it while we waited
            if !renderer.is_rendered(&page_id) {
                renderer.insert_page(&page_id, &markup)?;
                if self.gallery_page.as_deref() == Some(page_id.as_str()) {
                    renderer.populate_achievements(&self.achievements);
                }
            }
        }

        // latest cd wins - if another activate started while we were loading,
        // keep the page in the dom but don't show it
        if self.state.borrow().requests != ticket {
            log::debug!("activation of {} superseded", page_id);
            return Ok(Activation::Superseded);
        }

        {
            let mut renderer = self.renderer.borrow_mut();
            renderer.show_exclusively(&page_id);
            renderer.scroll_to_top();
            renderer.flash();
        }
        self.state.borrow_mut().active = Some(page_id.clone());
        log::info!("activated {}", page_id);
        Ok(Activation::Shown(page_id))
    }
}

/// `about-page` -> `about`
pub fn page_label(page_id: &str) -> &str {
    page_id.strip_suffix("-page").unwrap_or(page_id)
}
