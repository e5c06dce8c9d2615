use crate::config::Achievement;
use crate::error::ShellError;
use crate::gallery::{gallery_markup, GALLERY_CONTAINER_ID};
use crate::presenter::Renderer;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions};

const CONTENT_AREA_ID: &str = "content-area";
const PAGE_SELECTOR: &str = ".page";
const ACTIVE_CLASS: &str = "active";
const FLASH_CLASS: &str = "page-transition";
const FLASH_MS: u32 = 500;

/// Pages are `<section id="<page-id>" class="page">` fragments appended to
/// `#content-area`; the visible one carries `active`.
pub struct DomRenderer {
    document: Document,
}

impl DomRenderer {
    pub fn new() -> Result<Self, ShellError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ShellError::InvalidConfig("no document to render into".into()))?;
        Ok(Self { document })
    }

    fn content_area(&self) -> Option<Element> {
        self.document.get_element_by_id(CONTENT_AREA_ID)
    }
}

impl Renderer for DomRenderer {
    fn is_rendered(&self, page_id: &str) -> bool {
        self.document.get_element_by_id(page_id).is_some()
    }

    fn insert_page(&mut self, page_id: &str, markup: &str) -> Result<(), ShellError> {
        let area = self
            .content_area()
            .ok_or_else(|| ShellError::page_load(page_id, "missing #content-area"))?;
        area.insert_adjacent_html("beforeend", markup)
            .map_err(|e| ShellError::page_load(page_id, format!("{:?}", e)))?;

        if !self.is_rendered(page_id) {
            return Err(ShellError::page_load(page_id, "markup has no element with that id"));
        }
        Ok(())
    }

    fn show_exclusively(&mut self, page_id: &str) {
        if let Ok(pages) = self.document.query_selector_all(PAGE_SELECTOR) {
            for i in 0..pages.length() {
                if let Some(page) = pages.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    let _ = page.class_list().remove_1(ACTIVE_CLASS);
                }
            }
        }
        match self.document.get_element_by_id(page_id) {
            Some(page) => {
                let _ = page.class_list().add_1(ACTIVE_CLASS);
            }
            None => log::warn!("cannot show {}: not in the document", page_id),
        }
    }

    fn scroll_to_top(&mut self) {
        if let Some(area) = self.content_area() {
            let opts = ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(ScrollBehavior::Smooth);
            area.scroll_to_with_scroll_to_options(&opts);
        }
    }

    fn flash(&mut self) {
        let Some(area) = self.content_area() else {
            return;
        };
        let _ = area.class_list().add_1(FLASH_CLASS);
        Timeout::new(FLASH_MS, move || {
            let _ = area.class_list().remove_1(FLASH_CLASS);
        })
        .forget();
    }

    fn populate_achievements(&mut self, achievements: &[Achievement]) {
        match self.document.get_element_by_id(GALLERY_CONTAINER_ID) {
            Some(container) => container.set_inner_html(&gallery_markup(achievements)),
            None => log::warn!("#{} not found, skipping achievements", GALLERY_CONTAINER_ID),
        }
    }
}
