use crate::config::Achievement;
use crate::error::ShellError;
use crate::presenter::Renderer;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory [`Renderer`] for the REPL and for tests. Tracks what the DOM
/// renderer would have done.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pages: BTreeMap<String, String>,
    active: BTreeSet<String>,
    insertions: usize,
    scrolls: usize,
    flashes: usize,
    gallery: Vec<Achievement>,
    populated: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }

    /// The visible page, if exactly one is visible.
    pub fn visible(&self) -> Option<&str> {
        if self.active.len() == 1 {
            self.active.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn visible_count(&self) -> usize {
        self.active.len()
    }

    pub fn insertions(&self) -> usize {
        self.insertions
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls
    }

    pub fn flashes(&self) -> usize {
        self.flashes
    }

    pub fn gallery(&self) -> &[Achievement] {
        &self.gallery
    }

    pub fn achievements_populated(&self) -> usize {
        self.populated
    }
}

impl Renderer for HeadlessRenderer {
    fn is_rendered(&self, page_id: &str) -> bool {
        self.pages.contains_key(page_id)
    }

    fn insert_page(&mut self, page_id: &str, markup: &str) -> Result<(), ShellError> {
        self.pages.insert(page_id.to_string(), markup.to_string());
        self.insertions += 1;
        Ok(())
    }

    fn show_exclusively(&mut self, page_id: &str) {
        self.active.clear();
        if self.pages.contains_key(page_id) {
            self.active.insert(page_id.to_string());
        }
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn flash(&mut self) {
        self.flashes += 1;
    }

    fn populate_achievements(&mut self, achievements: &[Achievement]) {
        self.gallery.extend_from_slice(achievements);
        self.populated += 1;
    }
}
