//! # rf-ui
//!
//! HTML side of the feed: [`HtmlFeed`] collects what the controller tells a
//! renderer, [`FeedPage`] turns it into the page with askama.

use std::collections::VecDeque;

use askama::Template;
use rf_core::traits::FeedRenderer;
use rf_core::validation::{Field, CONTENT_MAX_LEN, TITLE_MAX_LEN};

/// One visible feed item, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub content: String,
    pub timestamp: String,
}

/// View model of the feed page.
#[derive(Debug, Clone)]
pub struct HtmlFeed {
    /// Newest first.
    entries: VecDeque<FeedEntry>,
    placeholder_visible: bool,
    title_warning: Option<String>,
    content_warning: Option<String>,
    load_error: Option<String>,
}

impl Default for HtmlFeed {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            placeholder_visible: true,
            title_warning: None,
            content_warning: None,
            load_error: None,
        }
    }
}

impl HtmlFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    pub fn warning(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title_warning.as_deref(),
            Field::Content => self.content_warning.as_deref(),
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn warning_slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title_warning,
            Field::Content => &mut self.content_warning,
        }
    }
}

impl FeedRenderer for HtmlFeed {
    fn insert_at_top(&mut self, title: &str, content: &str, timestamp: &str) {
        self.entries.push_front(FeedEntry {
            title: title.to_string(),
            content: content.to_string(),
            timestamp: timestamp.to_string(),
        });
    }

    fn clear_all(&mut self) {
        self.entries.clear();
    }

    fn show_empty_placeholder(&mut self) {
        self.placeholder_visible = true;
    }

    fn hide_empty_placeholder(&mut self) {
        self.placeholder_visible = false;
    }

    fn show_field_warning(&mut self, field: Field, message: &str) {
        *self.warning_slot(field) = Some(message.to_string());
    }

    fn hide_field_warning(&mut self, field: Field) {
        *self.warning_slot(field) = None;
    }

    fn show_load_error(&mut self, message: &str) {
        self.load_error = Some(message.to_string());
    }
}

/// The whole widget page: form, warnings, feed.
#[derive(Template)]
#[template(path = "feed.html")]
pub struct FeedPage<'a> {
    pub entries: &'a VecDeque<FeedEntry>,
    pub show_placeholder: bool,
    pub title_warning: Option<&'a str>,
    pub content_warning: Option<&'a str>,
    pub load_error: Option<&'a str>,
    /// Input values to re-fill after a rejected publish.
    pub title_draft: &'a str,
    pub content_draft: &'a str,
    pub title_max: usize,
    pub content_max: usize,
}

impl<'a> FeedPage<'a> {
    /// Page with empty inputs.
    pub fn new(feed: &'a HtmlFeed) -> Self {
        Self::with_drafts(feed, "", "")
    }

    pub fn with_drafts(feed: &'a HtmlFeed, title_draft: &'a str, content_draft: &'a str) -> Self {
        Self {
            entries: &feed.entries,
            show_placeholder: feed.placeholder_visible,
            title_warning: feed.title_warning.as_deref(),
            content_warning: feed.content_warning.as_deref(),
            load_error: feed.load_error(),
            title_draft,
            content_draft,
            title_max: TITLE_MAX_LEN,
            content_max: CONTENT_MAX_LEN,
        }
    }
}
