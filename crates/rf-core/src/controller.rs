//! # FeedController
//!
//! Wires form input to the validator and the store, and tells a
//! [`FeedRenderer`] what changed. Holds no view state of its own.

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::time::DisplayZone;
use crate::traits::{Clock, FeedRenderer, PostStore};
use crate::validation::Field;

/// Shown in place of the feed when the stored history cannot be read.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load the post history. Clearing it will start a fresh feed.";

pub struct FeedController {
    store: Box<dyn PostStore>,
    clock: Box<dyn Clock>,
    zone: DisplayZone,
}

impl FeedController {
    pub fn new(store: Box<dyn PostStore>, clock: Box<dyn Clock>, zone: DisplayZone) -> Self {
        Self { store, clock, zone }
    }

    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    /// Validates both fields (title first, first failure wins), then stores
    /// and shows the post.
    pub fn publish(&self, title: &str, content: &str, view: &mut dyn FeedRenderer) -> Result<Post> {
        check_field(Field::Title, title, view)?;
        check_field(Field::Content, content, view)?;

        let post = Post::new(title, content, self.clock.now());
        self.store.append(post.clone())?;

        self.show(&post, view);
        view.hide_empty_placeholder();
        info!(title_len = title.chars().count(), content_len = content.chars().count(), "post published");
        Ok(post)
    }

    /// Keystroke handler: warns about length only.
    pub fn on_input(&self, field: Field, value: &str, view: &mut dyn FeedRenderer) {
        match field.check_live(value) {
            Some(err) => view.show_field_warning(field, &field.warning(err)),
            None => view.hide_field_warning(field),
        }
    }

    pub fn clear(&self, view: &mut dyn FeedRenderer) -> Result<()> {
        self.store.clear()?;
        view.clear_all();
        view.show_empty_placeholder();
        info!("post history cleared");
        Ok(())
    }

    /// Renders the stored history newest-first and returns how many posts it had.
    pub fn restore(&self, view: &mut dyn FeedRenderer) -> Result<usize> {
        let posts = match self.store.load_all() {
            Ok(posts) => posts,
            Err(err @ AppError::CorruptData(_)) => {
                warn!(error = %err, "showing empty feed over unreadable history");
                view.clear_all();
                view.show_load_error(LOAD_ERROR_MESSAGE);
                view.show_empty_placeholder();
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        for post in &posts {
            self.show(post, view);
        }
        if posts.is_empty() {
            view.show_empty_placeholder();
        } else {
            view.hide_empty_placeholder();
        }
        Ok(posts.len())
    }

    fn show(&self, post: &Post, view: &mut dyn FeedRenderer) {
        view.insert_at_top(&post.title, &post.content, &self.zone.format(&post.timestamp));
    }
}

fn check_field(field: Field, value: &str, view: &mut dyn FeedRenderer) -> Result<()> {
    match field.validate(value) {
        Ok(()) => {
            view.hide_field_warning(field);
            Ok(())
        }
        Err(source) => {
            view.show_field_warning(field, &field.warning(source));
            Err(AppError::Validation { field, source })
        }
    }
}
