//! Journal navigation: Overview → CategoryList → Article and back.
//!
//! [`BlogNav`] is the selection state; [`NavUpdate`] is a requested change.
//! Updates are never applied directly by callers: the journal view routes
//! them through its transition controller and applies them with
//! [`BlogNav::apply`] when the exit animation has finished.
//!
//! [`BlogNav::resolve`] turns a selection into a [`BlogScreen`] ready to
//! render, handling the two degenerate cases explicitly:
//!
//! - a category with no posts (or an unknown category) resolves to
//!   [`BlogScreen::EmptyCategory`], never to an empty list;
//! - an article whose post id no longer resolves redirects to the overview.

use crate::content::{Category, ContentStore, Post};
use std::fmt;
use tracing::debug;

/// Label shown when a category id does not resolve.
pub const FALLBACK_CATEGORY_LABEL: &str = "Journal";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlogNav {
    #[default]
    Overview,
    CategoryList { category_id: String },
    Article { category_id: String, post_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavUpdate {
    SelectCategory(String),
    SelectPost(String),
    BackToPosts,
    BackToCategories,
}

impl BlogNav {
    /// Apply an update against the store, returning the next selection.
    pub fn apply(&self, update: &NavUpdate, store: &ContentStore) -> BlogNav {
        let next = match update {
            NavUpdate::SelectCategory(id) => BlogNav::CategoryList {
                category_id: id.clone(),
            },
            NavUpdate::SelectPost(post_id) => match store.post(post_id) {
                Some(post) => BlogNav::Article {
                    category_id: post.category_id.clone(),
                    post_id: post_id.clone(),
                },
                None => {
                    debug!(post_id = %post_id, "unknown post, redirecting to overview");
                    BlogNav::Overview
                }
            },
            NavUpdate::BackToPosts => match self {
                BlogNav::Article { category_id, .. } => BlogNav::CategoryList {
                    category_id: category_id.clone(),
                },
                other => other.clone(),
            },
            NavUpdate::BackToCategories => BlogNav::Overview,
        };
        debug!(from = %self, to = %next, "journal selection changed");
        next
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            BlogNav::Overview => None,
            BlogNav::CategoryList { category_id } | BlogNav::Article { category_id, .. } => {
                Some(category_id)
            }
        }
    }

    /// Stable key for the rendered sub-view; changes whenever the screen does.
    pub fn view_key(&self) -> String {
        match self {
            BlogNav::Overview => "overview".to_string(),
            BlogNav::CategoryList { category_id } => format!("category-{category_id}"),
            BlogNav::Article { post_id, .. } => format!("post-{post_id}"),
        }
    }

    pub fn resolve<'a>(&self, store: &'a ContentStore) -> BlogScreen<'a> {
        match self {
            BlogNav::Overview => BlogScreen::Overview {
                categories: &store.categories,
            },
            BlogNav::CategoryList { category_id } => {
                let category = store.category(category_id);
                let posts = store.posts_in(category_id);
                if posts.is_empty() {
                    BlogScreen::EmptyCategory { category }
                } else {
                    BlogScreen::CategoryList { category, posts }
                }
            }
            BlogNav::Article {
                category_id,
                post_id,
            } => match store.post(post_id) {
                Some(post) => BlogScreen::Article {
                    category: store.category(category_id),
                    post,
                },
                None => BlogScreen::Overview {
                    categories: &store.categories,
                },
            },
        }
    }
}

impl fmt::Display for BlogNav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogNav::Overview => write!(f, "Overview"),
            BlogNav::CategoryList { category_id } => write!(f, "CategoryList({category_id})"),
            BlogNav::Article { post_id, .. } => write!(f, "Article({post_id})"),
        }
    }
}

/// A journal selection resolved against the store.
#[derive(Debug, PartialEq)]
pub enum BlogScreen<'a> {
    Overview {
        categories: &'a [Category],
    },
    CategoryList {
        category: Option<&'a Category>,
        posts: Vec<&'a Post>,
    },
    /// Explicit "no results" branch for a category without posts.
    EmptyCategory {
        category: Option<&'a Category>,
    },
    Article {
        category: Option<&'a Category>,
        post: &'a Post,
    },
}

impl BlogScreen<'_> {
    /// Header label for the category in view.
    pub fn category_label(&self) -> &str {
        match self {
            BlogScreen::Overview { .. } => FALLBACK_CATEGORY_LABEL,
            BlogScreen::CategoryList { category, .. }
            | BlogScreen::EmptyCategory { category }
            | BlogScreen::Article { category, .. } => category
                .map(|c| c.title.as_str())
                .unwrap_or(FALLBACK_CATEGORY_LABEL),
        }
    }
}
