//! Shared test utilities for the traveritas test suite.
//!
//! Lookup helpers panic with the available ids on a miss, so a failing test
//! says what it could have found instead.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = store_with_empty_category();
//! let post = find_post(&store, "3");
//! let mut site = Site::new(store.clone(), seeded_config(), "blog");
//! ```

use crate::config::{ParticleConfig, SiteConfig};
use crate::content::{Category, CollectionTile, ContentStore, Post};

// =========================================================================
// Fixtures
// =========================================================================

/// Stock config with a fixed particle seed, for reproducible frames.
pub fn seeded_config() -> SiteConfig {
    SiteConfig {
        particles: ParticleConfig {
            seed: Some(7),
            ..ParticleConfig::default()
        },
        ..SiteConfig::default()
    }
}

/// Stock content plus a `drafts` category with no posts.
pub fn store_with_empty_category() -> ContentStore {
    let mut store = ContentStore::stock();
    store.categories.push(Category {
        id: "drafts".to_string(),
        title: "Drafts".to_string(),
        description: "Unfinished fragments.".to_string(),
        accent: "from-zinc-500/10 to-transparent".to_string(),
    });
    store
}

// =========================================================================
// Store lookups: panic with a clear message on miss
// =========================================================================

/// Find a post by id. Panics if not found.
pub fn find_post<'a>(store: &'a ContentStore, id: &str) -> &'a Post {
    store.post(id).unwrap_or_else(|| {
        let ids: Vec<&str> = store.posts.iter().map(|p| p.id.as_str()).collect();
        panic!("post '{id}' not found. Available: {ids:?}")
    })
}

/// Find a collection tile by id. Panics if not found.
pub fn find_tile<'a>(store: &'a ContentStore, id: &str) -> &'a CollectionTile {
    store.tiles.iter().find(|t| t.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = store.tiles.iter().map(|t| t.id.as_str()).collect();
        panic!("tile '{id}' not found. Available: {ids:?}")
    })
}
