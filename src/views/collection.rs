//! Bento grid of curated fragments. Static: holds no timers, frames or
//! listeners.

use crate::content::CollectionTile;

/// Delay between consecutive tiles' enter animations.
pub const TILE_STAGGER_MS: u64 = 100;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionView;

impl CollectionView {
    pub fn mount() -> Self {
        CollectionView
    }

    pub fn tile_delay_ms(index: usize) -> u64 {
        index as u64 * TILE_STAGGER_MS
    }

    /// Grid span classes for a tile. Only a span of exactly 2 widens or
    /// lengthens the cell.
    pub fn span_classes(tile: &CollectionTile) -> String {
        let mut classes = Vec::new();
        if tile.col_span == Some(2) {
            classes.push("col-span-2");
        }
        if tile.row_span == Some(2) {
            classes.push("row-span-2");
        }
        classes.join(" ")
    }
}
