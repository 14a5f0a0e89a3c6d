//! CLI output formatting for every command.
//!
//! Output is **content-first**: each entity is shown by positional index and
//! title, with details on indented lines underneath. The same helpers render
//! categories, posts, tiles and pages so every command reads alike.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Journal
//! 001 Philosophy & Design (2 posts)
//!     001 The Silence of Interfaces
//!         Oct 12, 2024 · 4 min read · 131 words
//!         Tags: Design, Philosophy
//! 003 Observations (1 post)
//!
//! Collection
//! 001 Text: "Design is not just what it looks like an..." (2x1)
//!
//! Config
//!     transition: 500ms exit
//!     particles: 60 (random seed)
//!     viewport: 1280x800, 16ms frames
//!
//! Checked 3 categories, 4 posts, 8 tiles
//! ```
//!
//! ## Session
//!
//! ```text
//!   1      0ms  navigate blog            → Blog/Overview
//!   2      0ms  category engineering     → Blog/Overview
//!   3    500ms  wait 500                 → Blog/CategoryList(engineering)
//!
//! Ran 3 actions, 1 transition, ended at Blog/CategoryList(engineering)
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//! 003 Blog/Overview → blog/index.html
//!
//! Generated 10 pages in dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::content::{CollectionTile, ContentStore, Post, TileKind};
use crate::generate::BuildReport;
use crate::script::StepReport;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    match (n, word.strip_suffix('y')) {
        (1, _) => format!("{n} {word}"),
        (_, Some(stem)) => format!("{n} {stem}ies"),
        (_, None) => format!("{n} {word}s"),
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

fn word_count(post: &Post) -> usize {
    strip_html_tags(&post.content.to_html())
        .split_whitespace()
        .count()
}

fn tile_line(index: usize, tile: &CollectionTile) -> String {
    let kind = match tile.kind {
        TileKind::Text => "Text",
        TileKind::Image => "Image",
        TileKind::Link => "Link",
    };
    let label = match tile.kind {
        TileKind::Text => format!("\"{}\"", truncate_text(&tile.content, 40)),
        TileKind::Image => tile.sub_content.clone(),
        TileKind::Link => format!("{} ({})", tile.content, tile.sub_content),
    };
    let cols = tile.col_span.unwrap_or(1);
    let rows = tile.row_span.unwrap_or(1);
    if cols == 1 && rows == 1 {
        format!("{} {}: {}", format_index(index), kind, label)
    } else {
        format!("{} {}: {} ({}x{})", format_index(index), kind, label, cols, rows)
    }
}

// ============================================================================
// Check
// ============================================================================

/// Content inventory plus the effective config.
pub fn format_check_output(store: &ContentStore, config: &SiteConfig) -> Vec<String> {
    let mut lines = vec!["Journal".to_string()];
    for (ci, category) in store.categories.iter().enumerate() {
        let posts = store.posts_in(&category.id);
        lines.push(format!(
            "{} {} ({})",
            format_index(ci + 1),
            category.title,
            plural(posts.len(), "post")
        ));
        for (pi, post) in posts.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(pi + 1),
                post.title
            ));
            lines.push(format!(
                "{}{} · {} · {}",
                indent(2),
                post.date,
                post.read_time,
                plural(word_count(post), "word")
            ));
            if !post.tags.is_empty() {
                lines.push(format!("{}Tags: {}", indent(2), post.tags.join(", ")));
            }
        }
    }

    lines.push(String::new());
    lines.push("Collection".to_string());
    for (ti, tile) in store.tiles.iter().enumerate() {
        lines.push(tile_line(ti + 1, tile));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!(
        "{}transition: {}ms exit",
        indent(1),
        config.transition.exit_ms
    ));
    let seed = match config.particles.seed {
        Some(seed) => format!("seed {seed}"),
        None => "random seed".to_string(),
    };
    lines.push(format!(
        "{}particles: {} ({})",
        indent(1),
        config.particles.count,
        seed
    ));
    lines.push(format!(
        "{}viewport: {}x{}, {}ms frames",
        indent(1),
        config.viewport.width,
        config.viewport.height,
        config.viewport.frame_interval_ms
    ));

    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {}, {}",
        plural(store.categories.len(), "category"),
        plural(store.posts.len(), "post"),
        plural(store.tiles.len(), "tile")
    ));
    lines
}

pub fn print_check_output(store: &ContentStore, config: &SiteConfig) {
    for line in format_check_output(store, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Session
// ============================================================================

pub fn format_session_step(step: &StepReport) -> String {
    let mut line = format!(
        "{:>3} {:>6}ms  {:<24} → {}",
        step.line, step.at_ms, step.action, step.path
    );
    if step.ignored {
        line.push_str(" (ignored)");
    }
    line
}

pub fn format_session_output(steps: &[StepReport], transitions: usize) -> Vec<String> {
    let mut lines: Vec<String> = steps.iter().map(format_session_step).collect();
    let end = steps
        .last()
        .map(|s| s.path.as_str())
        .unwrap_or("(no actions)");
    lines.push(String::new());
    lines.push(format!(
        "Ran {}, {}, ended at {}",
        plural(steps.len(), "action"),
        plural(transitions, "transition"),
        end
    ));
    lines
}

pub fn print_session_output(steps: &[StepReport], transitions: usize) {
    for line in format_session_output(steps, transitions) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {} → {}", format_index(i + 1), page.view, page.file))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        plural(report.pages.len(), "page"),
        report.output_dir.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
