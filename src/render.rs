//! HTML rendering with Maud.
//!
//! Every view state renders to a complete document: the stock stylesheet and
//! the config-generated `:root` block are inlined, so a page needs no other
//! files. Rendering reads state only; it never registers or releases
//! anything.
//!
//! ## Page Layout
//!
//! ```text
//! body
//! ├── div.noise-bg
//! ├── main        ← the mounted view
//! └── nav.menu    ← Essence / Journal / Collection, active entry marked
//! ```
//!
//! The journal wraps its sub-view in a container carrying the transition's
//! animation class and the sub-view key, so a changed key restarts the enter
//! animation.

use crate::blog::{BlogNav, BlogScreen};
use crate::config::{SiteConfig, generate_theme_css};
use crate::content::{Category, CollectionTile, ContentStore, Post, TileKind};
use crate::pointer::PointerTracker;
use crate::route::Route;
use crate::site::Site;
use crate::views::{BlogView, CollectionView, HomeView, MountedView};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

pub const SITE_TITLE: &str = "TRAVERITAS";
pub const EMPTY_CATEGORY_MESSAGE: &str = "No fragments found in this sector.";

/// Menu order differs from route order: the journal sits in the middle.
const MENU_ORDER: [Route; 3] = [Route::Home, Route::Blog, Route::Collection];

/// Stock stylesheet followed by the generated custom properties.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!("{}\n\n{}", CSS_STATIC, generate_theme_css(config))
}

fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                div.noise-bg {}
                (content)
            }
        }
    }
}

/// Renders the floating menu with the current route marked.
pub fn render_nav(current: Route) -> Markup {
    html! {
        nav.menu {
            @for route in MENU_ORDER {
                @let href = format!("#{}", route.fragment());
                @if route == current {
                    a.active href=(href) aria-current="page" { (route.menu_label()) }
                } @else {
                    a href=(href) { (route.menu_label()) }
                }
            }
        }
    }
}

pub fn page_title(site: &Site) -> String {
    match site.view() {
        Some(MountedView::Blog(view)) => match view.nav().resolve(site.store()) {
            BlogScreen::Article { post, .. } => format!("{} · {}", post.title, SITE_TITLE),
            _ => format!("{} · {}", Route::Blog.menu_label(), SITE_TITLE),
        },
        Some(MountedView::Collection(_)) => {
            format!("{} · {}", Route::Collection.menu_label(), SITE_TITLE)
        }
        _ => SITE_TITLE.to_string(),
    }
}

/// Render the whole document for the site's current state.
pub fn render_site(site: &Site) -> Markup {
    let body = match site.view() {
        Some(MountedView::Home(view)) => render_home(view),
        Some(MountedView::Collection(_)) => render_collection(site.store()),
        Some(MountedView::Blog(view)) => render_blog(view, site.store()),
        None => html! {},
    };
    let route = site.current_route();
    let content = html! {
        main { (body) }
        (render_nav(route))
    };
    let body_class = format!("route-{}", route.to_string().to_lowercase());
    base_document(
        &page_title(site),
        &stylesheet(site.config()),
        Some(body_class.as_str()),
        content,
    )
}

// ============================================================================
// Home
// ============================================================================

pub fn render_home(view: &HomeView) -> Markup {
    let spotlight = view.spotlight();
    html! {
        section.hero {
            @if let Some(surface) = view.animator().surface() {
                (surface.to_markup())
            }
            div.spotlight style=(spotlight.spotlight_style()) {}
            div.hero-content {
                h1 { (SITE_TITLE) }
                p.motto.animate-enter style="animation-delay: 1.5s" { "In transitu ad veritatem." }
                div.philosophy.animate-enter style="animation-delay: 2.5s" {
                    p { "Charting the drift between the digital void and tangible reality." }
                    p.roles { "Observer · Seeker · Archive" }
                }
            }
            div.readout.left { (spotlight.coordinate_readout()) }
            div.readout.right { "SYS: ONLINE // OBS_MODE" }
        }
    }
}

// ============================================================================
// Collection
// ============================================================================

pub fn render_collection(store: &ContentStore) -> Markup {
    html! {
        section.collection {
            header.animate-enter {
                h2 { "Curated Fragments" }
                p { "A collection of thoughts, visions, and found objects gathered from the edge of the internet." }
            }
            div.bento {
                @for (index, tile) in store.tiles.iter().enumerate() {
                    (render_tile(tile, index))
                }
            }
        }
    }
}

fn render_tile(tile: &CollectionTile, index: usize) -> Markup {
    let spans = CollectionView::span_classes(tile);
    let class = if spans.is_empty() {
        "tile animate-enter".to_string()
    } else {
        format!("tile animate-enter {spans}")
    };
    let delay = format!(
        "animation-delay: {}ms",
        CollectionView::tile_delay_ms(index)
    );
    html! {
        div class=(class) style=(delay) data-tile=(tile.id) {
            @match tile.kind {
                TileKind::Image => {
                    img src=(tile.content) alt=(tile.sub_content) loading="lazy";
                    p.caption { (tile.sub_content) }
                }
                TileKind::Text => {
                    blockquote { "\u{201c}" (tile.content) "\u{201d}" }
                    p.author { (tile.sub_content) }
                }
                TileKind::Link => {
                    a.link href=(format!("https://{}", tile.sub_content)) target="_blank" rel="noreferrer" {
                        h3 { (tile.content) }
                        p { (tile.sub_content) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Journal
// ============================================================================

pub fn render_blog(view: &BlogView, store: &ContentStore) -> Markup {
    render_journal(
        view.nav(),
        view.transition().animation_class(),
        view.parallax(),
        store,
    )
}

/// Journal container for `nav` with the given animation class.
pub fn render_journal(
    nav: &BlogNav,
    animation_class: &str,
    parallax: &PointerTracker,
    store: &ContentStore,
) -> Markup {
    let screen = nav.resolve(store);
    let label = screen.category_label().to_string();
    let inner = match screen {
        BlogScreen::Overview { categories } => render_overview(categories, parallax),
        BlogScreen::CategoryList { posts, .. } => render_post_list(&label, &posts),
        BlogScreen::EmptyCategory { .. } => render_empty_category(&label),
        BlogScreen::Article { post, .. } => render_article(&label, post),
    };
    html! {
        div class=(format!("journal-view {animation_class}")) data-key=(nav.view_key()) {
            (inner)
        }
    }
}

fn render_overview(categories: &[Category], parallax: &PointerTracker) -> Markup {
    html! {
        section.journal.overview {
            div.fragments {
                @for (index, category) in categories.iter().enumerate() {
                    div class=(format!("fragment fragment-{index}"))
                        style=(parallax.parallax_style(index))
                        data-action=(format!("category:{}", category.id)) {
                        div class=(format!("sheen {}", category.accent)) {}
                        div.index { (format!("{:0>2}", index + 1)) }
                        h3 { (category.title) }
                        p { (category.description) }
                    }
                }
            }
        }
    }
}

fn journal_header(back_action: &str, back_label: &str, label: &str) -> Markup {
    html! {
        div.journal-header {
            button.back data-action=(back_action) { "\u{2190} " (back_label) }
            span.category { (label) }
        }
    }
}

fn render_post_list(label: &str, posts: &[&Post]) -> Markup {
    html! {
        section.journal.posts {
            (journal_header("back-to-categories", "Back to Fragments", label))
            @for (index, post) in posts.iter().enumerate() {
                article.post-item.animate-enter
                    style=(format!("animation-delay: {}ms", index * 100))
                    data-action=(format!("post:{}", post.id)) {
                    div.meta {
                        span { (post.date) }
                        " · "
                        span { (post.read_time) }
                    }
                    h3 { (post.title) }
                    p.excerpt { (post.excerpt) }
                    (render_tags(&post.tags))
                }
            }
        }
    }
}

fn render_empty_category(label: &str) -> Markup {
    html! {
        section.journal.posts {
            (journal_header("back-to-categories", "Back to Fragments", label))
            div.empty {
                p { (EMPTY_CATEGORY_MESSAGE) }
            }
        }
    }
}

fn render_tags(tags: &[String]) -> Markup {
    html! {
        div.tags {
            @for tag in tags {
                span { (tag) }
            }
        }
    }
}

fn render_article(label: &str, post: &Post) -> Markup {
    html! {
        section.journal.article {
            (journal_header("back-to-posts", "Back", label))
            header.article-header {
                div.meta {
                    span { (post.date) }
                    " · "
                    span { (post.read_time) }
                }
                h1 { (post.title) }
                (render_tags(&post.tags))
            }
            article.article-body {
                (PreEscaped(post.content.to_html()))
            }
            div.article-footer {
                p { "Thanks for reading." }
                button.button data-action="back-to-posts" { "Return to List" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RichText;
    use crate::pointer::PointerMode;
    use crate::scheduler::Scheduler;
    use crate::test_helpers::{find_post, seeded_config, store_with_empty_category};

    fn parallax() -> PointerTracker {
        let mut scheduler = Scheduler::new(16);
        PointerTracker::attach(PointerMode::Parallax, &mut scheduler)
    }

    fn category(id: &str) -> BlogNav {
        BlogNav::CategoryList {
            category_id: id.to_string(),
        }
    }

    #[test]
    fn base_document_includes_doctype_and_theme() {
        let css = stylesheet(&SiteConfig::default());
        let doc = base_document("Test", &css, None, html! { p { "test" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("--transition-duration: 500ms"));
        assert!(doc.contains("@keyframes exit"));
    }

    #[test]
    fn nav_marks_current_route() {
        let nav = render_nav(Route::Blog).into_string();
        assert!(nav.contains(r##"<a class="active" href="#blog" aria-current="page">Journal</a>"##));
        assert!(nav.contains(r##"<a href="#">Essence</a>"##));
        assert!(nav.contains(r##"<a href="#collection">Collection</a>"##));
    }

    #[test]
    fn nav_lists_essence_journal_collection_in_order() {
        let nav = render_nav(Route::Home).into_string();
        let essence = nav.find("Essence").unwrap();
        let journal = nav.find("Journal").unwrap();
        let collection = nav.find("Collection").unwrap();
        assert!(essence < journal && journal < collection);
    }

    #[test]
    fn home_renders_particles_and_readout() {
        let mut scheduler = Scheduler::new(16);
        let view = HomeView::mount(&seeded_config(), (1280.0, 800.0), &mut scheduler);
        let html = render_home(&view).into_string();
        assert_eq!(html.matches("<circle").count(), 60);
        assert!(html.contains("POS: 50.00N, 50.00E"));
        assert!(html.contains("circle 500px at 50.00% 50.00%"));
    }

    #[test]
    fn collection_renders_every_tile_with_spans() {
        let html = render_collection(&ContentStore::stock()).into_string();
        assert_eq!(html.matches("data-tile=").count(), 8);
        assert!(html.contains(r#"class="tile animate-enter col-span-2 row-span-2""#));
        assert!(html.contains("animation-delay: 700ms"));
        assert!(html.contains(r#"href="https://medium.com/@user""#));
    }

    #[test]
    fn overview_cards_follow_parallax() {
        let store = ContentStore::stock();
        let html = render_journal(&BlogNav::Overview, "animate-enter", &parallax(), &store)
            .into_string();
        assert_eq!(html.matches("data-action=\"category:").count(), 3);
        assert!(html.contains("transform: translate(0.00px, 0.00px)"));
        assert!(html.contains(r#"data-key="overview""#));
        assert!(html.contains(">01<"));
    }

    #[test]
    fn category_list_renders_posts() {
        let store = ContentStore::stock();
        let html = render_journal(&category("philosophy"), "animate-enter", &parallax(), &store)
            .into_string();
        assert_eq!(html.matches("post-item").count(), 2);
        assert!(html.contains("Philosophy &amp; Design"));
        assert!(!html.contains(EMPTY_CATEGORY_MESSAGE));
    }

    #[test]
    fn empty_category_renders_placeholder() {
        let store = store_with_empty_category();
        let html = render_journal(&category("drafts"), "animate-enter", &parallax(), &store)
            .into_string();
        assert!(html.contains(EMPTY_CATEGORY_MESSAGE));
        assert!(html.contains("Drafts"));
        assert!(!html.contains("post-item"));
    }

    #[test]
    fn unknown_category_uses_fallback_label() {
        let store = ContentStore::stock();
        let html = render_journal(&category("nowhere"), "animate-enter", &parallax(), &store)
            .into_string();
        assert!(html.contains(EMPTY_CATEGORY_MESSAGE));
        assert!(html.contains(r#"<span class="category">Journal</span>"#));
    }

    #[test]
    fn article_injects_body_verbatim() {
        let store = ContentStore::stock();
        let nav = BlogNav::Article {
            category_id: "engineering".into(),
            post_id: "3".into(),
        };
        let html = render_journal(&nav, "animate-exit", &parallax(), &store).into_string();
        let post = find_post(&store, "3");
        assert!(html.contains(&post.content.to_html()));
        assert!(html.contains("Thanks for reading."));
        assert!(html.contains("Return to List"));
        assert!(html.contains(r#"class="journal-view animate-exit""#));
        assert!(html.contains(r#"data-key="post-3""#));
    }

    #[test]
    fn markdown_body_is_converted() {
        let mut store = ContentStore::stock();
        store.posts[0].content = RichText::Markdown("Some *drift* here.".into());
        let nav = BlogNav::Article {
            category_id: "philosophy".into(),
            post_id: store.posts[0].id.clone(),
        };
        let html = render_journal(&nav, "animate-enter", &parallax(), &store).into_string();
        assert!(html.contains("<em>drift</em>"));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut store = ContentStore::stock();
        store.tiles[0].content = "<script>alert(1)</script>".into();
        let html = render_collection(&store).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn site_title_follows_view() {
        let mut site = Site::new(ContentStore::stock(), seeded_config(), "blog");
        assert_eq!(page_title(&site), "Journal · TRAVERITAS");
        site.select_category("engineering");
        site.advance(500);
        site.select_post("3");
        site.advance(500);
        let post = find_post(site.store(), "3");
        assert_eq!(page_title(&site), format!("{} · TRAVERITAS", post.title));
        let html = site.render().into_string();
        assert!(html.contains(r#"<body class="route-blog">"#));
    }
}
