//! # Traveritas
//!
//! The engine behind a small portfolio site: a hero landing view, a bento
//! grid collection and a journal, tied together by fragment routing.
//!
//! The site runs against a simulated host (location fragment, virtual clock,
//! timers, frame callbacks, event listeners, viewport, scroll) and renders
//! whatever view is mounted to HTML. The same engine drives programmatic
//! sessions, scripted sessions from the CLI, and a static snapshot export.
//!
//! # Architecture
//!
//! ```text
//! Location ──fragment change──▶ RouteResolver ──route──▶ Site mounts view
//!                                                         │
//!         ┌───────────────────────────────────────────────┼──────────────┐
//!         ▼                                               ▼              ▼
//!      HomeView                                    CollectionView     BlogView
//!   spotlight + particles                              static      BlogNav behind a
//!                                                                  TransitionController
//! ```
//!
//! Nothing in the engine runs on its own. Components register timers, frames
//! and listeners with the [`scheduler::Scheduler`] and get handles back; the
//! [`site::Site`] advances the clock and routes each due handle to its owner.
//! Every registration is released on teardown, and the scheduler's live
//! counts let tests check that.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scheduler`] | Virtual clock, timers, frame callbacks, listener registry |
//! | [`route`] | Fragment ↔ route mapping, location, route resolver |
//! | [`transition`] | Exit → apply → enter sequencing with a FIFO queue |
//! | [`blog`] | Journal navigation state machine and screen resolution |
//! | [`particles`] | Dust field, drawing surface trait, frame-loop animator |
//! | [`pointer`] | Spotlight and parallax pointer normalization |
//! | [`views`] | Home / Collection / Blog views and their mount lifecycle |
//! | [`site`] | The running site: host events, clock, view swaps |
//! | [`render`] | HTML for every view state using Maud |
//! | [`content`] | Categories, posts and tiles; stock content and `content.toml` |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`script`] | Line-based session scripts |
//! | [`generate`] | Static snapshot export of every reachable view |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Handles, Not Callbacks
//!
//! Timers and frames are identified by handles, and the owner matches a due
//! handle against the one it holds. A torn-down view holds no handles, so a
//! late timer has nowhere to land and its update is never applied.
//!
//! ## Queued Transitions
//!
//! A journal selection requested while an exit animation is running waits
//! its turn and then plays its own full exit. Nothing is dropped, and no two
//! exits overlap.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): markup is checked
//! at compile time and interpolation is escaped. Article bodies are trusted
//! site content and are the one place markup is injected verbatim.

pub mod blog;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod particles;
pub mod pointer;
pub mod render;
pub mod route;
pub mod scheduler;
pub mod script;
pub mod site;
pub mod transition;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;
