//! Session scripts: a line-based way to drive a [`Site`].
//!
//! One action per line; blank lines and comments are skipped. A comment is a
//! line starting with `#`, or a `#` standing alone as a word; the rest of the
//! line after it is dropped. A `#` glued to a word is part of it, so
//! `fragment #collection` keeps its leading hash.
//!
//! ```text
//! # Open the journal and read an engineering post
//! navigate blog
//! category engineering
//! wait 500
//! post 3
//! wait 500
//! pointer 640 200
//! ```
//!
//! | Action | Effect |
//! |---|---|
//! | `fragment <value>` | write the location fragment directly (may be empty) |
//! | `navigate home\|collection\|blog` | navigate to a route |
//! | `category <id>` / `post <id>` | journal selection request |
//! | `back-to-posts` / `back-to-categories` | journal back request |
//! | `wait <ms>` | advance the virtual clock |
//! | `pointer <x> <y>` / `resize <w> <h>` / `scroll <y>` | host events |
//!
//! Fragment changes are delivered after every action, so each step reports
//! the view the site settled on.

use crate::route::Route;
use crate::site::Site;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Fragment(String),
    Navigate(Route),
    Category(String),
    Post(String),
    BackToPosts,
    BackToCategories,
    Wait(u64),
    Pointer(f64, f64),
    Resize(f64, f64),
    Scroll(f64),
}

fn parse_route(name: &str) -> Result<Route, String> {
    match name {
        "home" => Ok(Route::Home),
        "collection" => Ok(Route::Collection),
        "blog" => Ok(Route::Blog),
        other => Err(format!(
            "unknown route '{other}' (expected home, collection or blog)"
        )),
    }
}

fn parse_number<T: FromStr>(word: &str, what: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("{what} must be a number, got '{word}'"))
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<(), String> {
    if args.len() == count {
        Ok(())
    } else {
        Err(format!(
            "'{verb}' takes {count} argument{}, got {}",
            if count == 1 { "" } else { "s" },
            args.len()
        ))
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or("empty action")?;
        let args: Vec<&str> = words.collect();

        let action = match verb {
            "fragment" => match args.as_slice() {
                [] => Action::Fragment(String::new()),
                [value] => Action::Fragment(value.to_string()),
                _ => return Err("'fragment' takes at most 1 argument".into()),
            },
            "navigate" => {
                expect_args(verb, &args, 1)?;
                Action::Navigate(parse_route(args[0])?)
            }
            "category" => {
                expect_args(verb, &args, 1)?;
                Action::Category(args[0].to_string())
            }
            "post" => {
                expect_args(verb, &args, 1)?;
                Action::Post(args[0].to_string())
            }
            "back-to-posts" => {
                expect_args(verb, &args, 0)?;
                Action::BackToPosts
            }
            "back-to-categories" => {
                expect_args(verb, &args, 0)?;
                Action::BackToCategories
            }
            "wait" => {
                expect_args(verb, &args, 1)?;
                Action::Wait(parse_number(args[0], "wait duration")?)
            }
            "pointer" => {
                expect_args(verb, &args, 2)?;
                Action::Pointer(
                    parse_number(args[0], "x")?,
                    parse_number(args[1], "y")?,
                )
            }
            "resize" => {
                expect_args(verb, &args, 2)?;
                Action::Resize(
                    parse_number(args[0], "width")?,
                    parse_number(args[1], "height")?,
                )
            }
            "scroll" => {
                expect_args(verb, &args, 1)?;
                Action::Scroll(parse_number(args[0], "y")?)
            }
            other => return Err(format!("unknown action '{other}'")),
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fragment(value) => write!(f, "fragment {value}"),
            Action::Navigate(route) => {
                write!(f, "navigate {}", route.to_string().to_lowercase())
            }
            Action::Category(id) => write!(f, "category {id}"),
            Action::Post(id) => write!(f, "post {id}"),
            Action::BackToPosts => write!(f, "back-to-posts"),
            Action::BackToCategories => write!(f, "back-to-categories"),
            Action::Wait(ms) => write!(f, "wait {ms}"),
            Action::Pointer(x, y) => write!(f, "pointer {x} {y}"),
            Action::Resize(w, h) => write!(f, "resize {w} {h}"),
            Action::Scroll(y) => write!(f, "scroll {y}"),
        }
    }
}

/// An action with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub action: Action,
}

fn strip_comment(raw: &str) -> &str {
    let line = raw.trim();
    if line.starts_with('#') {
        return "";
    }
    for (at, _) in line.match_indices('#') {
        let opens_word = line[..at].ends_with(char::is_whitespace);
        let ends_word = line[at + 1..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace);
        if opens_word && ends_word {
            return line[..at].trim_end();
        }
    }
    line
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let content = strip_comment(raw);
            (!content.is_empty()).then_some((index + 1, content))
        })
        .map(|(line, content)| {
            content
                .parse()
                .map(|action| ScriptLine { line, action })
                .map_err(|message| ScriptError::Parse { line, message })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>, ScriptError> {
    let text = fs::read_to_string(path)?;
    parse_script(&text)
}

/// What the site looked like after one action.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub line: usize,
    pub action: String,
    pub at_ms: u64,
    pub fragment: String,
    pub path: String,
    /// Set when a journal action was ignored because the journal is not mounted.
    pub ignored: bool,
}

pub fn apply(site: &mut Site, action: &Action) -> bool {
    let mut ignored = false;
    match action {
        Action::Fragment(value) => site.set_fragment(value),
        Action::Navigate(route) => site.navigate(*route),
        Action::Category(id) => ignored = site.select_category(id).is_none(),
        Action::Post(id) => ignored = site.select_post(id).is_none(),
        Action::BackToPosts => ignored = site.back_to_posts().is_none(),
        Action::BackToCategories => ignored = site.back_to_categories().is_none(),
        Action::Wait(ms) => site.advance(*ms),
        Action::Pointer(x, y) => site.pointer_move(*x, *y),
        Action::Resize(w, h) => site.resize(*w, *h),
        Action::Scroll(y) => site.scroll_to(*y),
    }
    site.flush();
    !ignored
}

pub fn run_script(site: &mut Site, script: &[ScriptLine]) -> Vec<StepReport> {
    script
        .iter()
        .map(|step| {
            let applied = apply(site, &step.action);
            StepReport {
                line: step.line,
                action: step.action.to_string(),
                at_ms: site.now_ms(),
                fragment: site.fragment().to_string(),
                path: site.view_path(),
                ignored: !applied,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::test_helpers::seeded_config;

    #[test]
    fn parses_every_action() {
        let script = parse_script(
            "fragment collection\nfragment\nnavigate blog\ncategory engineering\npost 3\n\
             back-to-posts\nback-to-categories\nwait 500\npointer 10 20.5\nresize 800 600\nscroll 120\n",
        )
        .unwrap();
        let actions: Vec<Action> = script.into_iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::Fragment("collection".into()),
                Action::Fragment(String::new()),
                Action::Navigate(Route::Blog),
                Action::Category("engineering".into()),
                Action::Post("3".into()),
                Action::BackToPosts,
                Action::BackToCategories,
                Action::Wait(500),
                Action::Pointer(10.0, 20.5),
                Action::Resize(800.0, 600.0),
                Action::Scroll(120.0),
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_keep_line_numbers() {
        let script = parse_script("# header\n\nnavigate blog  # go\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].line, 3);
    }

    #[test]
    fn hash_glued_to_a_word_is_not_a_comment() {
        let script = parse_script("fragment #collection\nwait 16 # settle\n#done\n").unwrap();
        let actions: Vec<Action> = script.into_iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![Action::Fragment("#collection".into()), Action::Wait(16)]
        );

        let mut site = Site::new(ContentStore::stock(), seeded_config(), "");
        let script = parse_script("fragment #collection").unwrap();
        assert_eq!(run_script(&mut site, &script)[0].path, "Collection");
    }

    #[test]
    fn trailing_glued_hash_is_rejected_not_dropped() {
        let err = parse_script("wait 500 #later").unwrap_err();
        assert_eq!(err.to_string(), "line 1: 'wait' takes 1 argument, got 2");
    }

    #[test]
    fn parse_errors_carry_line_number() {
        let err = parse_script("navigate blog\nwait soon\n").unwrap_err();
        match err {
            ScriptError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("wait duration"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_verbs_and_routes() {
        assert!(matches!(
            parse_script("teleport"),
            Err(ScriptError::Parse { line: 1, .. })
        ));
        let err = parse_script("navigate about").unwrap_err();
        assert!(err.to_string().contains("unknown route 'about'"));
        let err = parse_script("pointer 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: 'pointer' takes 2 arguments, got 1");
    }

    #[test]
    fn display_parses_back_to_same_action() {
        for text in ["navigate collection", "post 3", "wait 16", "back-to-posts"] {
            let action: Action = text.parse().unwrap();
            assert_eq!(action.to_string(), text);
        }
    }

    #[test]
    fn run_reports_settled_view_per_step() {
        let mut site = Site::new(ContentStore::stock(), seeded_config(), "");
        let script = parse_script(
            "navigate blog\ncategory engineering\nwait 500\npost 3\nwait 500\nnavigate home\n",
        )
        .unwrap();
        let paths: Vec<String> = run_script(&mut site, &script)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "Blog/Overview",
                "Blog/Overview",
                "Blog/CategoryList(engineering)",
                "Blog/CategoryList(engineering)",
                "Blog/Article(3)",
                "Home",
            ]
        );
    }

    #[test]
    fn journal_action_off_journal_is_reported_ignored() {
        let mut site = Site::new(ContentStore::stock(), seeded_config(), "collection");
        let script = parse_script("category engineering").unwrap();
        let report = run_script(&mut site, &script);
        assert!(report[0].ignored);
        assert_eq!(report[0].path, "Collection");
    }
}
