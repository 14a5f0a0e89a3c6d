use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use traveritas::config::{self, SiteConfig};
use traveritas::content::ContentStore;
use traveritas::route::Route;
use traveritas::site::Site;
use traveritas::{generate, output, script};

fn version_string() -> &'static str {
    let on_tag = env!("TRAVERITAS_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("TRAVERITAS_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "traveritas")]
#[command(about = "Run, script and snapshot the Traveritas portfolio site")]
#[command(long_about = "\
Run, script and snapshot the Traveritas portfolio site

The site has three routes, chosen by the location fragment:

  \"\"            Home        hero, searchlight, drifting dust
  \"collection\"  Collection  bento grid of curated fragments
  \"blog\"        Journal     categories → posts → article

Anything else reads as Home. Journal navigation plays an exit animation
before every swap; the engine runs on a virtual clock, so sessions and
snapshots are deterministic once [particles] seed is set.

Content comes from the built-in store unless --content names a content.toml
with [[categories]], [[posts]] and [[tiles]] tables.

Run 'traveritas gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site config file (missing file = stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Content file (defaults to the built-in content)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Log engine activity (route changes, transitions, mounts) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one view state as HTML to stdout
    Render {
        /// Location fragment to boot at
        #[arg(long, default_value = "")]
        fragment: String,
        /// Open this journal category (implies the journal)
        #[arg(long)]
        category: Option<String>,
        /// Open this post (implies the journal)
        #[arg(long)]
        post: Option<String>,
    },
    /// Run a session script and print the view after each action
    Session {
        /// Script file, one action per line
        script: PathBuf,
        /// Location fragment to boot at
        #[arg(long, default_value = "")]
        fragment: String,
    },
    /// Render every reachable view into a static directory
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Validate config and content, and list what the site will show
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            fragment,
            category,
            post,
        } => {
            let (store, config) = load_site_inputs(&cli.config, cli.content.as_deref())?;
            let mut site = Site::new(store, config, &fragment);
            open_journal(&mut site, category.as_deref(), post.as_deref());
            println!("{}", site.render().into_string());
        }
        Command::Session {
            script: script_path,
            fragment,
        } => {
            let (store, config) = load_site_inputs(&cli.config, cli.content.as_deref())?;
            let steps = script::load_script(&script_path)?;
            let mut site = Site::new(store, config, &fragment);
            let reports = script::run_script(&mut site, &steps);
            output::print_session_output(&reports, site.transitions_started());
        }
        Command::Build { output: out_dir } => {
            let (store, config) = load_site_inputs(&cli.config, cli.content.as_deref())?;
            println!("==> Rendering snapshots → {}", out_dir.display());
            let report = generate::build(&store, &config, &out_dir)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let (store, config) = load_site_inputs(&cli.config, cli.content.as_deref())?;
            output::print_check_output(&store, &config);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so rendered HTML on stdout stays clean. `RUST_LOG` wins
/// over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_site_inputs(
    config_path: &Path,
    content_path: Option<&Path>,
) -> Result<(ContentStore, SiteConfig), Box<dyn std::error::Error>> {
    let config = config::load_config(config_path)?;
    let store = match content_path {
        Some(path) => ContentStore::load(path)?,
        None => ContentStore::stock(),
    };
    Ok((store, config))
}

/// Drive the site to a journal selection the way a visitor would.
fn open_journal(site: &mut Site, category: Option<&str>, post: Option<&str>) {
    if category.is_none() && post.is_none() {
        return;
    }
    site.navigate(Route::Blog);
    site.flush();
    let exit_ms = site.config().transition.exit_ms;
    if let Some(category) = category {
        site.select_category(category);
        site.advance(exit_ms);
    }
    if let Some(post) = post {
        site.select_post(post);
        site.advance(exit_ms);
    }
}
