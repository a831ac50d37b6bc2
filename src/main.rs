//! Clearpoll - ClearCase polling and checkout adapter
//!
//! Binary entry point wiring the engine to a build server's process-based
//! integration: one invocation per polling round or checkout.

use std::env;
use std::path::PathBuf;

use chrono::Duration;
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use clearpoll::changelog::{JsonChangelog, render_summary};
use clearpoll::cleartool::ClearTool;
use clearpoll::config::{self, ScmConfig};
use clearpoll::model::{BuildRef, ChangeSet};
use clearpoll::scm::{PollingDecision, Scm};

#[derive(Parser, Debug)]
#[command(author, version, about = "ClearCase polling and checkout adapter")]
struct Cli {
    /// View tag of the ClearCase view
    #[arg(long, global = true, default_value = "")]
    view: String,

    /// Newline-delimited load rules
    #[arg(long, global = true, default_value = "")]
    load_rules: String,

    /// Path to the view root (working directory for cleartool)
    #[arg(long, global = true)]
    view_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a new build should run
    Poll {
        /// Changelog file of the previous build, if any
        #[arg(long)]
        previous_changelog: Option<PathBuf>,

        /// Seconds the newest change must settle before building
        #[arg(long, default_value_t = 300)]
        quiet_period: i64,
    },

    /// Fetch incremental history and write the changelog
    Checkout {
        /// Where to write this build's changelog
        #[arg(long)]
        changelog: PathBuf,

        /// Changelog file of the previous build, if any
        #[arg(long)]
        previous_changelog: Option<PathBuf>,

        /// Project (job) name of the current build
        #[arg(long)]
        project: String,

        /// Number of the current build
        #[arg(long)]
        build_number: u64,
    },

    /// Validate the view and load-rule configuration
    CheckConfig,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let config = ScmConfig::new(cli.view.clone(), cli.load_rules.clone());
    let fetcher = match cli.view_root {
        Some(ref root) => ClearTool::with_view_root(root.clone()),
        None => ClearTool::new(),
    };
    let scm = Scm::new(config);

    match cli.command {
        Commands::Poll {
            previous_changelog,
            quiet_period,
        } => {
            let previous = read_previous(previous_changelog.as_deref())?;
            let baseline = scm.calc_revision_state(previous.as_ref());

            let decision = scm.compare_remote_revision(
                &fetcher,
                baseline.as_ref(),
                Duration::seconds(quiet_period),
                chrono::Utc::now(),
            )?;

            match decision {
                PollingDecision::BuildNow => println!("BUILD_NOW"),
                PollingDecision::NoChanges => println!("NO_CHANGES"),
            }
        }

        Commands::Checkout {
            changelog,
            previous_changelog,
            project,
            build_number,
        } => {
            let previous = read_previous(previous_changelog.as_deref())?;
            let mut sink = JsonChangelog::new(changelog);

            let set = scm.checkout(
                &fetcher,
                previous.as_ref(),
                BuildRef::new(project, build_number),
                &mut sink,
            )?;

            print!("{}", render_summary(&set));
        }

        Commands::CheckConfig => {
            config::validate(scm.config(), &fetcher).wrap_err("configuration rejected")?;
            println!("configuration OK");
        }
    }

    Ok(())
}

/// Load the previous build's change set when a changelog path was given.
fn read_previous(path: Option<&std::path::Path>) -> color_eyre::Result<Option<ChangeSet>> {
    match path {
        Some(p) => {
            let set = JsonChangelog::new(p)
                .read()
                .wrap_err_with(|| format!("could not read previous changelog {}", p.display()))?;
            Ok(Some(set))
        }
        None => Ok(None),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLEARPOLL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "clearpoll=debug,info"
        } else {
            "clearpoll=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
