use std::path::PathBuf;
use std::process;

use clap::Parser;
use console::style;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use git_nextver::config::{load_config, Config, RuleConfig};
use git_nextver::domain::Version;
use git_nextver::git::GitCli;
use git_nextver::strategy::BumpEngine;

#[derive(clap::Parser)]
#[command(
    name = "git-nextver",
    version,
    about = "Compute the next semantic version from tags, commits and branch strategies"
)]
struct Args {
    #[arg(
        value_parser = ["auto", "major", "minor", "patch"],
        default_value = "auto",
        help = "Bump strategy: detect from commits or force a fixed number"
    )]
    strategy: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "dir",
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    dir: PathBuf,

    #[arg(
        long,
        help = "Pre-release template such as 'alpha', giving a version like X.Y.Z-alpha.N"
    )]
    pre_release: Option<String>,

    #[arg(
        long,
        help = "Use the pre-release identifiers verbatim, without an incremented suffix"
    )]
    pre_release_overwrite: bool,

    #[arg(
        long,
        help = "Build metadata template giving X.Y.Z+<metadata>, takes precedence over --pre-release"
    )]
    build_metadata: Option<String>,

    #[arg(
        long,
        help = "Inline JSON branch rule, repeatable, replaces the configured rules"
    )]
    branch_strategy: Vec<String>,

    #[arg(long, help = "Regular expression matching breaking change commit messages")]
    major_pattern: Option<String>,

    #[arg(long, help = "Regular expression matching minor change commit messages")]
    minor_pattern: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(version) => println!("{}", version),
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<Version> {
    let config = build_config(args)?;
    let strategy = config.to_strategy()?;
    let repo = GitCli::new(&args.dir);
    let version = BumpEngine::new(strategy, repo).bump()?;
    Ok(version)
}

/// Apply the command line overrides on top of the loaded configuration.
///
/// Inline `--branch-strategy` rules replace the configured rule list. A
/// fixed strategy or any of the decoration flags then collapses the rules
/// into a single catch-all rule, matching every branch.
fn build_config(args: &Args) -> git_nextver::Result<Config> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(pattern) = &args.major_pattern {
        config.major_pattern = pattern.clone();
    }
    if let Some(pattern) = &args.minor_pattern {
        config.minor_pattern = pattern.clone();
    }

    if !args.branch_strategy.is_empty() {
        config.rules = args
            .branch_strategy
            .iter()
            .map(|json| RuleConfig::from_json(json))
            .collect::<git_nextver::Result<Vec<_>>>()?;
    }

    let pre_release = args.pre_release.clone().unwrap_or_default();
    let build_metadata = args.build_metadata.clone().unwrap_or_default();
    if !args.strategy.eq_ignore_ascii_case("auto")
        || !pre_release.is_empty()
        || args.pre_release_overwrite
        || !build_metadata.is_empty()
    {
        config.rules = vec![RuleConfig {
            branches_pattern: ".*".to_string(),
            strategy: args.strategy.to_uppercase(),
            pre_release_template: pre_release,
            pre_release_overwrite: args.pre_release_overwrite,
            build_metadata_template: build_metadata,
        }];
    }

    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
