use std::env;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::config::{resolve_config, ResolvedConfig};
use crate::core::policy::DirtyPolicy;
use crate::core::record::{record_repositories, RepoRecord};
use crate::error::{RecrepoError, Result};
use crate::git::ops::GitCli;
use crate::util::destination::{write_json, Destination, JsonStyle};
use crate::util::output;

pub const DEFAULT_OUTPUT: &str = "recrepo.json";

const LONG_ABOUT: &str = "\
Record repository status after asserting it's clean.

Writes the revision and toplevel of each repository to a JSON file
(recrepo.json by default). Exits with status 113 without writing anything
when a repository has uncommitted or untracked files, unless told to
ignore them.

Examples:
    recrepo PATH/TO/GIT/REPOSITORY
    recrepo --output=- PATH/TO/GIT/REPOSITORY
    recrepo REPOSITORY_1 REPOSITORY_2";

#[derive(Parser, Debug)]
#[command(name = "recrepo", version)]
#[command(about = "Record repository status after asserting it's clean", long_about = LONG_ABOUT)]
pub struct Cli {
    /// Path to a file or directory inside a project. Multiple paths can be given.
    #[arg(value_name = "POINTER", required_unless_present = "completions")]
    pub pointers: Vec<PathBuf>,
    /// Do not fail on uncommitted or untracked files.
    #[arg(long)]
    pub ignore_dirty: bool,
    /// Do not fail on untracked files; uncommitted changes still fail.
    #[arg(long)]
    pub ignore_untracked: bool,
    /// Path to output JSON file, "-" means stdout [default: recrepo.json]
    #[arg(long, env = "RECREPO_OUTPUT", value_name = "PATH")]
    pub output: Option<String>,
    #[arg(long)]
    pub pretty: bool,
    /// Version-control executable to query.
    #[arg(long, env = "RECREPO_GIT", value_name = "PROGRAM")]
    pub git: Option<PathBuf>,
    #[arg(short, long, env = "RECREPO_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
    #[arg(long)]
    pub no_color: bool,
    /// Print a completion script for SHELL and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Effective options after merging flags, environment and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pointers: Vec<PathBuf>,
    pub policy: DirtyPolicy,
    pub destination: Destination,
    pub style: JsonStyle,
    pub git: PathBuf,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(cli: Cli, config: &ResolvedConfig) -> Self {
        let file = &config.config;
        let ignore_dirty = cli.ignore_dirty || file.ignore_dirty.unwrap_or(false);
        let ignore_untracked = cli.ignore_untracked || file.ignore_untracked.unwrap_or(false);

        let destination = match (cli.output, file.output.as_deref(), config.base_dir()) {
            (Some(value), _, _) => Destination::parse(&value),
            (None, Some(value), Some(base)) => Destination::parse(value).relative_to(base),
            (None, Some(value), None) => Destination::parse(value),
            (None, None, _) => Destination::parse(DEFAULT_OUTPUT),
        };

        let git = cli
            .git
            .or_else(|| file.git.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("git"));

        Self {
            pointers: cli.pointers,
            policy: DirtyPolicy::from_flags(ignore_dirty, ignore_untracked),
            destination,
            style: JsonStyle::from_pretty(cli.pretty || file.pretty.unwrap_or(false)),
            git,
            verbose: cli.verbose,
        }
    }
}

pub fn run() {
    let cli = Cli::parse();
    if cli.no_color {
        output::set_color(false);
    }
    if let Err(err) = dispatch(cli) {
        report_error(&err);
        std::process::exit(err.exit_code());
    }
}

fn report_error(err: &RecrepoError) {
    match err {
        RecrepoError::Dirty(dirty) => output::info(&dirty.to_string()),
        other => output::error(&format!("error: {other}")),
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell);
        return Ok(());
    }

    let cwd = env::current_dir()?;
    let config = resolve_config(&cwd, cli.config.clone())?;
    if cli.verbose {
        if let Some(path) = config.path.as_ref() {
            output::info(&format!("using config {}", path.display()));
        }
    }
    handle_record(&Settings::resolve(cli, &config))
}

fn handle_record(settings: &Settings) -> Result<()> {
    let git = GitCli::new(settings.git.clone()).with_echo(settings.verbose);
    let records = record_repositories(&git, &settings.pointers, settings.policy)?;

    if settings.verbose {
        let dirty = records.iter().filter(|record| !record.is_clean).count();
        if dirty > 0 {
            output::warn(&format!(
                "{} of {} repositories not clean (allowed by {})",
                dirty,
                records.len(),
                settings.policy
            ));
        }
    }

    write_json(&settings.destination, &records, settings.style)?;

    if settings.verbose {
        output::info(&summary(&records, &settings.destination));
    }
    Ok(())
}

fn summary(records: &[RepoRecord], destination: &Destination) -> String {
    let noun = if records.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    format!("recorded {} {} to {}", records.len(), noun, destination)
}

fn print_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}
