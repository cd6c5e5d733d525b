use anyhow::{bail, Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{load_config, Config};
use crate::github::client::DEFAULT_GH_BINARY;
use crate::github::{PullRequestSource, RepositoryRef};
use crate::render::JinjaRenderer;
use crate::report::{ReportGenerator, ReportRequest};

/// Template used when neither the command line nor the config names one
pub const DEFAULT_TEMPLATE: &str = "template.html";

#[derive(Parser, Debug)]
#[command(name = "pr-report")]
#[command(about = "Render open and recently merged GitHub PRs as an HTML report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Repositories to look at: org/repo
    #[arg(long, value_name = "REPO", num_args = 1..)]
    pub repos: Vec<RepositoryRef>,

    /// Only include PRs by these users; `--users` alone disables the filter
    #[arg(long, value_name = "USER", num_args = 0..)]
    pub users: Option<Vec<String>>,

    /// Also include PRs merged fewer than this many days ago
    #[arg(long, value_name = "DAYS")]
    pub merged_days: Option<i64>,

    /// Template file to render (defaults to ./template.html)
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Path to config file (defaults to ~/.config/pr-report/config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// GitHub CLI binary to run
    #[arg(long, value_name = "PATH", default_value = DEFAULT_GH_BINARY)]
    pub gh: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs once flags and config file are merged
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub request: ReportRequest,
    /// Directory the template is loaded from
    pub template_dir: PathBuf,
    pub gh: String,
}

impl Cli {
    /// Merge flags over `config`. Flags win wherever they were given.
    pub fn resolve(self, config: Config) -> Result<Settings> {
        let repos = if self.repos.is_empty() {
            config
                .repos
                .iter()
                .map(|token| token.parse::<RepositoryRef>())
                .collect::<Result<Vec<_>, _>>()
                .context("Invalid repository in config file")?
        } else {
            self.repos
        };

        if repos.is_empty() {
            bail!("No repositories configured. Pass --repos org/name or add repos to the config file.");
        }

        // `--users` with no values still overrides the config file
        let users = self.users.unwrap_or(config.users);

        let merged_days = self.merged_days.or(config.merged_days);
        if let Some(days) = merged_days {
            if days < 1 {
                bail!("--merged-days must be at least 1, got {}", days);
            }
        }

        let template_path = self
            .template
            .or_else(|| config.template.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE));
        let (template_dir, template) = split_template_path(&template_path)?;

        Ok(Settings {
            request: ReportRequest {
                repos,
                users,
                merged_days,
                template,
            },
            template_dir,
            gh: self.gh,
        })
    }
}

/// Why a run ended without a report
#[derive(Debug)]
pub enum RunError {
    /// Bad command line; clap knows how to print and exit
    Usage(clap::Error),
    Config(anyhow::Error),
    Report(anyhow::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Usage(e) => write!(f, "{}", e),
            RunError::Config(e) => write!(f, "Config error: {:#}", e),
            RunError::Report(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for RunError {}

/// Parse `args`, merge the config file and generate the report.
///
/// `make_source` receives the configured `gh` binary and is only called once
/// arguments and config have been validated.
pub fn run<I, T, S, F>(args: I, make_source: F) -> Result<String, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    S: PullRequestSource,
    F: FnOnce(&str) -> S,
{
    let cli = Cli::try_parse_from(args).map_err(RunError::Usage)?;
    crate::logging::init(cli.verbose);

    let config = load_config(cli.config.clone()).map_err(RunError::Config)?;
    let settings = cli.resolve(config).map_err(RunError::Config)?;

    tracing::debug!(
        "Reporting on {} repositories, {} users, template {}/{}",
        settings.request.repos.len(),
        settings.request.users.len(),
        settings.template_dir.display(),
        settings.request.template
    );

    let generator = ReportGenerator::new(
        make_source(&settings.gh),
        JinjaRenderer::from_dir(&settings.template_dir),
    );
    generator.generate(&settings.request).map_err(RunError::Report)
}

/// Split a template path into the directory to load from and the file name
fn split_template_path(path: &Path) -> Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .with_context(|| format!("Template path {} has no file name", path.display()))?
        .to_string_lossy()
        .into_owned();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}
