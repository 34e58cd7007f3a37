//! CLI options (clap). Every run option can also come from a `DROVE_*` env var.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use drove_core::domain::TargetConfig;
use drove_core::task::{CandidateCountMode, CatalogOptions, TaskRegistry, default_registry};

#[derive(Debug, Parser)]
#[command(name = "drove", author, version, about = "GraphQL / asset load tests driven by goose")]
pub struct Cli {
    /// Log filter (e.g. `info`, `drove=debug,goose=info`). Falls back to RUST_LOG.
    #[arg(long, value_name = "LEVEL", global = true, env = "DROVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a load test against the target host
    Run(RunArgs),
    /// Print sample requests as JSON lines without sending them
    Sample(SampleArgs),
    /// List the registered tasks
    List(TargetArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CandidateCountArg {
    Noop,
    Count,
}

impl From<CandidateCountArg> for CandidateCountMode {
    fn from(arg: CandidateCountArg) -> Self {
        match arg {
            CandidateCountArg::Noop => CandidateCountMode::NoOp,
            CandidateCountArg::Count => CandidateCountMode::Count,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Base URL of the application under test
    #[arg(long, env = "DROVE_HOST", default_value = "http://localhost:8000")]
    pub host: String,

    /// Sent as `authorization: Bearer <token>` on GraphQL requests
    #[arg(long, env = "DROVE_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// What the `candidate_count` task sends
    #[arg(
        long,
        value_enum,
        env = "DROVE_CANDIDATE_COUNT",
        default_value_t = CandidateCountArg::Noop
    )]
    pub candidate_count: CandidateCountArg,

    /// Only run these tasks (comma separated)
    #[arg(long, value_delimiter = ',', env = "DROVE_TASKS")]
    pub tasks: Vec<String>,
}

impl TargetArgs {
    pub fn target(&self) -> anyhow::Result<TargetConfig> {
        let target = TargetConfig::new(&self.host)
            .with_context(|| format!("invalid --host '{}'", self.host))?;
        Ok(match &self.bearer_token {
            Some(token) => target.with_bearer_token(token.clone()),
            None => target,
        })
    }

    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            candidate_count: self.candidate_count.into(),
        }
    }

    /// TargetConfig と task set を作り、`--tasks` で絞り込む
    pub fn registry(&self) -> anyhow::Result<(Arc<TargetConfig>, TaskRegistry)> {
        let target = Arc::new(self.target()?);
        let registry = default_registry(Arc::clone(&target), &self.catalog_options())
            .context("failed to build the task catalog")?;
        let registry = if self.tasks.is_empty() {
            registry
        } else {
            registry.select(self.tasks.as_slice()).context("invalid --tasks")?
        };
        anyhow::ensure!(!registry.is_empty(), "no tasks selected");
        Ok((target, registry))
    }
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of concurrent virtual users
    #[arg(short = 'u', long, env = "DROVE_USERS", default_value_t = 1)]
    pub users: usize,

    /// Users started per second (e.g. `10` or `0.5`)
    #[arg(short = 'r', long, env = "DROVE_HATCH_RATE", conflicts_with = "startup_time")]
    pub hatch_rate: Option<String>,

    /// Start all users evenly over this many seconds
    #[arg(short = 's', long, env = "DROVE_STARTUP_TIME")]
    pub startup_time: Option<usize>,

    /// Stop after this many seconds
    #[arg(short = 't', long, env = "DROVE_RUN_TIME")]
    pub run_time: Option<usize>,

    /// Minimum think time between tasks, in milliseconds
    #[arg(long, env = "DROVE_WAIT_MIN_MS", default_value_t = 0)]
    pub wait_min_ms: u64,

    /// Maximum think time between tasks, in milliseconds (0 disables waiting)
    #[arg(long, env = "DROVE_WAIT_MAX_MS", default_value_t = 0)]
    pub wait_max_ms: u64,

    /// Write goose's HTML report here
    #[arg(long, env = "DROVE_REPORT_FILE")]
    pub report_file: Option<String>,
}

impl RunArgs {
    /// `(min, max)` think time, or `None` when waiting is disabled
    pub fn wait_time(&self) -> anyhow::Result<Option<(Duration, Duration)>> {
        if self.wait_max_ms == 0 {
            return Ok(None);
        }
        anyhow::ensure!(
            self.wait_min_ms <= self.wait_max_ms,
            "--wait-min-ms ({}) must not exceed --wait-max-ms ({})",
            self.wait_min_ms,
            self.wait_max_ms
        );
        Ok(Some((
            Duration::from_millis(self.wait_min_ms),
            Duration::from_millis(self.wait_max_ms),
        )))
    }
}

#[derive(Debug, Clone, Args)]
pub struct SampleArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of requests to print
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn run_defaults() {
        let cli = parse(&["drove", "run"]);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.users, 1);
        assert_eq!(run.target.candidate_count, CandidateCountArg::Noop);
        assert!(run.target.tasks.is_empty());
        assert!(run.wait_time().unwrap().is_none());
    }

    #[test]
    fn run_with_options() {
        let cli = parse(&[
            "drove",
            "run",
            "--host",
            "https://talent.example",
            "-u",
            "25",
            "-r",
            "5",
            "-t",
            "60",
            "--tasks",
            "getSkills,get_asset",
            "--candidate-count",
            "count",
        ]);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.users, 25);
        assert_eq!(run.hatch_rate.as_deref(), Some("5"));
        assert_eq!(run.run_time, Some(60));
        assert_eq!(run.target.tasks, vec!["getSkills", "get_asset"]);
        assert_eq!(
            CandidateCountMode::from(run.target.candidate_count),
            CandidateCountMode::Count
        );
    }

    #[test]
    fn hatch_rate_conflicts_with_startup_time() {
        let result = Cli::try_parse_from(["drove", "run", "-r", "2", "-s", "10"]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::disabled(0, 0, None)]
    #[case::fixed(100, 100, Some((100, 100)))]
    #[case::range(50, 500, Some((50, 500)))]
    fn wait_time(#[case] min: u64, #[case] max: u64, #[case] expected: Option<(u64, u64)>) {
        let cli = parse(&[
            "drove",
            "run",
            "--wait-min-ms",
            &min.to_string(),
            "--wait-max-ms",
            &max.to_string(),
        ]);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        let expected = expected.map(|(a, b)| (Duration::from_millis(a), Duration::from_millis(b)));
        assert_eq!(run.wait_time().unwrap(), expected);
    }

    #[test]
    fn wait_min_above_max_is_an_error() {
        let cli = parse(&["drove", "run", "--wait-min-ms", "10", "--wait-max-ms", "5"]);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert!(run.wait_time().is_err());
    }

    #[test]
    fn registry_filters_tasks() {
        let cli = parse(&["drove", "list", "--tasks", "getSkills"]);
        let Command::List(target) = cli.command else {
            panic!("expected list");
        };
        let (_, registry) = target.registry().unwrap();
        assert_eq!(registry.names(), vec!["getSkills"]);
    }

    #[test]
    fn registry_rejects_unknown_task() {
        let cli = parse(&["drove", "list", "--tasks", "nope"]);
        let Command::List(target) = cli.command else {
            panic!("expected list");
        };
        assert!(target.registry().is_err());
    }

    #[test]
    fn invalid_host_is_reported() {
        let cli = parse(&["drove", "sample", "--host", "not a url"]);
        let Command::Sample(sample) = cli.command else {
            panic!("expected sample");
        };
        let err = sample.target.registry().err().expect("expected error");
        assert!(err.to_string().contains("invalid --host"));
    }

    #[test]
    fn bearer_token_reaches_target() {
        let cli = parse(&["drove", "list", "--bearer-token", "abc"]);
        let Command::List(target) = cli.command else {
            panic!("expected list");
        };
        let target = target.target().unwrap();
        assert_eq!(target.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn report_file_comes_from_env() {
        // 他のテストは report_file を見ないので、並列実行でも干渉しない
        unsafe { std::env::set_var("DROVE_REPORT_FILE", "report.html") };
        let cli = parse(&["drove", "run"]);
        unsafe { std::env::remove_var("DROVE_REPORT_FILE") };

        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.report_file.as_deref(), Some("report.html"));
    }
}
