mod adapter;
mod config;

use anyhow::Context;
use clap::Parser;
use goose::config::GooseConfiguration;
use goose::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Cli, Command, RunArgs, SampleArgs, TargetArgs};
use drove_core::domain::RunId;
use drove_core::domain::RequestSpec;
use drove_core::task::{TaskDefinition, TaskRegistry};

const SCENARIO_NAME: &str = "drove";

fn init_logging(level: Option<&str>) {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{level}', falling back to 'info'");
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // tracing-log ブリッジ経由で goose の `log` 出力もここに流れる
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn goose_error(e: GooseError) -> anyhow::Error {
    anyhow::Error::new(e).context("goose")
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let (target, registry) = args.target.registry()?;
    let run_id = RunId::generate();
    info!(
        %run_id,
        host = %target.host(),
        tasks = ?registry.names(),
        users = args.users,
        "starting load test"
    );

    let scenario = adapter::scenario(SCENARIO_NAME, &registry, args.wait_time()?)
        .map_err(goose_error)?;

    // goose に argv をパースさせない（CLI は clap が持つ）
    let mut attack = GooseAttack::initialize_with_config(GooseConfiguration::default())
        .map_err(goose_error)?
        .register_scenario(scenario)
        .set_default(GooseDefault::Host, target.host().as_str())
        .map_err(goose_error)?
        .set_default(GooseDefault::Users, args.users)
        .map_err(goose_error)?;

    if let Some(rate) = &args.hatch_rate {
        attack = attack
            .set_default(GooseDefault::HatchRate, rate.as_str())
            .map_err(goose_error)?;
    }
    if let Some(secs) = args.startup_time {
        attack = attack
            .set_default(GooseDefault::StartupTime, secs)
            .map_err(goose_error)?;
    }
    match args.run_time {
        Some(secs) => {
            attack = attack
                .set_default(GooseDefault::RunTime, secs)
                .map_err(goose_error)?;
        }
        None => warn!(%run_id, "no --run-time given; the test runs until interrupted"),
    }
    if let Some(path) = &args.report_file {
        attack = attack
            .set_default(GooseDefault::ReportFile, path.as_str())
            .map_err(goose_error)?;
    }

    attack.execute().await.map_err(goose_error)?;
    info!(%run_id, "load test finished");
    Ok(())
}

/// registry から `count` 件のリクエストを組み立てる。seed が同じなら結果も同じ
fn sample_requests(
    registry: &TaskRegistry,
    count: usize,
    seed: Option<u64>,
) -> anyhow::Result<Vec<RequestSpec>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut requests = Vec::with_capacity(count);
    for _ in 0..count {
        let task = registry.pick(&mut rng)?;
        requests.push(task.build(&mut rng));
    }
    Ok(requests)
}

fn sample(args: SampleArgs) -> anyhow::Result<()> {
    let (_, registry) = args.target.registry()?;
    for request in sample_requests(&registry, args.count, args.seed)? {
        let line = serde_json::to_string(&request).context("failed to encode request")?;
        println!("{line}");
    }
    Ok(())
}

fn list(args: TargetArgs) -> anyhow::Result<()> {
    let (_, registry) = args.registry()?;
    for task in registry.iter() {
        println!("{}\tweight={}", task.name(), task.weight());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Sample(args) => sample(args),
        Command::List(args) => list(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drove_core::domain::TargetConfig;
    use drove_core::task::{CatalogOptions, default_registry};
    use std::sync::Arc;
    use std::time::Duration;

    fn registry() -> TaskRegistry {
        let target = Arc::new(TargetConfig::new("http://localhost:8000").unwrap());
        default_registry(target, &CatalogOptions::default()).unwrap()
    }

    #[test]
    fn seeded_samples_repeat() {
        let registry = registry();
        let first = sample_requests(&registry, 20, Some(42)).unwrap();
        let second = sample_requests(&registry, 20, Some(42)).unwrap();

        assert_eq!(first.len(), 20);
        assert_eq!(first, second);
    }

    #[test]
    fn sample_fails_without_runnable_tasks() {
        let result = sample_requests(&TaskRegistry::new(), 1, Some(0));
        assert!(result.is_err());
    }

    #[test]
    fn goose_error_keeps_its_source() {
        let wait = Some((Duration::from_millis(500), Duration::from_millis(100)));
        let Err(e) = adapter::scenario(SCENARIO_NAME, &registry(), wait) else {
            panic!("min above max should be rejected");
        };

        let err = goose_error(e);
        assert_eq!(err.to_string(), "goose");
        assert!(err.downcast_ref::<GooseError>().is_some());
    }
}
