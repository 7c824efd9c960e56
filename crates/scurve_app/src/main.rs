mod config;
mod render;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Datelike;
use scurve_engine::SearchOrchestrator;
use scurve_logging::{scurve_debug, scurve_info, scurve_warn};

const USAGE: &str = "Usage: scurve_app [--config <path>] [--json] [query ...]
Without queries, one query is read per line from stdin.";

#[derive(Debug, PartialEq)]
struct Args {
    config_path: PathBuf,
    json: bool,
    queries: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    let mut parsed = Args {
        config_path: PathBuf::from(config::CONFIG_FILENAME),
        json: false,
        queries: Vec::new(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => parsed.config_path = PathBuf::from(path),
                None => bail!("--config needs a path\n{USAGE}"),
            },
            "--json" => parsed.json = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => parsed.queries.push(arg),
        }
    }
    Ok(Command::Run(parsed))
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        Command::Run(args) => args,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let (config, config_error) = match config::read(&args.config_path) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (config::AppConfig::default(), None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    scurve_logging::initialize(config.log, config.level(), None);
    if let Some(err) = config_error {
        scurve_warn!("Using default configuration: {}", err);
    }
    scurve_info!("Backend at {}", config.base_url);

    let orchestrator = SearchOrchestrator::from_config(&config.engine_config())
        .context("failed to set up the search engine")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
    let dashboard = Dashboard {
        orchestrator,
        runtime,
        json: args.json,
        current_year: chrono::Local::now().year(),
    };

    if args.queries.is_empty() {
        for line in io::stdin().lock().lines() {
            dashboard.search(&line.context("failed to read query from stdin")?)?;
        }
    } else {
        for query in &args.queries {
            dashboard.search(query)?;
        }
    }
    dashboard.orchestrator.clear();
    Ok(())
}

struct Dashboard {
    orchestrator: SearchOrchestrator,
    runtime: tokio::runtime::Runtime,
    json: bool,
    current_year: i32,
}

impl Dashboard {
    fn search(&self, query: &str) -> anyhow::Result<()> {
        if let Err(failure) = self.runtime.block_on(self.orchestrator.run(query)) {
            scurve_debug!("Search {:?} ended without results: {}", query, failure);
        }

        let view = self.orchestrator.view();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            for line in render::render(&view, self.current_year) {
                println!("{line}");
            }
        }
        Ok(())
    }
}
