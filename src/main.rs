use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use verdict::config::Config;
use verdict::{ConsoleReporter, TestRunner, logging, run_all_tests, suites};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(args.next().context("--config expects a path")?.into());
                }
                "--json" => {
                    parsed.json = Some(args.next().context("--json expects a path")?.into());
                }
                other => bail!("unrecognized argument `{}`", other),
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse()?;
    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match args.config {
        Some(ref path) => Config::load_file(path),
        None => Config::load(&workspace),
    };
    logging::init(&config.log.level);

    let mut runner = TestRunner::new();
    let registrations = suites::builtin::<ConsoleReporter<io::Stdout>>();
    let outcome = run_all_tests(&mut runner, &config.run.title, &registrations);

    if let Some(path) = args.json.or(config.report.json) {
        let json =
            serde_json::to_string_pretty(&outcome).context("failed to serialize run outcome")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(if outcome.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
