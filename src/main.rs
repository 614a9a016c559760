use std::{env, process};

use anyhow::{Context, bail};
use linear_mle::{config::RunConfig, report};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config_path = None;
    let mut histogram = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--histogram" => histogram = true,
            "-h" | "--help" => {
                println!("Usage: linear-mle [config.json] [--histogram]");
                process::exit(0);
            }
            path if config_path.is_none() => config_path = Some(path.to_string()),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let config = match &config_path {
        Some(path) => {
            info!("reading configuration from {path}");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };

    let report = report::run(&config).context("estimation run failed")?;

    print!("{report}");
    if histogram {
        print!("{}", report.histogram_table());
    }

    Ok(())
}
