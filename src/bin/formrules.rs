use anyhow::Result;
use std::process::ExitCode;

use formrules::Config;
use formrules::cli::{render, run};

fn main() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let result = run(&config)?;
    println!("{}", render(&result, config.pretty)?);

    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
