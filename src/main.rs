use std::process::ExitCode;

use log::error;
use wastesim::collection::{self, dataset, Config};

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match collection::run(Config::default(), dataset::default_streets()) {
        Ok(mut run) => {
            println!("{}", run.report());
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("collection round failed: {e}");
            ExitCode::FAILURE
        },
    }
}
