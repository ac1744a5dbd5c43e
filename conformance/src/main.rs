use std::process::ExitCode;

use clap::Parser;
use todo_conformance::{execute, SuiteConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let config = SuiteConfig::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let rendered = execute(&config).and_then(|report| {
        let text = report.render(config.format)?;
        Ok((report.is_success(), text))
    });

    match rendered {
        Ok((success, text)) => {
            println!("{text}");
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(2)
        }
    }
}
