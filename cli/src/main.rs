use clap::Parser;
use themectl::App;
use themectl::commands::Cli;
use themectl::config::{self, ConfigLoadResult};
use themectl::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match config::init_config(cli.config.as_deref()) {
        ConfigLoadResult::Success(app_config) => app_config,
        failed => anyhow::bail!("{}", failed.error_message().unwrap_or_default()),
    };

    logger::setup_logger(app_config.logging())?;

    let app = App::new(app_config)?;
    let output = app.run(&cli.command).await?;
    println!("{output}");

    Ok(())
}
