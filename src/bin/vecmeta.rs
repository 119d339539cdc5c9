use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use vecmeta::{
    cli::{Cli, Command},
    commands, tracing_conf,
};
use vecmeta_config::AppConfig;
use vecmeta_controller::MetadataController;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let _guard = tracing_conf::init_tracing(cli.log_level())?;

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(
        "using index {} on account {}",
        config.cloudflare.index_name, config.cloudflare.account_id
    );
    let controller = MetadataController::from_config(&config);

    match cli.resolved_command() {
        Command::Dump { report: full, all } => {
            let report = if all {
                controller.collect_all().await?
            } else {
                controller.collect().await?
            };
            commands::print_report(&report, cli.format, full, &mut std::io::stdout().lock())?;
        }
        Command::Ids { all } => {
            let ids = if all {
                controller.list_ids().await?
            } else {
                controller.fetch_ids().await?
            };
            commands::print_ids(&ids, cli.format, &mut std::io::stdout().lock())?;
        }
        Command::Indexes => {
            let indexes = controller.metadata_indexes().await?;
            commands::print_indexes(&indexes, cli.format, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
