use anyhow::Context;
use clap::Parser;
use fantasy_booking::domain::ports::ConfigProvider;
use fantasy_booking::utils::{logger, validation::Validate};
use fantasy_booking::{
    BookingEngine, BotConfig, CliConfig, ConsoleSession, LocalStorage, SessionSettings, SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            let config = BotConfig::from_file(&path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;

            // 初始化日誌
            logger::init_logger(config.log_format(), config.log_level(), cli.verbose);
            tracing::info!("📁 Configuration loaded from: {}", path);

            run(&config, config.bot_name()).await
        }
        None => {
            logger::init_cli_logger(None, cli.verbose);
            run(&cli, "Fantasy Booking").await
        }
    }
}

async fn run<P>(config: &P, name: &str) -> anyhow::Result<()>
where
    P: ConfigProvider + Validate + std::fmt::Debug,
{
    // 驗證配置
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("🚀 Starting {}", name);
    tracing::debug!("Config: {:?}", config);

    let storage = LocalStorage::new(config.data_dir().to_string());
    let engine = BookingEngine::open(storage, SystemClock)
        .await
        .with_context(|| format!("Failed to load saved state from '{}'", config.data_dir()))?;

    let session = ConsoleSession::new(engine, SessionSettings::from_provider(config));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session
        .run(stdin, tokio::io::stdout())
        .await
        .context("Console session failed")?;

    tracing::info!("✅ Session closed, state saved in {}", config.data_dir());
    Ok(())
}
