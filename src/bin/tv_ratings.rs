use anyhow::Context;
use clap::Parser;
use fantasy_booking::app::report::{format_rankings, write_csv, RatingRow};
use fantasy_booking::domain::ports::ConfigProvider;
use fantasy_booking::utils::logger;
use fantasy_booking::{BookingEngine, BotConfig, LocalStorage, SystemClock};

#[derive(Parser)]
#[command(name = "tv-ratings")]
#[command(about = "Print the TV rating rankings from the saved booking state")]
struct Args {
    /// TOML configuration file; its data_dir overrides --data-dir
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Only rank this guild
    #[arg(short, long)]
    guild: Option<String>,

    /// Also export the rankings as CSV
    #[arg(long)]
    csv: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(None, args.verbose);

    let data_dir = match &args.config {
        Some(path) => BotConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?
            .data_dir()
            .to_string(),
        None => args.data_dir.clone(),
    };

    tracing::info!("📂 Reading booking state from: {}", data_dir);
    let engine = BookingEngine::open(LocalStorage::new(data_dir), SystemClock)
        .await
        .context("Failed to load booking state")?;

    let guilds = match &args.guild {
        Some(guild) => vec![guild.clone()],
        None => engine.guilds().await,
    };

    if guilds.is_empty() {
        println!("No federations yet.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for guild in &guilds {
        let ranked = engine
            .rankings(guild)
            .await
            .with_context(|| format!("Failed to rank guild '{}'", guild))?;

        print!("{}", format_rankings(guild, &ranked));
        rows.extend(ranked.iter().map(|entry| RatingRow::new(guild, entry)));
        println!();
    }

    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file '{}'", path))?;
        write_csv(file, &rows).context("Failed to write CSV export")?;
        tracing::info!("📁 {} rows exported to: {}", rows.len(), path);
    }

    Ok(())
}
