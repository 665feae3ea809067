// Asteroid Mining - command line entry point
use asteroid_mining::config::DEFAULT_CONFIG_PATH;
use asteroid_mining::error::AppError;
use asteroid_mining::market::PriceTable;
use asteroid_mining::{verbosity, Asteroid, AsteroidMiningConfig, Prospector, ResourceType};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "asteroid-mining", version, about = "Discover and value mineable asteroids")]
struct Cli {
    /// Path to the TOML configuration (created with defaults if missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Increase log output (-v basic, -vv full)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run deep-space scans for new asteroids
    Discover {
        #[arg(long, default_value_t = 1)]
        scans: usize,
    },
    /// List every known asteroid
    List,
    /// Show one asteroid by id
    Show { id: u64 },
    /// Find an asteroid by its exact name
    Find { name: String },
    /// Asteroids within a distance in light years
    InRange { max_distance: f64 },
    /// Asteroids carrying a resource kind
    WithResource { resource: ResourceType },
    /// Asteroids worth at least the given credits, most valuable first
    Profitable { min_value: i64 },
    /// Current market prices
    Prices,
    /// Total market value of one asteroid
    Value { id: u64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    verbosity::init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = e.report();
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("❌ {}", report.message),
                }
            } else {
                eprintln!("❌ {}", report.message);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = AsteroidMiningConfig::load_or_create(&cli.config)?;
    config.print_summary();
    let prospector = Prospector::from_config(&config)?;
    let catalog = &prospector.catalog;

    match &cli.command {
        Command::Discover { scans } => {
            let report = prospector.discovery.scan(*scans).await;
            if cli.json {
                emit_json(&report.discovered)?;
            } else {
                for asteroid in &report.discovered {
                    println!("☄️  Discovered: {}", describe(asteroid));
                }
                println!(
                    "🔭 {} scan(s): {} discovered, {} empty",
                    report.attempts,
                    report.discovered.len(),
                    report.empty_scans()
                );
            }
            if let Some(failure) = report.failure {
                return Err(failure.into());
            }
        }
        Command::List => print_asteroids(cli, &catalog.all())?,
        Command::Show { id } => print_asteroids(cli, &[catalog.by_id(*id)?])?,
        Command::Find { name } => print_asteroids(cli, &[catalog.by_name(name)?])?,
        Command::InRange { max_distance } => print_asteroids(cli, &catalog.in_range(*max_distance))?,
        Command::WithResource { resource } => print_asteroids(cli, &catalog.with_resource(*resource))?,
        Command::Profitable { min_value } => {
            let ranked = catalog.valuation().rank_by_value(catalog.profitable(*min_value));
            if cli.json {
                let rows: Vec<ValuedAsteroid> = ranked
                    .iter()
                    .map(|(asteroid, value)| ValuedAsteroid { asteroid, total_value: *value })
                    .collect();
                emit_json(&rows)?;
            } else if ranked.is_empty() {
                println!("📭 No asteroid is worth {} credits or more", min_value);
            } else {
                for (asteroid, value) in &ranked {
                    println!("💰 {:>12} credits  {}", value, describe(asteroid));
                }
            }
        }
        Command::Prices => print_prices(cli, &catalog.market_prices())?,
        Command::Value { id } => {
            let (asteroid, value) = catalog.value_of(*id)?;
            if cli.json {
                emit_json(&ValuedAsteroid { asteroid: &asteroid, total_value: value })?;
            } else {
                println!("💰 {} credits  {}", value, describe(&asteroid));
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValuedAsteroid<'a> {
    #[serde(flatten)]
    asteroid: &'a Asteroid,
    total_value: i64,
}

fn describe(asteroid: &Asteroid) -> String {
    let resources = if asteroid.resources().is_empty() {
        "no resources".to_string()
    } else {
        asteroid
            .resources()
            .iter()
            .map(|(kind, quantity)| format!("{} {}", kind, quantity))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "#{} {} [{}] {:.2} ly - {}",
        asteroid.id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        asteroid.name(),
        asteroid.risk_profile(),
        asteroid.distance_in_light_years(),
        resources
    )
}

fn print_asteroids(cli: &Cli, asteroids: &[Asteroid]) -> Result<(), AppError> {
    if cli.json {
        return emit_json(asteroids);
    }
    if asteroids.is_empty() {
        println!("📭 No asteroids match");
    }
    for asteroid in asteroids {
        println!("🪨 {}", describe(asteroid));
    }
    Ok(())
}

fn print_prices(cli: &Cli, prices: &PriceTable) -> Result<(), AppError> {
    if cli.json {
        return emit_json(prices);
    }
    println!("📈 Market prices:");
    for (resource, price) in prices {
        println!("   • {:<10} {:>6} credits/unit", resource, price);
    }
    Ok(())
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
