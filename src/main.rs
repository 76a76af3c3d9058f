//! LifeDash - a personal dashboard for the terminal and the browser.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, Offset, Utc};
use clap::{Parser, Subcommand};
use lifedash_cache::{
    FallbackLoader, Favorites, KvStore, MemoryStore, ReadingCache, SqliteStore, SystemClock,
};
use lifedash_core::{AppError, Config};
use lifedash_currency::{currency, default_target, parse_amount, Conversion, CurrencySource, HttpRateProvider};
use lifedash_location::{country_name, LocationFix, LocationResolver};
use lifedash_speed::{format_speed, isp_name, SpeedGrade};
use lifedash_ui::render::{html, text};
use lifedash_ui::{Dashboard, DashboardView, PanelServices};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// LifeDash - weather, air quality, markets and more for where you are.
#[derive(Parser, Debug)]
#[command(name = "lifedash", version, about, long_about = None)]
struct Cli {
    /// Use the first place matching QUERY instead of the detected location
    #[arg(long, global = true, value_name = "QUERY")]
    place: Option<String>,

    /// Include the public-holiday countdown panel
    #[arg(long, global = true)]
    holidays: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the dashboard (default).
    Show,
    /// Write the dashboard as a single HTML page.
    Html {
        #[arg(long, short, value_name = "FILE")]
        out: PathBuf,
    },
    /// Convert an amount between currencies.
    Convert {
        amount: String,
        from: String,
        /// Defaults to the local currency
        to: Option<String>,
    },
    /// Run the simulated connection speed test.
    Speedtest,
    /// Manage favorite coins.
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// List places matching a query.
    Search { query: String },
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    Add { id: String },
    Remove { id: String },
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    lifedash_core::init()?;

    let (config, _) = Config::load_validated().map_err(|e| fail(e.into()))?;
    let store = open_store(&config);

    match cli.command {
        None | Some(Commands::Show) => {
            let dash = load_dashboard(&cli, &config, store).await?;
            print!("{}", text::render(&snapshot(&dash)));
        }
        Some(Commands::Html { ref out }) => {
            let dash = load_dashboard(&cli, &config, store).await?;
            let page = html::render(&snapshot(&dash));
            std::fs::write(out, page)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Some(Commands::Convert {
            ref amount,
            ref from,
            ref to,
        }) => convert(&cli, &config, store, amount, from, to.as_deref()).await?,
        Some(Commands::Speedtest) => speedtest(&cli, &config, store).await?,
        Some(Commands::Favorite { ref action }) => favorite(store, action)?,
        Some(Commands::Search { ref query }) => search(&config, query).await?,
    }

    Ok(())
}

/// Lead with the user-facing message; the detail stays in the cause chain.
fn fail(err: AppError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// The on-disk cache, or an in-memory one when the file cannot be opened.
fn open_store(config: &Config) -> Arc<dyn KvStore> {
    let path = config.store_path();
    match SqliteStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            let err = AppError::from(e);
            tracing::warn!("{} ({}): {}", err.user_message(), path.display(), err);
            Arc::new(MemoryStore::new())
        }
    }
}

fn cache(store: &Arc<dyn KvStore>) -> ReadingCache {
    ReadingCache::new(Arc::clone(store), Arc::new(SystemClock))
}

/// Detected location, or the first match for `--place`.
async fn locate(cli: &Cli, config: &Config) -> Result<LocationFix> {
    let resolver = LocationResolver::from_config(config).context("Failed to build HTTP client")?;
    let fix = resolver.resolve().await;

    let Some(query) = &cli.place else {
        return Ok(fix);
    };
    let candidates = resolver
        .search(query)
        .await
        .with_context(|| format!("Place search for '{}' failed", query))?;
    let first = candidates
        .first()
        .with_context(|| format!("No places found for '{}'", query))?;
    tracing::info!("Using {} for --place", first.display_name);
    Ok(fix.relocate(first))
}

async fn load_dashboard(cli: &Cli, config: &Config, store: Arc<dyn KvStore>) -> Result<Dashboard> {
    let fix = locate(cli, config).await?;
    let services =
        PanelServices::from_config(config, cache(&store)).context("Failed to build HTTP client")?;

    let mut dash = Dashboard::new(
        Arc::new(services),
        Favorites::load(store),
        &config.currency.default_from,
    )
    .with_holidays(cli.holidays || config.panels.holidays);
    dash.set_location(fix);

    let started = dash.load_all();
    tracing::debug!("Waiting on {} panels", started);
    dash.settle().await;
    Ok(dash)
}

fn snapshot(dash: &Dashboard) -> DashboardView {
    let offset = Local::now().offset().fix();
    DashboardView::build(dash, Utc::now(), offset)
}

fn known_currency(code: &str) -> Result<String> {
    currency(code)
        .map(|c| c.code.to_string())
        .with_context(|| format!("Unknown currency code '{}'", code))
}

async fn convert(
    cli: &Cli,
    config: &Config,
    store: Arc<dyn KvStore>,
    amount: &str,
    from: &str,
    to: Option<&str>,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let from = known_currency(from)?;
    let to = match to {
        Some(code) => known_currency(code)?,
        None => default_target(&locate(cli, config).await?.country).to_string(),
    };

    let client = lifedash_core::http::build_client(config.http.timeout())
        .context("Failed to build HTTP client")?;
    let source = CurrencySource::new(HttpRateProvider::defaults(client, &config.endpoints));
    let loaded = FallbackLoader::new(cache(&store))
        .load(&source)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let conversion = Conversion::new(amount, from, to);
    println!("{}", conversion.summary(&loaded.payload));
    println!("{}", conversion.unit_summary(&loaded.payload));
    if let Some(notice) = loaded.notice(lifedash_cache::Domain::Currency) {
        eprintln!("{}", notice);
    }
    Ok(())
}

async fn speedtest(cli: &Cli, config: &Config, store: Arc<dyn KvStore>) -> Result<()> {
    let fix = locate(cli, config).await?;
    let services =
        PanelServices::from_config(config, cache(&store)).context("Failed to build HTTP client")?;
    let mut dash = Dashboard::new(
        Arc::new(services),
        Favorites::load(store),
        &config.currency.default_from,
    );
    let org = fix.org.clone();
    dash.set_location(fix);

    let mut rng = StdRng::from_entropy();
    let result = dash
        .run_speed_test(&mut rng, |p| {
            eprint!("\r{:<28} {:>3}%", p.stage(), p.percent);
        })
        .await;
    eprintln!();

    for (label, mbps) in [("Download", result.download), ("Upload", result.upload)] {
        println!(
            "{:<9} {:>7} Mbps  {}",
            label,
            format_speed(mbps),
            SpeedGrade::for_speed(mbps).label()
        );
    }
    println!("Ping      {:>7} ms", result.ping);
    println!("Jitter    {:>7} ms", result.jitter);
    println!("Provider  {}", isp_name(Some(&org)));
    Ok(())
}

fn favorite(store: Arc<dyn KvStore>, action: &FavoriteAction) -> Result<()> {
    let mut favorites = Favorites::load(store);
    match action {
        FavoriteAction::Add { id } => {
            favorites.add(id).map_err(|e| fail(e.into()))?;
            println!("Added {}", id);
        }
        FavoriteAction::Remove { id } => {
            favorites.remove(id).map_err(|e| fail(e.into()))?;
            println!("Removed {}", id);
        }
        FavoriteAction::List => {
            if favorites.ids().is_empty() {
                println!("{}", lifedash_crypto::NO_FAVORITES);
            }
            for id in favorites.ids() {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

async fn search(config: &Config, query: &str) -> Result<()> {
    let resolver = LocationResolver::from_config(config).context("Failed to build HTTP client")?;
    let candidates = resolver
        .search(query)
        .await
        .with_context(|| format!("Place search for '{}' failed", query))?;

    if candidates.is_empty() {
        println!("No cities found. Try a different search.");
    }
    for c in &candidates {
        println!(
            "{}, {}, {}  ({}, {})",
            c.city,
            c.region,
            country_name(&c.country),
            c.loc,
            c.timezone
        );
    }
    Ok(())
}
