use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pawprint::report::{Line, render_card};
use pawprint::{Config, Species, Usage, age_info, display_string, format_message};

#[derive(Parser, Debug)]
#[command(name = "pawprint")]
#[command(about = "Pet age, milestones and free-tier quotas")]
#[command(version)]
struct Args {
    /// JSON file overriding the default policy thresholds
    #[arg(long, global = true, env = "PAWPRINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Real and human-equivalent age
    Age {
        /// Birth date, RFC 3339 or YYYY-MM-DD
        #[arg(long, value_parser = parse_instant)]
        birth: DateTime<Utc>,
        /// Dog, Cat, Reptile, Bird, Rabbit or Hamster; anything else uses the Dog curve
        #[arg(long, default_value = "Dog")]
        species: String,
        #[arg(long, value_parser = parse_instant)]
        deceased: Option<DateTime<Utc>>,
        /// Render as a memorial profile
        #[arg(long)]
        memorial: bool,
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Today's birthday or anniversary, if any
    Milestone {
        #[arg(long, value_parser = parse_instant)]
        birth: DateTime<Utc>,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Remaining free-tier capacity
    Quota {
        #[arg(long, default_value_t = 0)]
        albums: u32,
        #[arg(long, default_value_t = 0)]
        images: u32,
        #[arg(long, default_value_t = 0)]
        storage_bytes: u64,
    },
    /// Print the effective configuration
    Config,
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("`{raw}` is neither RFC 3339 nor YYYY-MM-DD"))?;
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => Ok(midnight.and_utc()),
        None => bail!("`{raw}` has no midnight"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match args.command {
        Command::Age {
            birth,
            species,
            deceased,
            memorial,
            now,
        } => {
            let species: Species = species.parse()?;
            let now = now.unwrap_or_else(Utc::now);
            let Some(info) = age_info(Some(birth), species, now, deceased) else {
                bail!("birth date {birth} is after {now}");
            };

            let card = render_card(&[
                Line::Header("Age".into()),
                Line::row("Species", species.to_string()),
                Line::row("Born", birth.date_naive().to_string()),
                Line::row("Age", display_string(&info, memorial)),
                Line::row("Days", info.age_in_days.to_string()),
            ]);
            print!("{card}");
        }
        Command::Milestone { birth, name, now } => {
            let now = now.unwrap_or_else(Utc::now);
            match config.milestone.detect(&birth, &now) {
                Some(m) => println!("{}", format_message(&m, &name)),
                None => println!("No milestone for {name} today."),
            }
        }
        Command::Quota {
            albums,
            images,
            storage_bytes,
        } => {
            let usage = Usage {
                album_count: albums,
                image_count: images,
                image_storage_used_bytes: storage_bytes,
            };
            let quota = usage.quota(&config.limits);

            let card = render_card(&[
                Line::Header("Free plan".into()),
                Line::row("Albums left", quota.remaining_albums.to_string()),
                Line::row("Images left", quota.remaining_images.to_string()),
                Line::row("Storage left", format!("{} bytes", quota.remaining_storage_bytes)),
                Line::Blank,
                Line::row("Album limit reached", quota.album_limit_reached.to_string()),
                Line::row("Image limit reached", quota.image_limit_reached.to_string()),
            ]);
            print!("{card}");
        }
        Command::Config => {
            let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{json}");
        }
    }

    Ok(())
}
