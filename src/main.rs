use std::{error::Error as _, fs::File, io::BufReader, path::PathBuf};

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use oeisle::{Catalog, CatalogError, Config, ConfigError, Game};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "oeisle")]
#[command(about = "Pick the daily sequence, a random one, or check a guess")]
struct Cli {
    #[arg(long, help = "JSON catalog: an array of [id, label, terms...] rows")]
    catalog: PathBuf,
    #[arg(long, help = "JSON config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Date of edition 0, overriding the config")]
    epoch: Option<NaiveDate>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// The target for today's UTC date, or for `--date`
    Today {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// A uniformly random target
    Random {
        #[arg(long, help = "Seed for a reproducible pick")]
        seed: Option<u64>,
    },
    /// Every entry whose sequence starts with the given terms
    Query {
        #[arg(allow_negative_numbers = true)]
        terms: Vec<i64>,
    },
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("could not open catalog \"{}\"", .0.display())]
    Open(PathBuf, #[source] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] oeisle::Error),
    #[error("could not write output")]
    Output(#[from] serde_json::Error),
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("OEISLE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(epoch) = cli.epoch {
        config.epoch = epoch;
    }

    let file = File::open(&cli.catalog).map_err(|err| Error::Open(cli.catalog.clone(), err))?;
    let catalog = Catalog::from_reader(BufReader::new(file))?;
    let game = Game::with_config(catalog, &config)?;

    let output = match cli.command {
        Command::Today { date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            serde_json::to_string_pretty(&game.on(date))?
        }
        Command::Random { seed } => {
            let target = match seed {
                Some(seed) => game.random(&mut StdRng::seed_from_u64(seed))?,
                None => game.random(&mut rand::rng())?,
            };
            serde_json::to_string_pretty(&target)?
        }
        Command::Query { terms } => serde_json::to_string_pretty(&game.query(&terms))?,
    };
    println!("{output}");
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {cause}"));
            source = cause.source();
        }
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}
