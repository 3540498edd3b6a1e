use clap::{Parser, Subcommand, ValueEnum};
use creature_tamer::capture::TamingProgress;
use creature_tamer::logging::init_logging;
use creature_tamer::{
    catalog, AppConfig, BattleEngine, Collection, FileStore, IdentificationClient,
    IdentificationResult, ImageRef, TamingSession,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "creature-tamer")]
#[command(about = "Identify, tame, collect and battle creatures")]
struct Args {
    /// TOML config file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory holding the collection store
    #[arg(long)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Identify a captured image and print the record as JSON
    Identify {
        image: String,
        #[arg(long)]
        endpoint: Option<String>,
        /// Run the taming countdown and add the creature to the collection
        #[arg(long)]
        tame: bool,
    },
    /// Print the reference catalog followed by your captures
    Collection,
    /// Feed one of your captures
    Feed { id: String },
    /// Release one of your captures for good
    Release { id: String },
    /// Start a battle and play the given moves
    Battle {
        #[arg(value_enum)]
        moves: Vec<Move>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Move {
    Attack,
    Defend,
    Potion,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(true, args.log_file.clone());

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(dir) = args.store_dir {
        config.storage.directory = dir;
    }

    match args.command {
        Command::Identify {
            image,
            endpoint,
            tame,
        } => {
            if let Some(endpoint) = endpoint {
                config.vision.endpoint = endpoint;
            }
            identify(&config, ImageRef::new(image), tame).await?
        }
        Command::Collection => {
            let collection = Collection::new(FileStore::new(&config.storage.directory));
            let records = collection.browse(catalog()).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Feed { id } => {
            let collection = Collection::new(FileStore::new(&config.storage.directory));
            match collection.feed(&id).await? {
                Some(hunger) => println!("Fed {}. Hunger is now {}.", id, hunger),
                None => println!("No capture with id {}.", id),
            }
        }
        Command::Release { id } => {
            let collection = Collection::new(FileStore::new(&config.storage.directory));
            if collection.remove(&id).await? {
                println!("Released {}.", id);
            } else {
                println!("No capture with id {}.", id);
            }
        }
        Command::Battle { moves } => battle(&config, &moves).await,
    }
    Ok(())
}

async fn identify(
    config: &AppConfig,
    image: ImageRef,
    tame: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = IdentificationClient::from_settings(&config.vision)?;
    let result = client.identify(&image).await;
    if let IdentificationResult::Fallback { cause, .. } = &result {
        eprintln!("Identification service unavailable: {}", cause);
    }
    let record = result.into_record();
    println!("{}", serde_json::to_string_pretty(&record)?);

    if tame {
        let mut taming = TamingSession::for_record(&record);
        println!(
            "Taming {} [{}] ({} s)...",
            record.name,
            taming.rarity(),
            taming.total()
        );
        taming
            .run(|progress| {
                if let TamingProgress::Counting(left) = progress {
                    println!("  {} s", left);
                }
            })
            .await;

        let collection = Collection::new(FileStore::new(&config.storage.directory));
        let size = collection.append(record).await?;
        println!(
            "Tamed! Your collection in {} now holds {} creatures.",
            collection.store().directory().display(),
            size
        );
    }
    Ok(())
}

async fn battle(config: &AppConfig, moves: &[Move]) {
    let mut engine = BattleEngine::with_thread_rng(config.battle.clone());
    engine.start_battle();

    for chosen in moves {
        if engine.session().outcome().is_some() {
            break;
        }
        let outcome = match chosen {
            Move::Attack => engine.attack(),
            Move::Defend => engine.defend(),
            Move::Potion => engine.use_potion(),
        };
        info!(?chosen, ?outcome, "move played");
        engine.play_out().await;
        for snapshot in engine.drain_snapshots() {
            println!("{}", snapshot);
        }
    }

    for snapshot in engine.drain_snapshots() {
        println!("{}", snapshot);
    }
}
