use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error};
use tokio::io::AsyncReadExt;

use fff_danse::config::load_settings;
use fff_danse::fields::group_label;
use fff_danse::{
    extract_video_id, parse_description, preview_video, read_video_list, BatchInput, BatchRequest,
    FieldSchema, ImportError, Importer, InfoJsonSource, MemoryStore, Settings,
};

/// Parse FFF Danse YouTube descriptions into dance fields
#[derive(Parser, Debug)]
#[command(name = "fff-danse", version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of fff-danse.toml
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a description and print the fields as JSON
    Parse {
        /// Description file (reads stdin when omitted)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Video title, used for danse_navn when the description has none
        #[arg(long, default_value = "")]
        title: String,
        /// Video ID, used for video_videofil when the description has none
        #[arg(long, default_value = "")]
        video_id: String,
    },
    /// Print the video ID contained in an ID or YouTube URL
    VideoId {
        input: String,
    },
    /// List the known fields, grouped
    Fields {
        /// Only show this group
        #[arg(long)]
        group: Option<String>,
    },
    /// Read a video's metadata from an info.json directory and print the parsed fields
    Preview {
        /// Video ID or URL
        video: String,
        /// Directory of <id>.info.json files (defaults to source.info_dir)
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        info_dir: Option<PathBuf>,
    },
    /// Run a batch import from a video list into an in-memory store and print the summary
    ImportAll {
        /// File with one video ID or URL per line
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        /// Create posts for videos that have none (defaults to import.create_posts)
        #[arg(long)]
        create: bool,
        /// Maximum number of videos (defaults to import.limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Directory of <id>.info.json files (defaults to source.info_dir)
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        info_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli.command, cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: Option<&str>) -> Result<(), ImportError> {
    match command {
        Command::Parse {
            file,
            title,
            video_id,
        } => {
            let description = match file {
                Some(path) => tokio::fs::read_to_string(&path).await?,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };
            let fields = parse_description(&description, &title, &video_id);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::VideoId { input } => match extract_video_id(&input) {
            Some(id) => println!("{}", id),
            None => return Err(ImportError::InvalidVideo(input)),
        },
        Command::Fields { group } => {
            let schema = FieldSchema::builtin();
            let groups = match group.as_deref() {
                Some(name) => vec![(name, schema.require_group(name)?)],
                None => schema.grouped(),
            };
            for (key, members) in groups {
                println!("{} ({})", group_label(key).unwrap_or(key), key);
                for field in members {
                    println!("  {:<30} {}", field.key, field.label);
                }
            }
        }
        Command::Preview { video, info_dir } => {
            let dir = match info_dir {
                Some(dir) => dir,
                None => load_settings(config)?.source.require_info_dir()?.clone(),
            };
            debug!("Using metadata directory {}", dir.display());

            let source = InfoJsonSource::new(dir);
            let (video, fields) = preview_video(&source, &video).await?;
            println!("# {} ({})", video.title, video.id);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::ImportAll {
            file,
            create,
            limit,
            info_dir,
        } => {
            let settings: Settings = load_settings(config)?;
            let dir = match info_dir {
                Some(dir) => dir,
                None => settings.source.require_info_dir()?.clone(),
            };

            let lines = read_video_list(&file).await?;
            let mut request = BatchRequest::from_settings(BatchInput::List(lines), &settings.import);
            request.create_posts |= create;
            if let Some(limit) = limit {
                request.limit = limit;
            }

            let source = InfoJsonSource::new(dir);
            let store = MemoryStore::new();
            let importer = Importer::new(&source, &store, FieldSchema::builtin())
                .with_settings(&settings.import);
            let summary = importer.import_all(&request).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
