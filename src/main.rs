//! `photo-catalog` CLI
//!
//! Usage:
//!   `photo-catalog list --page 0 --size 20`
//!   `photo-catalog search "name:IMG*;tags:TAG_FOOD"`
//!   `photo-catalog create '{"name":"IMG_1","path":"/a","host":"h","url":"u"}'`

use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use photo_catalog::AppError;
use photo_catalog::config::get_settings;
use photo_catalog::dtos::photo_dto::PhotoRequest;
use photo_catalog::services::{database_service, logger_service, photo_service, tag_service};
use photo_catalog::spec::specifications_builder::SpecificationsBuilder;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "photo-catalog")]
#[command(author, version, about = "Photo catalog with tag and detail search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List photos, newest first
    List {
        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: i64,

        /// Page size (defaults to `default_page_size` from config.json)
        #[arg(short, long)]
        size: Option<i64>,
    },

    /// Search photos with an expression such as `name:IMG*;'host:cdn`
    Search {
        /// `;`-separated filters, each `key<op>value` with op one of `: ! > < ~`
        expression: String,

        #[arg(short, long, default_value_t = 0)]
        page: i64,

        #[arg(short, long)]
        size: Option<i64>,
    },

    /// Show one photo
    Get {
        id: i64,
    },

    /// Create a photo from a JSON request
    Create {
        /// `{"name", "path", "host", "url", "tags"?, "detail"?}`
        json: String,
    },

    /// List the stored tags
    Tags,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    let (database_url, default_size) = {
        let settings = get_settings();
        (
            settings.config.database_url.clone(),
            settings.config.default_page_size as i64,
        )
    };

    let db = database_service::prepare_database(&database_url).await?;

    match command {
        Commands::List { page, size } => {
            let size = size.unwrap_or(default_size);
            print_json(&photo_service::get_all_photos(db, page, size).await?)
        }
        Commands::Search {
            expression,
            page,
            size,
        } => {
            let size = size.unwrap_or(default_size);
            let condition = SpecificationsBuilder::parse(&expression).build()?;
            print_json(&photo_service::search_photos(db, condition, page, size).await?)
        }
        Commands::Get { id } => print_json(&photo_service::get_photo_by_id(db, id).await?),
        Commands::Create { json } => {
            let request: PhotoRequest = serde_json::from_str(&json)
                .map_err(|e| AppError::BadRequest(format!("Invalid photo request: {e}")))?;
            print_json(&photo_service::create_photo(db, request).await?)
        }
        Commands::Tags => {
            let names: Vec<String> = tag_service::find_all(db)
                .await?
                .into_iter()
                .map(|tag| tag.name.to_string())
                .collect();
            print_json(&names)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    if let Err(err) = logger_service::init() {
        eprintln!("Failed to initialize logger: {err}");
        return ExitCode::FAILURE;
    }

    info!("Starting photo catalog");

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("{err}");
            match err.downcast_ref::<AppError>() {
                Some(app_err) if app_err.is_client_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
