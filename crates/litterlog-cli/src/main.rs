//! Litterlog CLI — command-line client for geotagged litter-photo uploads.
//!
//! Set LITTERLOG_TOKEN and LITTERLOG_API_URL. Uses Bearer auth.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use litterlog_api_client::ApiClient;
use litterlog_cli::{init_tracing, parse_tag_arg};
use litterlog_core::{AppConfig, PhotoOrigin, PhotoRecord, PhotoStore};
use litterlog_uploader::{BatchOptions, BatchOutcome, BatchUploader};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "litterlog", about = "Litter-photo upload CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more geotagged photos
    Upload {
        /// Paths to the photo files
        files: Vec<std::path::PathBuf>,
        /// Latitude for the photos
        #[arg(long)]
        lat: f64,
        /// Longitude for the photos
        #[arg(long)]
        lon: f64,
        /// Mark the litter as picked up
        #[arg(long)]
        picked_up: bool,
        /// Structured tag as category:title[:quantity] (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Free-text tag, 3-99 characters (repeatable)
        #[arg(long = "custom-tag")]
        custom_tags: Vec<String>,
    },
    /// List previously uploaded photos that still lack tags
    Untagged,
    /// Delete an uploaded photo by its server id
    Delete {
        /// Server-assigned photo id
        photo_id: i64,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn outcome_json(outcome: &BatchOutcome) -> serde_json::Value {
    let failure_kinds: serde_json::Map<String, serde_json::Value> = outcome
        .failure_kinds
        .iter()
        .map(|(kind, count)| (kind.to_string(), serde_json::json!(count)))
        .collect();
    serde_json::json!({
        "uploaded": outcome.uploaded,
        "failed": outcome.failed,
        "tagged": outcome.tagged,
        "tagged_failed": outcome.tagged_failed,
        "failure_kinds": failure_kinds,
        "cancelled": outcome.cancelled,
    })
}

/// Build store records for the given files, all sharing one location.
fn stage_files(
    store: &mut PhotoStore,
    files: &[std::path::PathBuf],
    lat: f64,
    lon: f64,
) -> anyhow::Result<()> {
    let mut records = Vec::new();
    for file in files {
        let metadata = std::fs::metadata(file)
            .with_context(|| format!("Failed to read file metadata: {}", file.display()))?;
        let date: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::from)
            .unwrap_or_else(|_| Utc::now());
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo.jpg")
            .to_string();
        records.push(PhotoRecord::new_device(
            store.allocate_local_id(),
            PhotoOrigin::Gallery,
            file.to_string_lossy().to_string(),
            filename,
            date,
            Some(lat),
            Some(lon),
        ));
    }
    store.add_records(records, PhotoOrigin::Gallery);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let client = ApiClient::from_config(&config)
        .context("Failed to create API client. Set LITTERLOG_TOKEN and LITTERLOG_API_URL")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            lat,
            lon,
            picked_up,
            tags,
            custom_tags,
        } => {
            if files.is_empty() {
                return Err(anyhow::anyhow!("No files given"));
            }

            let mut store = PhotoStore::new();
            stage_files(&mut store, &files, lat, lon)?;

            for index in 0..store.len() {
                for tag in &tags {
                    let (category, title, quantity) = parse_tag_arg(tag)?;
                    store.add_tag(index, &category, &title, quantity)?;
                }
                for text in &custom_tags {
                    store.add_custom_tag(index, text)?;
                }
                if picked_up {
                    let id = store.get(index).map(|r| r.id).unwrap_or_default();
                    store.toggle_picked_up(id);
                }
            }

            let uploader = BatchUploader::new(
                Arc::new(client),
                BatchOptions {
                    device_model: config.device_model.clone(),
                    admin_tagging: config.admin_tagging,
                },
            );

            let cancel = CancellationToken::new();
            let outcome = uploader.upload_all(&mut store, &cancel).await;
            print_json(&outcome_json(&outcome))?;
        }
        Commands::Untagged => {
            let photos = client.get_untagged_uploads().await?;
            print_json(&photos)?;
        }
        Commands::Delete { photo_id } => {
            client.delete_photo(photo_id).await?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Photo {} deleted", photo_id) }),
            )?;
        }
    }

    Ok(())
}
