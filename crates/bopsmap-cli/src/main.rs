mod docs;
mod load;
mod search;
mod table;

use bopsmap_core::view::{Bounds, SortKey, StatusFilter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bopsmap-cli")]
#[command(about = "Browse BOPS planning applications from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every page of planning applications and refresh the cache
    Load {
        /// Print the full feature collection as JSON instead of a summary
        #[arg(long)]
        geojson: bool,
        /// Do not write the result to the cache file
        #[arg(long)]
        no_cache: bool,
    },
    /// Find an application by reference, or locate a postcode
    Search {
        /// Application reference (e.g. 21-12345) or UK postcode
        query: String,
        /// Search the cached collection instead of fetching
        #[arg(long)]
        cached: bool,
    },
    /// List applications as a table
    Table {
        /// Only show applications with this status ("None" shows all)
        #[arg(long, default_value = "None")]
        status: StatusFilter,
        /// Sort order: none, ref, date_asc, date_des
        #[arg(long, default_value = "none")]
        sort: SortKey,
        /// Case-insensitive text match on address, reference, or description
        #[arg(long)]
        search: Option<String>,
        /// Centre for a radius search: reference, postcode, or "lon,lat"
        #[arg(long, requires = "radius_km")]
        near: Option<String>,
        /// Radius in kilometres around --near
        #[arg(long, requires = "near")]
        radius_km: Option<f64>,
        /// Visible map box as "south,west,north,east"
        #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: Option<Bounds>,
        /// Use the cached collection instead of fetching
        #[arg(long)]
        cached: bool,
    },
    /// Fetch the document list for one application
    Docs {
        /// Application reference
        reference: String,
    },
}

/// Parses `south,west,north,east` into [`Bounds`].
fn parse_bbox(raw: &str) -> Result<Bounds, String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid bbox '{raw}': {e}"))?;

    match parts.as_slice() {
        [south, west, north, east] if south <= north && west <= east => {
            Ok(Bounds::new(*south, *west, *north, *east))
        }
        [_, _, _, _] => Err(format!(
            "invalid bbox '{raw}': south must not exceed north and west must not exceed east"
        )),
        _ => Err(format!(
            "invalid bbox '{raw}': expected four numbers south,west,north,east"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Argument parsing must not depend on the environment.
    let cli = Cli::parse();
    let config = bopsmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Load { geojson, no_cache }) => {
            load::run_load(&config, geojson, !no_cache).await?;
        }
        Some(Commands::Search { query, cached }) => {
            search::run_search(&config, &query, cached).await?;
        }
        Some(Commands::Table {
            status,
            sort,
            search,
            near,
            radius_km,
            bbox,
            cached,
        }) => {
            let options = table::TableOptions {
                status,
                sort,
                search,
                near: near.zip(radius_km),
                bbox,
            };
            table::run_table(&config, &options, cached).await?;
        }
        Some(Commands::Docs { reference }) => docs::run_docs(&config, &reference).await?,
        None => println!("bopsmap-cli ready; run with --help to list commands"),
    }

    Ok(())
}
