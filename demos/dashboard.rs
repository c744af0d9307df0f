//! Prints the studio dashboard as JSON.
//!
//! ```text
//! cargo run --example dashboard -- [atelier.toml]
//! ATELIER_LOG=atelier=debug cargo run --example dashboard
//! ```

use std::env;
use std::error::Error;
use std::path::PathBuf;

use atelier::{Artwork, ListView, Studio, StudioConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ATELIER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("atelier=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = match env::args().nth(1).map(PathBuf::from) {
        Some(path) => StudioConfig::load(&path)?,
        None => StudioConfig::default(),
    };
    let studio = Studio::from_config(&config)?;
    info!(today = %studio.today(), "studio ready");

    let summary = studio.dashboard()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let mut view = ListView::<Artwork>::new();
    view.set_search("oil");
    for artwork in view.visible(studio.artworks())? {
        println!("{:<24} {:>10} {}", artwork.title, artwork.display_price(), artwork.status);
    }

    for issue in studio.audit()? {
        println!("warning: {}", issue);
    }

    Ok(())
}
