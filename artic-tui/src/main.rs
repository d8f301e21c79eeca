//! artic-tui - paged artwork table browser for the Art Institute of
//! Chicago public API.
//!
//! Keys:
//!   j/k or arrows   move the cursor
//!   n/p or ←/→      previous / next page
//!   space           toggle selection at the cursor
//!   m               toggle single/multiple selection mode
//!   s               select the first N records across pages
//!   r               reload the current page
//!   q               quit

mod app;
mod input;
mod render;

use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use artic_lib::ArticClient;
use artic_lib::table::{DEFAULT_ROWS_PER_PAGE, SelectionMode, TableController};

/// Terminal browser for the artworks API.
#[derive(Parser)]
#[command(name = "artic-tui", about = "Paged artwork table browser")]
struct Args {
    /// Base URL of the artworks API.
    #[arg(long, default_value = artic_lib::DEFAULT_BASE_URL)]
    url: String,

    /// Rows per page requested from the API.
    #[arg(long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
    limit: usize,

    /// Log file path.
    #[arg(long, default_value = "artic-tui.log")]
    log_file: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Log to a file; the terminal belongs to the table.
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let client = ArticClient::builder()
        .base_url(args.url)
        .page_size(args.limit)
        .build();

    let controller = TableController::new(Arc::new(client))
        .with_rows_per_page(args.limit)
        .with_selection_mode(SelectionMode::Multiple);

    if let Err(e) = app::App::new(controller).run().await {
        eprintln!("Error: {e}");
    }
}
