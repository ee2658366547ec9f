use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use molotok::core::config;
use molotok::tui;

#[derive(Parser)]
#[command(name = "molotok", about = "Terminal client for the Molotok auction catalog")]
struct Args {
    /// Auction API base URL (overrides config file and MOLOTOK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// CDN base URL for lot images (overrides config file and MOLOTOK_CDN_URL)
    #[arg(long)]
    cdn_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.api_url.as_deref(), args.cdn_url.as_deref());

    // File logger: stdout belongs to the TUI.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Molotok starting up against {}", resolved.api_url);

    tui::run(resolved)
}
