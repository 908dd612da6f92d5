use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use intellisync::core::config::{self, CliOverrides};
use intellisync::core::theme::Theme;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "intellisync", about = "Chat with AI models from your terminal")]
struct Args {
    /// Model to select on startup (e.g. gpt-4-turbo, claude-3-opus)
    #[arg(short, long)]
    model: Option<String>,

    /// Color theme: light or dark
    #[arg(short, long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Directory for transcript exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Delay before the simulated reply arrives, in milliseconds
    #[arg(long)]
    response_delay_ms: Option<u64>,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (expected light or dark)"))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to intellisync.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("intellisync.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("Config error: {}", e);
            Default::default()
        }
    };

    let cli = CliOverrides {
        model: args.model,
        theme: args.theme,
        export_dir: args.export_dir,
        response_delay_ms: args.response_delay_ms,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("IntelliSync starting up with model: {}", resolved.model_id);

    intellisync::tui::run(resolved)
}
