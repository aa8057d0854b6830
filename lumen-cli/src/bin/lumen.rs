use clap::Parser;
use lumen::{BackendKind, LogLevel};
use lumen_cli::{DemoOptions, run_demo};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "Lumen presentation surface demo")]
struct Cli {
    /// trace, debug, info, warning|warn, error or none. Anything else means info.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Open a window and animate a test card.
    #[arg(short = 'w', long)]
    window: bool,

    #[arg(long, default_value_t = BackendKind::default())]
    backend: BackendKind,

    /// JSON surface config (width, height, title, vsync, resizable).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 120)]
    frames: u64,
}

fn main() {
    let cli = Cli::parse();

    lumen::set_log_level(LogLevel::parse(&cli.log_level));
    if let Err(e) = lumen::logging::init() {
        eprintln!("lumen: logger already installed: {}", e);
    }

    log::info!("Hello from lumen.");
    log::warn!("This is a warning message.");
    log::error!("This is an error message.");

    if cli.window {
        let options = DemoOptions {
            backend: cli.backend,
            config: cli.config,
            frames: cli.frames,
        };
        if let Err(e) = run_demo(&options) {
            log::error!("{:#}", e);
        }
    }
}
