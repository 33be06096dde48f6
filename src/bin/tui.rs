use anyhow::Result;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use taskflow::context::{AppContext, StandardContext};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        taskflow::cli::print_help("taskflow");
        return Ok(());
    }

    // Optional root override for config/data/cache (useful for testing and
    // running several accounts side by side).
    let mut override_root: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        if (args[i] == "--root" || args[i] == "-r") && i + 1 < args.len() {
            override_root = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        }
        i += 1;
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(override_root));

    // The terminal is in raw mode while the app runs, so logs go to a file.
    if let Ok(log_path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&log_path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }

    taskflow::tui::run(ctx).await
}
