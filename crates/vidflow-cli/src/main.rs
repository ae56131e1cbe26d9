use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod app;
mod flows;
mod prompt;
mod ui;

/// Interactive wizard for video script workspaces.
#[derive(Parser)]
#[command(name = "vidflow", version, about)]
struct Cli {
    /// Directory to operate on instead of the current directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let start_dir = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !console::user_attended() {
        ui::noninteractive_notice();
        return Ok(());
    }
    app::App::new(start_dir)?.run()
}
