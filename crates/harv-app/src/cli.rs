use clap::Parser;

/// HARV — a selection-driven page assistant panel.
#[derive(Parser, Debug)]
#[command(name = "harv", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// URL to report as the active tab.
    #[arg(long)]
    pub url: Option<String>,

    /// Keep session state in memory only, skipping the session file.
    #[arg(long)]
    pub ephemeral: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
