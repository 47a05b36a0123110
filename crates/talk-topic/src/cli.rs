//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "talk-topic",
    version,
    about = "Browse a talk page topic as a collapsible reply tree"
)]
pub struct Cli {
    /// Prefixed title of the talk page (e.g. "Talk:Main Page").
    #[arg(long, value_name = "TITLE")]
    pub page: String,

    /// Id of the topic heading to open (e.g. "h-Some_topic-2022...").
    #[arg(long, value_name = "ID")]
    pub topic: String,

    /// Wiki host, overriding the configured one.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Write logs to this file instead of the default location.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
