use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tm", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start tracking a task
    ///
    /// Example: tm start Report
    Start {
        name: String,
    },
    /// Stop the running window of a task
    ///
    /// Example: tm stop Report
    Stop {
        name: String,
    },
    /// Set the description (and optionally the size) of every window of a task
    ///
    /// Example: tm describe Report "wrote the report" L
    Describe {
        name: String,
        description: String,
        size: Option<String>,
    },
    /// Summarize tracked time, for all tasks, one task, or one size
    ///
    /// Example: tm summary
    /// Example: tm summary Report
    /// Example: tm summary XL
    Summary {
        filter: Option<String>,
    },
    /// Set the size of every window of a task
    ///
    /// Example: tm size Report M
    Size {
        name: String,
        size: String,
    },
    /// Rename a task across every window
    ///
    /// Example: tm rename Report WeeklyReport
    Rename {
        name: String,
        new_name: String,
    },
}
