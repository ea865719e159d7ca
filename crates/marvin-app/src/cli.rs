use clap::{Parser, Subcommand};

/// Marvin — tool-calling agent demos against an OpenAI-compatible API.
#[derive(Parser, Debug)]
#[command(name = "marvin", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. debug, marvin=debug).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Resume (and persist to) an existing session id.
    #[arg(long)]
    pub session: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plain chat with no tools.
    Chat {
        message: String,
        /// Stream the response token by token.
        #[arg(long)]
        stream: bool,
    },
    /// Ask about the weather; the model calls the mock weather tool.
    Weather { question: String },
    /// Ask questions over the mock music catalog via SQL.
    Database { question: String },
    /// Analyze the passenger table with SQL plus the Python sandbox.
    Analyze { question: String },
    /// Print a stored session transcript.
    History { session_id: String },
    /// List stored session ids.
    Sessions,
}

pub fn parse() -> Args {
    Args::parse()
}
