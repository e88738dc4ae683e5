pub mod output;

use clap::{ ArgAction, Parser, Subcommand };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Backend Args ---
    /// Base URL of the assistant backend (e.g., http://127.0.0.1:5000)
    #[arg(long, env = "ASSISTANT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Request timeout in seconds. 0 disables the timeout.
    #[arg(long, env = "ASSISTANT_TIMEOUT_SECS", default_value = "120")]
    pub timeout_secs: u64,

    /// Delay before the history list is refreshed after a successful query.
    #[arg(long, env = "HISTORY_REFRESH_DELAY_MS", default_value = "1000")]
    pub refresh_delay_ms: u64,

    /// Groq model used when none is given with `ask --model`.
    #[arg(long, env = "GROQ_MODEL", default_value = "llama3-8b-8192")]
    pub default_groq_model: String,

    // --- Markdown Args ---
    /// Render single newlines as line breaks
    #[arg(long, env = "MARKDOWN_BREAKS", default_value = "true", action = ArgAction::Set)]
    pub markdown_breaks: bool,

    /// Enable GitHub flavoured Markdown (tables, strikethrough, task lists)
    #[arg(long, env = "MARKDOWN_GFM", default_value = "true", action = ArgAction::Set)]
    pub markdown_gfm: bool,

    /// Escape raw HTML found in responses
    #[arg(long, env = "MARKDOWN_SANITIZE", default_value = "false")]
    pub markdown_sanitize: bool,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Send a prompt to one provider, or to all of them with `--provider compare`.
    Ask {
        prompt: String,

        /// openai, claude, groq or compare
        #[arg(short, long, default_value = "openai")]
        provider: String,

        /// Groq model, only sent with `--provider groq`.
        #[arg(short, long)]
        model: Option<String>,
    },
    /// List recent conversations.
    History,
    /// Search conversations by prompt. An empty term lists everything.
    Search {
        #[arg(default_value = "")]
        term: String,
    },
    /// Show one conversation with all of its responses.
    Show {
        id: i64,
    },
    /// Delete a conversation after confirmation.
    Delete {
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },
    /// Show aggregate usage statistics.
    Stats,
}
