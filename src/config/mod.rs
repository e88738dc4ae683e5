use crate::cli::Args;
use crate::models::chat::Provider;
use crate::models::history::ConversationId;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported base URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub openai: String,
    pub claude: String,
    pub groq: String,
    pub compare: String,
    pub history: String,
    pub history_search: String,
    pub stats: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: "/api/chat".to_string(),
            claude: "/api/claude".to_string(),
            groq: "/api/groq".to_string(),
            compare: "/api/compare".to_string(),
            history: "/api/history".to_string(),
            history_search: "/api/history/search".to_string(),
            stats: "/api/stats".to_string(),
        }
    }
}

impl Endpoints {
    pub fn for_provider(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAI => &self.openai,
            Provider::Claude => &self.claude,
            Provider::Groq => &self.groq,
            Provider::Compare => &self.compare,
        }
    }

    pub fn conversation(&self, id: ConversationId) -> String {
        format!("{}/{}", self.history.trim_end_matches('/'), id)
    }
}

/// Options handed to the Markdown engine once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Single newlines become `<br />`.
    pub breaks: bool,
    /// Tables, strikethrough, task lists and footnotes.
    pub gfm: bool,
    /// Raw HTML in the source is escaped instead of passed through.
    pub sanitize: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
            sanitize: false,
        }
    }
}

/// Immutable client configuration, built once and shared by the controller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub endpoints: Endpoints,
    pub markdown: MarkdownOptions,
    pub history_refresh_delay: Duration,
    pub default_groq_model: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: None,
            endpoints: Endpoints::default(),
            markdown: MarkdownOptions::default(),
            history_refresh_delay: Duration::from_millis(1000),
            default_groq_model: DEFAULT_GROQ_MODEL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let url = Url::parse(&args.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: args.base_url.clone(),
            source,
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Self {
            base_url: args.base_url.trim_end_matches('/').to_string(),
            timeout: match args.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            endpoints: Endpoints::default(),
            markdown: MarkdownOptions {
                breaks: args.markdown_breaks,
                gfm: args.markdown_gfm,
                sanitize: args.markdown_sanitize,
            },
            history_refresh_delay: Duration::from_millis(args.refresh_delay_ms),
            default_groq_model: args.default_groq_model.clone(),
        })
    }
}
