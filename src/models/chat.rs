use serde::{ Serialize, Deserialize };
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Claude,
    Groq,
    Compare,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Claude => "claude",
            Provider::Groq => "groq",
            Provider::Compare => "compare",
        }
    }

    /// Value read from the provider radio group. Anything unrecognised
    /// behaves like the default provider.
    pub fn from_form_value(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenAI
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseProviderError {
    message: String,
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseProviderError {}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "claude" => Ok(Provider::Claude),
            "groq" => Ok(Provider::Groq),
            "compare" => Ok(Provider::Compare),
            _ =>
                Err(ParseProviderError {
                    message: format!("Invalid provider: '{}'", s),
                }),
        }
    }
}

/// One submission, as read from the query form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub prompt: String,
    pub provider: Provider,
    pub groq_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Result of a single provider, used both for `/api/chat|claude|groq`
/// and for each slot of a comparison.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub type ChatResponse = ProviderReply;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompareReplies {
    pub openai: ProviderReply,
    pub claude: ProviderReply,
    pub groq: ProviderReply,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub responses: Option<CompareReplies>,
    #[serde(default)]
    pub error: Option<String>,
}
