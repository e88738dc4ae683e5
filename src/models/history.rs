use serde::{ Serialize, Deserialize };
use std::collections::BTreeMap;

pub type ConversationId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub provider: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response_text: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub tokens_used: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub prompt: String,
    pub timestamp: String,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub response_success: Option<bool>,
    #[serde(default)]
    pub providers: Option<Vec<String>>,
    #[serde(default)]
    pub responses: Vec<StoredResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderStat {
    pub count: u64,
    #[serde(default)]
    pub avg_time: Option<f64>,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_conversations: u64,
    pub successful_conversations: u64,
    pub success_rate: f64,
    #[serde(default)]
    pub daily_stats: BTreeMap<String, u64>,
    #[serde(default)]
    pub provider_stats: BTreeMap<String, ProviderStat>,
}

impl Statistics {
    /// Count for a day keyed as `YYYY-MM-DD`; days without activity are absent.
    pub fn count_for(&self, day: &str) -> u64 {
        self.daily_stats.get(day).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HistoryEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: Vec<Conversation>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<Conversation>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConversationEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub conversation: Option<Conversation>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeleteEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub error: Option<String>,
}
