use chrono::{ DateTime, Local };
use log::error;

use super::AssistantApp;
use crate::models::history::Statistics;
use crate::render::html::provider_stats_html;
use crate::ui::{ ElementId, ElementRegistry };

/// Key of `daily_stats` for the local calendar day.
pub fn today_key(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}

pub fn render_statistics(registry: &mut ElementRegistry, stats: &Statistics, today: &str) {
    registry.set_text(ElementId::TotalConversations, stats.total_conversations.to_string());
    registry.set_text(ElementId::SuccessfulConversations, stats.successful_conversations.to_string());
    registry.set_text(ElementId::SuccessRate, format!("{:.1}%", stats.success_rate));
    registry.set_text(ElementId::TodayConversations, stats.count_for(today).to_string());
    registry.set_html(ElementId::ProviderStats, provider_stats_html(&stats.provider_stats));
}

impl AssistantApp {
    /// Failures leave the panel as it was.
    pub async fn load_stats(&self) {
        match self.api.stats().await {
            Ok(stats) => {
                let today = today_key(Local::now());
                self.with_registry(|registry| render_statistics(registry, &stats, &today));
            }
            Err(e) => error!("Failed to load statistics: {}", e),
        }
    }
}
