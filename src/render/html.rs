//! Markup for the history list, the conversation modal and the statistics panel.

use chrono::{ DateTime, NaiveDateTime };
use std::fmt::Write;

use super::markdown::MarkdownRenderer;
use crate::models::history::{ Conversation, ProviderStat, StoredResponse };
use std::collections::BTreeMap;

const PROMPT_PREVIEW_CHARS: usize = 100;

pub const NO_HISTORY: &str = "No conversations yet";
pub const NO_RESULTS: &str = "No conversation matches this search";
pub const NO_RESPONSES: &str = "No responses recorded";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Backend timestamps are SQLite `CURRENT_TIMESTAMP` values; RFC 3339 is
/// accepted too. Anything else is shown unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%d/%m/%Y %H:%M").to_string();
    }
    raw.to_string()
}

fn providers_label(conversation: &Conversation) -> String {
    match &conversation.providers {
        Some(providers) if !providers.is_empty() => providers.join(", "),
        _ => conversation.model_used.clone().unwrap_or_default(),
    }
}

pub fn history_item_html(conversation: &Conversation) -> String {
    let mut out = String::new();
    let status = match conversation.response_success {
        Some(false) => " history-item-failed",
        _ => "",
    };
    let _ = write!(
        out,
        "<div class=\"history-item{}\" data-id=\"{}\">\
<div class=\"history-prompt\">{}</div>\
<div class=\"history-meta\"><span class=\"history-date\">{}</span>\
<span class=\"history-providers\">{}</span></div>\
<div class=\"history-actions\">\
<button class=\"btn-view\" data-id=\"{}\">View</button>\
<button class=\"btn-delete\" data-id=\"{}\">Delete</button>\
</div></div>",
        status,
        conversation.id,
        escape_html(&truncate_chars(&conversation.prompt, PROMPT_PREVIEW_CHARS)),
        escape_html(&format_timestamp(&conversation.timestamp)),
        escape_html(&providers_label(conversation)),
        conversation.id,
        conversation.id
    );
    out
}

pub fn history_list_html(conversations: &[Conversation], empty_message: &str) -> String {
    if conversations.is_empty() {
        return format!("<p class=\"no-history\">{}</p>", escape_html(empty_message));
    }
    conversations.iter().map(history_item_html).collect()
}

pub fn inline_error_html(message: &str) -> String {
    format!("<p class=\"history-error\">{}</p>", escape_html(message))
}

fn response_meta(response: &StoredResponse) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(secs) = response.response_time {
        parts.push(format!("{:.2}s", secs));
    }
    if let Some(tokens) = response.tokens_used {
        parts.push(format!("{} tokens", tokens));
    }
    if parts.is_empty() { None } else { Some(parts.join(" · ")) }
}

fn response_html(response: &StoredResponse, renderer: &MarkdownRenderer) -> String {
    let title = match &response.model {
        Some(model) => format!("{} ({})", response.provider, model),
        None => response.provider.clone(),
    };
    let body = if response.success {
        renderer.render(response.response_text.as_deref().unwrap_or_default())
    } else {
        format!(
            "<p class=\"response-error\">{}</p>",
            escape_html(response.error_message.as_deref().unwrap_or("Unknown error"))
        )
    };

    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"conversation-response {}\"><h4>{}</h4><div class=\"response-content\">{}</div>",
        if response.success { "success" } else { "error" },
        escape_html(&title),
        body
    );
    if let Some(meta) = response_meta(response) {
        let _ = write!(out, "<div class=\"response-meta\">{}</div>", escape_html(&meta));
    }
    out.push_str("</div>");
    out
}

pub fn conversation_detail_html(conversation: &Conversation, renderer: &MarkdownRenderer) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"conversation-detail\" data-id=\"{}\">\
<h3>Question</h3><div class=\"conversation-prompt\">{}</div>\
<div class=\"conversation-date\">{}</div>",
        conversation.id,
        escape_html(&conversation.prompt),
        escape_html(&format_timestamp(&conversation.timestamp))
    );
    if conversation.responses.is_empty() {
        let _ = write!(out, "<p class=\"no-responses\">{}</p>", NO_RESPONSES);
    } else {
        for response in &conversation.responses {
            out.push_str(&response_html(response, renderer));
        }
    }
    out.push_str("</div>");
    out
}

pub fn provider_stats_html(stats: &BTreeMap<String, ProviderStat>) -> String {
    if stats.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"provider-stats\">");
    for (provider, stat) in stats {
        let avg = match stat.avg_time {
            Some(t) => format!("{:.2}s", t),
            None => "n/a".to_string(),
        };
        let _ = write!(
            out,
            "<li><strong>{}</strong>: {} responses, avg {}, {} tokens</li>",
            escape_html(provider),
            stat.count,
            avg,
            stat.total_tokens
        );
    }
    out.push_str("</ul>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkdownOptions;

    fn conversation(id: i64, prompt: &str) -> Conversation {
        Conversation {
            id,
            prompt: prompt.to_string(),
            timestamp: "2024-05-01 09:30:00".to_string(),
            model_used: Some("openai".to_string()),
            response_success: Some(true),
            providers: None,
            responses: Vec::new(),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let cut = truncate_chars(&long, 100);
        assert_eq!(cut.chars().count(), 103);
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn timestamps_are_reformatted_when_recognised() {
        assert_eq!(format_timestamp("2024-05-01 09:30:00"), "01/05/2024 09:30");
        assert_eq!(format_timestamp("2024-05-01T09:30:00Z"), "01/05/2024 09:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn history_items_escape_prompts_and_carry_ids() {
        let html = history_list_html(&[conversation(9, "<script>")], NO_HISTORY);
        assert!(html.contains("data-id=\"9\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("openai"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_history_shows_placeholder() {
        let html = history_list_html(&[], NO_HISTORY);
        assert!(html.contains(NO_HISTORY));
    }

    #[test]
    fn detail_renders_markdown_and_errors() {
        let mut c = conversation(1, "Compare");
        c.responses = vec![
            StoredResponse {
                provider: "openai".into(),
                success: true,
                model: Some("gpt-3.5-turbo".into()),
                response_text: Some("**yes**".into()),
                error_message: None,
                response_time: Some(1.234),
                tokens_used: Some(42),
            },
            StoredResponse {
                provider: "claude".into(),
                success: false,
                model: None,
                response_text: None,
                error_message: Some("rate <limited>".into()),
                response_time: None,
                tokens_used: None,
            }
        ];
        let renderer = MarkdownRenderer::new(MarkdownOptions::default());
        let html = conversation_detail_html(&c, &renderer);
        assert!(html.contains("<strong>yes</strong>"));
        assert!(html.contains("openai (gpt-3.5-turbo)"));
        assert!(html.contains("1.23s · 42 tokens"));
        assert!(html.contains("rate &lt;limited&gt;"));
    }
}
