//! Display-area transitions. Each function takes the registry it updates.

use crate::models::chat::{ CompareReplies, ProviderReply };
use crate::render::MarkdownRenderer;
use crate::ui::{ ElementId, ElementRegistry };

pub const VALIDATION_MESSAGE: &str = "Please enter a question.";
pub const GENERATION_FAILED: &str = "Error while generating the response";
pub const CONNECTION_FAILED: &str = "Could not connect to the server";
pub const HISTORY_FAILED: &str = "Could not load the conversation history";
pub const CONVERSATION_FAILED: &str = "Could not load this conversation";
pub const DELETE_CONFIRMATION: &str = "Delete this conversation?";
pub const DELETE_FAILED: &str = "Could not delete the conversation";

pub fn show_error(registry: &mut ElementRegistry, message: &str) {
    registry.set_text(ElementId::ErrorText, message);
    registry.set_visible(ElementId::ErrorArea, true);
    registry.set_visible(ElementId::ResponseArea, false);
    registry.set_visible(ElementId::CompareArea, false);
}

pub fn hide_all_displays(registry: &mut ElementRegistry) {
    for id in [ElementId::ResponseArea, ElementId::CompareArea, ElementId::ErrorArea] {
        registry.set_visible(id, false);
    }
}

pub fn show_loading(registry: &mut ElementRegistry) {
    registry.set_visible(ElementId::LoadingIndicator, true);
    registry.set_disabled(ElementId::SubmitButton, true);
}

pub fn hide_loading(registry: &mut ElementRegistry) {
    registry.set_visible(ElementId::LoadingIndicator, false);
    registry.set_disabled(ElementId::SubmitButton, false);
}

pub fn display_single_response(registry: &mut ElementRegistry, renderer: &MarkdownRenderer, text: &str) {
    registry.set_html(ElementId::ResponseText, renderer.render(text));
    registry.set_visible(ElementId::ResponseArea, true);
}

fn panel_content(reply: &ProviderReply, renderer: &MarkdownRenderer) -> String {
    if reply.success {
        renderer.render(reply.text.as_deref().unwrap_or_default())
    } else {
        reply.error.clone().unwrap_or_default()
    }
}

pub fn display_compare_responses(
    registry: &mut ElementRegistry,
    renderer: &MarkdownRenderer,
    replies: &CompareReplies
) {
    registry.set_html(ElementId::OpenAIResponse, panel_content(&replies.openai, renderer));
    registry.set_html(ElementId::ClaudeResponse, panel_content(&replies.claude, renderer));
    registry.set_html(ElementId::GroqResponse, panel_content(&replies.groq, renderer));
    registry.set_visible(ElementId::CompareArea, true);
}

pub fn set_groq_selector(registry: &mut ElementRegistry, visible: bool) {
    registry.set_visible(ElementId::GroqModelSelector, visible);
}
