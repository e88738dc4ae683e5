use log::{ error, info };

use super::display::{ self, CONVERSATION_FAILED, DELETE_CONFIRMATION, DELETE_FAILED, HISTORY_FAILED };
use super::AssistantApp;
use crate::api::ApiError;
use crate::models::history::ConversationId;
use crate::render::html::{
    conversation_detail_html,
    history_list_html,
    inline_error_html,
    NO_HISTORY,
    NO_RESULTS,
};
use crate::ui::ElementId;

impl AssistantApp {
    pub async fn load_history(&self) {
        match self.api.history().await {
            Ok(conversations) => {
                info!("Loaded {} conversations", conversations.len());
                let html = history_list_html(&conversations, NO_HISTORY);
                self.with_registry(|registry| registry.set_html(ElementId::HistoryList, html));
            }
            Err(e) => {
                error!("Failed to load history: {}", e);
                self.with_registry(|registry| {
                    registry.set_html(ElementId::HistoryList, inline_error_html(HISTORY_FAILED))
                });
            }
        }
    }

    /// A blank term lists everything, exactly like a refresh.
    pub async fn search_history(&self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return self.load_history().await;
        }

        match self.api.search(term).await {
            Ok(results) => {
                info!("Search '{}' matched {} conversations", term, results.len());
                let html = history_list_html(&results, NO_RESULTS);
                self.with_registry(|registry| registry.set_html(ElementId::HistoryList, html));
            }
            Err(e) => {
                error!("History search failed: {}", e);
                self.with_registry(|registry| {
                    registry.set_html(ElementId::HistoryList, inline_error_html(HISTORY_FAILED))
                });
            }
        }
    }

    pub async fn view_conversation(&self, id: ConversationId) {
        let html = match self.api.conversation(id).await {
            Ok(conversation) => conversation_detail_html(&conversation, &self.renderer),
            Err(e) => {
                error!("Failed to load conversation {}: {}", id, e);
                inline_error_html(CONVERSATION_FAILED)
            }
        };
        self.with_registry(|registry| {
            registry.set_html(ElementId::ModalBody, html);
            registry.set_visible(ElementId::HistoryModal, true);
        });
    }

    pub fn close_modal(&self) {
        self.with_registry(|registry| registry.set_visible(ElementId::HistoryModal, false));
    }

    /// Nothing is sent unless the user confirms.
    pub async fn delete_conversation(&self, id: ConversationId) {
        let confirm = self.confirm.clone();
        let confirmed = match tokio::task::spawn_blocking(move || confirm.confirm(DELETE_CONFIRMATION)).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Confirmation prompt failed: {}", e);
                false
            }
        };
        if !confirmed {
            info!("Deletion of conversation {} cancelled", id);
            return;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                info!("Deleted conversation {}", id);
                self.load_history().await;
            }
            Err(ApiError::Application(message)) => {
                let message = message.filter(|m| !m.is_empty());
                self.with_registry(|registry| {
                    display::show_error(registry, message.as_deref().unwrap_or(DELETE_FAILED))
                });
            }
            Err(e) => {
                error!("Failed to delete conversation {}: {}", id, e);
                self.with_registry(|registry| display::show_error(registry, DELETE_FAILED));
            }
        }
    }
}
