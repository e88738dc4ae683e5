use crate::models::history::ConversationId;
use crate::ui::{ ElementId, Feature };

/// User actions delivered to [`crate::app::AssistantApp::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Query form submitted.
    Submit,
    /// A provider radio was selected; carries the radio's value.
    ProviderChanged(String),
    /// Search button or Enter in the search field; the term is read from the field.
    SearchHistory,
    RefreshHistory,
    ViewConversation(ConversationId),
    DeleteConversation(ConversationId),
    CloseModal,
    /// Click inside the modal overlay. Only a click on the overlay itself closes it.
    ModalClick {
        target: ElementId,
    },
}

impl UiEvent {
    /// The feature whose regions must exist for the handler to be registered.
    pub fn feature(&self) -> Feature {
        match self {
            UiEvent::Submit => Feature::Query,
            UiEvent::ProviderChanged(_) => Feature::ProviderSelector,
            UiEvent::SearchHistory => Feature::HistorySearch,
            UiEvent::RefreshHistory | UiEvent::DeleteConversation(_) => Feature::History,
            UiEvent::ViewConversation(_) | UiEvent::CloseModal | UiEvent::ModalClick { .. } =>
                Feature::HistoryModal,
        }
    }
}
