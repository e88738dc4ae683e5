pub mod confirm;

pub use self::confirm::{ AutoConfirm, Confirm, StdinConfirm };

use std::collections::BTreeMap;

/// Every logical region of the assistant page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    QueryForm,
    QueryInput,
    ProviderGroup,
    GroqModelSelector,
    GroqModel,
    SubmitButton,
    LoadingIndicator,
    ResponseArea,
    ResponseText,
    CompareArea,
    OpenAIResponse,
    ClaudeResponse,
    GroqResponse,
    ErrorArea,
    ErrorText,
    HistoryList,
    HistorySearch,
    HistoryModal,
    ModalBody,
    TotalConversations,
    SuccessfulConversations,
    SuccessRate,
    TodayConversations,
    ProviderStats,
}

impl ElementId {
    pub const ALL: [ElementId; 24] = [
        ElementId::QueryForm,
        ElementId::QueryInput,
        ElementId::ProviderGroup,
        ElementId::GroqModelSelector,
        ElementId::GroqModel,
        ElementId::SubmitButton,
        ElementId::LoadingIndicator,
        ElementId::ResponseArea,
        ElementId::ResponseText,
        ElementId::CompareArea,
        ElementId::OpenAIResponse,
        ElementId::ClaudeResponse,
        ElementId::GroqResponse,
        ElementId::ErrorArea,
        ElementId::ErrorText,
        ElementId::HistoryList,
        ElementId::HistorySearch,
        ElementId::HistoryModal,
        ElementId::ModalBody,
        ElementId::TotalConversations,
        ElementId::SuccessfulConversations,
        ElementId::SuccessRate,
        ElementId::TodayConversations,
        ElementId::ProviderStats,
    ];

    /// Page identifier of the region.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::QueryForm => "queryForm",
            ElementId::QueryInput => "queryInput",
            ElementId::ProviderGroup => "aiProvider",
            ElementId::GroqModelSelector => "groqModelSelector",
            ElementId::GroqModel => "groqModel",
            ElementId::SubmitButton => "submitBtn",
            ElementId::LoadingIndicator => "loadingIndicator",
            ElementId::ResponseArea => "responseArea",
            ElementId::ResponseText => "responseText",
            ElementId::CompareArea => "compareArea",
            ElementId::OpenAIResponse => "openaiResponse",
            ElementId::ClaudeResponse => "claudeResponse",
            ElementId::GroqResponse => "groqResponse",
            ElementId::ErrorArea => "errorArea",
            ElementId::ErrorText => "errorText",
            ElementId::HistoryList => "historyList",
            ElementId::HistorySearch => "historySearch",
            ElementId::HistoryModal => "historyModal",
            ElementId::ModalBody => "modalBody",
            ElementId::TotalConversations => "totalConversations",
            ElementId::SuccessfulConversations => "successfulConversations",
            ElementId::SuccessRate => "successRate",
            ElementId::TodayConversations => "todayConversations",
            ElementId::ProviderStats => "providerStats",
        }
    }

    fn hidden_by_default(&self) -> bool {
        matches!(
            self,
            ElementId::GroqModelSelector
                | ElementId::LoadingIndicator
                | ElementId::ResponseArea
                | ElementId::CompareArea
                | ElementId::ErrorArea
                | ElementId::HistoryModal
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub visible: bool,
    pub disabled: bool,
    /// Inner markup.
    pub html: String,
    /// Plain text content; set instead of `html` for untrusted strings.
    pub text: String,
    /// Current value of an input, select or radio group.
    pub value: String,
}

impl Element {
    pub fn visible() -> Self {
        Self { visible: true, ..Default::default() }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Features that only activate when the regions they need are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Query,
    ProviderSelector,
    History,
    HistorySearch,
    HistoryModal,
    Statistics,
}

impl Feature {
    fn required(&self) -> &'static [ElementId] {
        match self {
            Feature::Query => &[ElementId::QueryForm],
            Feature::ProviderSelector => &[ElementId::ProviderGroup],
            Feature::History => &[ElementId::HistoryList],
            Feature::HistorySearch => &[ElementId::HistoryList, ElementId::HistorySearch],
            Feature::HistoryModal => &[ElementId::HistoryModal, ElementId::ModalBody],
            Feature::Statistics => &[],
        }
    }
}

/// Optional reference per UI region. Writes to an absent region are no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRegistry {
    elements: BTreeMap<ElementId, Element>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full assistant page with its initial visibility.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for id in ElementId::ALL {
            let element = if id.hidden_by_default() { Element::hidden() } else { Element::visible() };
            registry.insert(id, element);
        }
        registry
    }

    pub fn insert(&mut self, id: ElementId, element: Element) {
        self.elements.insert(id, element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::Statistics => {
                [
                    ElementId::TotalConversations,
                    ElementId::SuccessfulConversations,
                    ElementId::SuccessRate,
                    ElementId::TodayConversations,
                    ElementId::ProviderStats,
                ]
                    .iter()
                    .any(|id| self.contains(*id))
            }
            _ => feature.required().iter().all(|id| self.contains(*id)),
        }
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(el) = self.get_mut(id) {
            el.visible = visible;
        }
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(el) = self.get_mut(id) {
            el.disabled = disabled;
        }
    }

    pub fn set_html(&mut self, id: ElementId, html: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.html = html.into();
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.text = text.into();
        }
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.value = value.into();
        }
    }

    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|el| el.value.as_str())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.get(id).map(|el| el.visible).unwrap_or(false)
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.get(id).map(|el| el.disabled).unwrap_or(false)
    }

    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|el| el.html.as_str())
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|el| el.text.as_str())
    }
}
