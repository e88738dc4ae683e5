//! Terminal rendering of the page regions a command touched.

use crate::ui::{ ElementId, ElementRegistry };

/// Containers of the display area and the regions shown when they are visible.
const DISPLAY_AREA: [(ElementId, &[ElementId]); 4] = [
    (ElementId::ErrorArea, &[ElementId::ErrorText]),
    (ElementId::ResponseArea, &[ElementId::ResponseText]),
    (ElementId::CompareArea, &[ElementId::OpenAIResponse, ElementId::ClaudeResponse, ElementId::GroqResponse]),
    (ElementId::HistoryModal, &[ElementId::ModalBody]),
];

fn content(registry: &ElementRegistry, id: ElementId) -> Option<&str> {
    let element = registry.get(id)?;
    let body = if element.text.is_empty() { element.html.as_str() } else { element.text.as_str() };
    if body.is_empty() { None } else { Some(body) }
}

pub fn format_regions(registry: &ElementRegistry, ids: &[ElementId]) -> String {
    ids.iter()
        .filter_map(|id| content(registry, *id).map(|body| format!("[{}]\n{}\n", id.dom_id(), body)))
        .collect()
}

/// Visible parts of the display area, error first.
pub fn format_display_area(registry: &ElementRegistry) -> String {
    DISPLAY_AREA.iter()
        .filter(|(container, _)| registry.is_visible(*container))
        .map(|(_, regions)| format_regions(registry, regions))
        .collect()
}
