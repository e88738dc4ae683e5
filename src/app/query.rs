use log::{ debug, error };
use std::sync::atomic::Ordering;
use std::sync::PoisonError;

use super::display::{
    self,
    CONNECTION_FAILED,
    GENERATION_FAILED,
    VALIDATION_MESSAGE,
};
use super::AssistantApp;
use crate::api::{ ApiError, Reply };
use crate::models::chat::{ Provider, Query };
use crate::ui::{ ElementId, ElementRegistry, Feature };

/// Clears the loading state when the submission ends, however it ends,
/// unless a newer submission has taken over the display.
struct LoadingGuard<'a> {
    app: &'a AssistantApp,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.app.with_registry_if_current(self.generation, display::hide_loading);
    }
}

impl AssistantApp {
    pub fn read_form(&self) -> Query {
        let default_model = self.config.default_groq_model.as_str();
        self.with_registry(|registry| {
            let groq_model = match registry.value(ElementId::GroqModel) {
                Some(model) if !model.trim().is_empty() => model.trim().to_string(),
                _ => default_model.to_string(),
            };
            Query {
                prompt: registry.value(ElementId::QueryInput).unwrap_or_default().trim().to_string(),
                provider: Provider::from_form_value(registry.value(ElementId::ProviderGroup)),
                groq_model,
            }
        })
    }

    pub(super) fn provider_changed(&self, value: &str) {
        let provider = Provider::from_form_value(Some(value));
        self.with_registry(|registry| {
            registry.set_value(ElementId::ProviderGroup, provider.as_str());
            display::set_groq_selector(registry, provider == Provider::Groq);
        });
    }

    /// Takes the next generation and enters the loading state under one lock,
    /// so no older submission can interleave a write.
    fn begin_submission(&self) -> u64 {
        self.with_registry(|registry| {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            display::hide_all_displays(registry);
            display::show_loading(registry);
            generation
        })
    }

    /// Runs `f` only while `generation` is still the latest submission. The
    /// check and the write share the registry lock.
    fn with_registry_if_current<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut ElementRegistry) -> R
    ) -> Option<R> {
        self.with_registry(|registry| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return None;
            }
            Some(f(registry))
        })
    }

    pub(super) async fn submit(&self) {
        let query = self.read_form();
        if query.prompt.is_empty() {
            self.with_registry(|registry| display::show_error(registry, VALIDATION_MESSAGE));
            return;
        }

        let generation = self.begin_submission();
        let _loading = LoadingGuard { app: self, generation };

        let result = self.api.submit(&query).await;
        if let Err(e) = &result {
            if !matches!(e, ApiError::Application(_)) {
                error!("Error: {}", e);
            }
        }

        let shown = self.with_registry_if_current(generation, |registry| match &result {
            Ok(Reply::Single(text)) => display::display_single_response(registry, &self.renderer, text),
            Ok(Reply::Compare(replies)) =>
                display::display_compare_responses(registry, &self.renderer, replies),
            Err(ApiError::Application(message)) => {
                let message = message.as_deref().filter(|m| !m.is_empty());
                display::show_error(registry, message.unwrap_or(GENERATION_FAILED))
            }
            Err(_) => display::show_error(registry, CONNECTION_FAILED),
        });

        match shown {
            None => debug!("Discarding response of superseded submission #{}", generation),
            Some(()) if result.is_ok() => self.schedule_history_refresh(),
            Some(()) => {}
        }
    }

    /// The backend may not have stored the new conversation yet; the delay
    /// only makes that likely.
    fn schedule_history_refresh(&self) {
        if !self.supports(Feature::History) {
            return;
        }
        let app = self.clone();
        let delay = self.config.history_refresh_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            app.load_history().await;
        });
        *self.pending_refresh.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }
}
