pub mod display;
mod history;
mod query;
mod stats;

pub use self::stats::{ render_statistics, today_key };

use log::{ debug, info };
use std::sync::atomic::AtomicU64;
use std::sync::{ Arc, Mutex, PoisonError };
use tokio::task::JoinHandle;

use crate::api::{ ApiClient, ApiTransport };
use crate::config::ClientConfig;
use crate::events::UiEvent;
use crate::render::MarkdownRenderer;
use crate::ui::{ Confirm, ElementId, ElementRegistry, Feature };

/// View-controller for the assistant page. Cheap to clone; clones share
/// the same registry.
#[derive(Clone)]
pub struct AssistantApp {
    config: Arc<ClientConfig>,
    api: ApiClient,
    renderer: MarkdownRenderer,
    registry: Arc<Mutex<ElementRegistry>>,
    confirm: Arc<dyn Confirm>,
    /// Incremented per submission; only the latest one may touch the display.
    generation: Arc<AtomicU64>,
    pending_refresh: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AssistantApp {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn ApiTransport>,
        registry: ElementRegistry,
        confirm: Arc<dyn Confirm>
    ) -> Self {
        let renderer = MarkdownRenderer::new(config.markdown);
        let api = ApiClient::new(transport, config.endpoints.clone());
        Self {
            config: Arc::new(config),
            api,
            renderer,
            registry: Arc::new(Mutex::new(registry)),
            confirm,
            generation: Arc::new(AtomicU64::new(0)),
            pending_refresh: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs `f` against the registry. The lock is never held across an await.
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut ElementRegistry) -> R) -> R {
        let mut guard = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn snapshot(&self) -> ElementRegistry {
        self.with_registry(|registry| registry.clone())
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.with_registry(|registry| registry.supports(feature))
    }

    /// Initial page load: history and statistics, fetched independently.
    pub async fn init(&self) {
        let history = async {
            if self.supports(Feature::History) {
                self.load_history().await;
            }
        };
        let stats = async {
            if self.supports(Feature::Statistics) {
                self.load_stats().await;
            }
        };
        tokio::join!(history, stats);
    }

    pub async fn dispatch(&self, event: UiEvent) {
        let feature = event.feature();
        if !self.supports(feature) {
            debug!("Ignoring {:?}: {:?} is not available on this page", event, feature);
            return;
        }

        match event {
            UiEvent::Submit => self.submit().await,
            UiEvent::ProviderChanged(value) => self.provider_changed(&value),
            UiEvent::SearchHistory => {
                let term = self.with_registry(|registry| {
                    registry.value(ElementId::HistorySearch).unwrap_or_default().to_string()
                });
                self.search_history(&term).await;
            }
            UiEvent::RefreshHistory => self.load_history().await,
            UiEvent::ViewConversation(id) => self.view_conversation(id).await,
            UiEvent::DeleteConversation(id) => self.delete_conversation(id).await,
            UiEvent::CloseModal => self.close_modal(),
            UiEvent::ModalClick { target } => {
                if target == ElementId::HistoryModal {
                    self.close_modal();
                }
            }
        }
    }

    /// Waits for the deferred history refresh scheduled by the last
    /// successful submission, if any.
    pub async fn settle(&self) {
        let pending = self.pending_refresh.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = pending {
            if let Err(e) = handle.await {
                info!("Deferred history refresh did not complete: {}", e);
            }
        }
    }
}
