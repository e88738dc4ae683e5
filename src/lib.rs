pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod events;
pub mod models;
pub mod render;
pub mod ui;

use app::AssistantApp;
use api::HttpTransport;
use cli::{ Args, Command };
use cli::output::{ format_display_area, format_regions };
use config::ClientConfig;
use events::UiEvent;
use log::info;
use std::error::Error;
use std::sync::Arc;
use ui::{ AutoConfirm, Confirm, ElementId, ElementRegistry, StdinConfirm };

const STATS_REGIONS: [ElementId; 5] = [
    ElementId::TotalConversations,
    ElementId::SuccessfulConversations,
    ElementId::SuccessRate,
    ElementId::TodayConversations,
    ElementId::ProviderStats,
];

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = ClientConfig::from_args(&args)?;

    info!("--- Client Configuration ---");
    info!("Backend URL: {}", config.base_url);
    info!("Request Timeout: {:?}", config.timeout);
    info!("History Refresh Delay: {:?}", config.history_refresh_delay);
    info!("Default Groq Model: {}", config.default_groq_model);
    info!(
        "Markdown: breaks={}, gfm={}, sanitize={}",
        config.markdown.breaks,
        config.markdown.gfm,
        config.markdown.sanitize
    );
    info!("----------------------------");

    let transport = Arc::new(HttpTransport::new(&config.base_url, config.timeout)?);
    let confirm: Arc<dyn Confirm> = match &args.command {
        Command::Delete { yes: true, .. } => Arc::new(AutoConfirm(true)),
        _ => Arc::new(StdinConfirm),
    };
    let default_model = config.default_groq_model.clone();
    let app = AssistantApp::new(config, transport, ElementRegistry::standard(), confirm);

    let output = match args.command {
        Command::Ask { prompt, provider, model } => {
            app.with_registry(|registry| {
                registry.set_value(ElementId::QueryInput, prompt);
                registry.set_value(ElementId::GroqModel, model.unwrap_or(default_model));
            });
            app.dispatch(UiEvent::ProviderChanged(provider)).await;
            app.dispatch(UiEvent::Submit).await;
            format_display_area(&app.snapshot())
        }
        Command::History => {
            app.dispatch(UiEvent::RefreshHistory).await;
            format_regions(&app.snapshot(), &[ElementId::HistoryList])
        }
        Command::Search { term } => {
            app.with_registry(|registry| registry.set_value(ElementId::HistorySearch, term));
            app.dispatch(UiEvent::SearchHistory).await;
            format_regions(&app.snapshot(), &[ElementId::HistoryList])
        }
        Command::Show { id } => {
            app.dispatch(UiEvent::ViewConversation(id)).await;
            format_display_area(&app.snapshot())
        }
        Command::Delete { id, .. } => {
            app.dispatch(UiEvent::DeleteConversation(id)).await;
            let page = app.snapshot();
            format!("{}{}", format_display_area(&page), format_regions(&page, &[ElementId::HistoryList]))
        }
        Command::Stats => {
            app.load_stats().await;
            format_regions(&app.snapshot(), &STATS_REGIONS)
        }
    };

    print!("{}", output);
    Ok(())
}
