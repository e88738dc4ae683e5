use log::error;
use pulldown_cmark::{ html, Event, Options, Parser };
use std::sync::Arc;
use thiserror::Error;

use crate::config::MarkdownOptions;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Markdown conversion failed: {0}")]
    Conversion(String),
}

pub trait MarkdownEngine: Send + Sync {
    fn to_html(&self, text: &str) -> Result<String, RenderError>;
}

/// CommonMark engine configured once from [`MarkdownOptions`].
pub struct PulldownEngine {
    options: Options,
    breaks: bool,
    sanitize: bool,
}

impl PulldownEngine {
    pub fn new(markdown: MarkdownOptions) -> Self {
        let mut options = Options::empty();
        if markdown.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        Self {
            options,
            breaks: markdown.breaks,
            sanitize: markdown.sanitize,
        }
    }
}

impl MarkdownEngine for PulldownEngine {
    fn to_html(&self, text: &str) -> Result<String, RenderError> {
        let breaks = self.breaks;
        let sanitize = self.sanitize;
        let events = Parser::new_ext(text, self.options).map(move |event| match event {
            Event::SoftBreak if breaks => Event::HardBreak,
            Event::Html(raw) if sanitize => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        Ok(out)
    }
}

/// Markdown to HTML that never fails the surrounding render: on engine
/// failure the raw text is returned.
#[derive(Clone)]
pub struct MarkdownRenderer {
    engine: Arc<dyn MarkdownEngine>,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self::with_engine(Arc::new(PulldownEngine::new(options)))
    }

    pub fn with_engine(engine: Arc<dyn MarkdownEngine>) -> Self {
        Self { engine }
    }

    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.engine.to_html(text) {
            Ok(html) => html,
            Err(e) => {
                error!("Markdown rendering error: {}", e);
                text.to_string()
            }
        }
    }
}
