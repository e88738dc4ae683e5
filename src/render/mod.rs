pub mod html;
pub mod markdown;

pub use self::html::escape_html;
pub use self::markdown::{ MarkdownEngine, MarkdownRenderer, PulldownEngine, RenderError };
