//! tinted - incremental lexical highlighting for editor components
//!
//! Classifies source text into keywords, string literals, comments and
//! numbers, and hands the result back as sorted, non-overlapping spans.
//!
//! ```
//! use tinted::{Category, HighlightSession, Highlighter, Span};
//!
//! let mut session = HighlightSession::new(Highlighter::builtin());
//! let spans = session.update("x = 42 # answer");
//! assert_eq!(spans.spans()[0], Span::new(4, 6, Category::Number));
//! ```

mod category;
mod config;
mod error;
mod highlighter;
mod resolver;
mod rules;
mod session;
mod span;
mod style;
mod table;
mod tokenizer;
mod worker;

pub mod render;

pub use category::Category;
pub use config::HighlightConfig;
pub use error::{HighlightError, Result};
pub use highlighter::Highlighter;
pub use resolver::resolve;
pub use rules::{Rule, PYTHON_KEYWORDS, TOKEN_GROUP};
pub use session::{content_hash, HighlightSession, SnapshotMarker};
pub use span::{AnnotationSet, Span};
pub use style::{Color, Style, StyleMap};
pub use table::{Pattern, PatternTable};
pub use tokenizer::scan;
pub use worker::{spawn_worker, HighlightRender, HighlightRequest, HighlightWorker};
