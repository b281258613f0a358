pub mod article;
pub mod dom_tree;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod page;
pub mod parse;
pub mod share;
pub mod summarize;

pub use article::{ArticleRecord, format_publish_date};
#[doc(hidden)]
pub use dom_tree::{DomContent, DomNode};
pub use dom_tree::{DomTree, NodeRef};
pub use error::{Result, ShareError};
pub use extract::{ContentExtractor, ContentTier, ExtractedContent, ExtractorConfig, ExtractorConfigBuilder};
pub use extract::{extract_article, extract_main_content};
pub use fetch::{FetchConfig, PageSource};
pub use fetch::{fetch_url, read_file, read_stdin};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_text, record_to_json};
pub use metadata::{Lookup, default_author_chain, default_date_chain, resolve_chain};
pub use page::{PageDocument, PageNode, normalize_whitespace};
pub use parse::{Document, Element};
pub use share::{ArticleShare, MIN_AUDIENCE_CHARS, MIN_CONTEXT_CHARS, SharedArticle};
pub use share::{extract_html, extract_html_with_url, prepare_request, share_text, validate_audience, validate_context};
#[doc(hidden)]
pub use summarize::{ScoredSentence, score_sentences, select_sentences, split_sentences, target_count};
pub use summarize::{
    Audience, BulletOrder, HeuristicSummarizer, Summarizer, SummarizerConfig, SummarizerConfigBuilder, SummaryRequest,
    summarize, summarize_with_config,
};
