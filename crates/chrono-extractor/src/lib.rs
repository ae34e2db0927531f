//! Chrono Extractor
//!
//! Converts free-form schedule text into calendar events and tasks using an
//! LLM completion provider.
//!
//! # Overview
//!
//! The caller's text is wrapped in a fixed instruction prompt, sent to the
//! provider once, and the completion is mined for a `{"items": [...]}`
//! object. Each element decodes independently: a bad element is recorded as
//! a [`DecodeFailure`] and the rest of the batch still comes back.
//!
//! # Architecture
//!
//! ```text
//! Text → RequestBuilder → CompletionProvider → extract_json → parse → decode_item
//!                                                                        ↓
//!                                      CalendarStore / ReminderStore ← dispatch_items
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use chrono_extractor::{ExtractorConfig, ScheduleExtractor};
//! use chrono_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"items": [{"type": "task", "title": "Call mom"}]}"#);
//! let extractor = ScheduleExtractor::new(provider, ExtractorConfig::default())?;
//!
//! let items = extractor.extract_schedule("Remind me to call mom").await?;
//! for item in &items {
//!     println!("{} ({})", item.title, item.kind);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod decoder;
mod dispatch;
mod error;
mod extract;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use decoder::{decode_item, parse_date, EVENT_TAG};
pub use dispatch::dispatch_items;
pub use error::{DecodeFailure, ExtractError, ParseError, PipelineError};
pub use extract::extract_json;
pub use extractor::ScheduleExtractor;
pub use parser::parse_extraction_response;
pub use prompt::{RequestBuilder, DEFAULT_MODEL, DEFAULT_TEMPERATURE, SYSTEM_INSTRUCTIONS};
pub use types::{
    DispatchFailure, DispatchSummary, ExtractionMetadata, ExtractionResult, ParsedSchedule,
    SkipReason, SkippedItem,
};
