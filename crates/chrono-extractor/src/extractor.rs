//! Core ScheduleExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::PipelineError;
use crate::parser::parse_extraction_response;
use crate::prompt::RequestBuilder;
use crate::types::{ExtractionMetadata, ExtractionResult};
use chrono::Utc;
use chrono_domain::ScheduleItem;
use chrono_llm::CompletionProvider;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns free-form schedule text into schedule items
///
/// Holds no state between calls besides its configuration. Each call makes
/// exactly one provider request.
pub struct ScheduleExtractor<P>
where
    P: CompletionProvider,
{
    provider: P,
    builder: RequestBuilder,
    config: ExtractorConfig,
}

impl<P> ScheduleExtractor<P>
where
    P: CompletionProvider,
{
    /// Create a new extractor, validating the configuration
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        Ok(Self {
            provider,
            builder: RequestBuilder::from_config(&config),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Extract items, returning decode failures and run metadata alongside
    pub async fn extract(&self, input: &str) -> Result<ExtractionResult, PipelineError> {
        let input_length = input.chars().count();

        if input.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        if input_length > self.config.max_input_length {
            return Err(PipelineError::InputTooLong(
                input_length,
                self.config.max_input_length,
            ));
        }

        let started_at = Utc::now();
        let clock = Instant::now();

        info!(
            "Starting extraction with model '{}', input length {}",
            self.config.model, input_length
        );

        let request = self.builder.build(input);

        let request_timeout = self.config.request_timeout();
        let completion = timeout(request_timeout, self.provider.complete(&request))
            .await
            .map_err(|_| PipelineError::Timeout(request_timeout))??;

        debug!("Completion length: {} chars", completion.len());

        let parsed = parse_extraction_response(&completion)?;

        if parsed.is_total_failure() {
            warn!(
                "None of the {} returned items could be decoded",
                parsed.failures.len()
            );
        }

        let metadata = ExtractionMetadata {
            model_name: self.config.model.clone(),
            started_at,
            input_length,
            total_items_attempted: parsed.items.len() + parsed.failures.len(),
            processing_time_ms: clock.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} items, {} failed in {}ms",
            parsed.items.len(),
            parsed.failures.len(),
            metadata.processing_time_ms
        );

        Ok(ExtractionResult {
            items: parsed.items,
            failures: parsed.failures,
            metadata,
        })
    }

    /// Extract items from `input`
    ///
    /// Items that fail to decode are logged and left out.
    pub async fn extract_schedule(&self, input: &str) -> Result<Vec<ScheduleItem>, PipelineError> {
        self.extract(input).await.map(|result| result.items)
    }
}
