//! Provider request construction for schedule extraction

use crate::config::ExtractorConfig;
use chrono_llm::{ChatMessage, ExtractionRequest};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Builds provider requests from caller text
///
/// The system message is always [`SYSTEM_INSTRUCTIONS`]; the caller's text
/// only ever goes into the user message.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    temperature: f64,
}

impl RequestBuilder {
    /// Create a builder for the given model and temperature
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }

    /// Create a builder from extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.model.clone(), config.temperature)
    }

    /// Build the request for `input`
    ///
    /// Any text is accepted, including the empty string.
    pub fn build(&self, input: &str) -> ExtractionRequest {
        ExtractionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTIONS),
                ChatMessage::user(input),
            ],
            temperature: self.temperature,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE)
    }
}

/// Fixed instructions sent as the system message of every request
pub const SYSTEM_INSTRUCTIONS: &str = r#"Parse the user's schedule description into structured events and tasks.
For each item, determine if it's an event (with start/end time) or a task (with optional due date).
Write every date as an ISO 8601 date-time with a UTC offset, for example 2025-05-14T10:00:00Z or 2025-05-14T10:00:00-07:00.
Respond in JSON format like this:
{
  "items": [
    {
      "type": "event",
      "title": "Meeting with John",
      "startDate": "2025-05-14T10:00:00Z",
      "endDate": "2025-05-14T11:00:00Z",
      "notes": "Discuss project timeline"
    },
    {
      "type": "task",
      "title": "Buy groceries",
      "dueDate": "2025-05-14T18:00:00Z",
      "notes": "Milk, eggs, bread"
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_llm::Role;

    #[test]
    fn test_request_has_system_then_user() {
        let request = RequestBuilder::default().build("Gym at 7am");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[0].content, SYSTEM_INSTRUCTIONS);
        assert_eq!(request.messages[1].content, "Gym at 7am");
    }

    #[test]
    fn test_input_embedded_verbatim() {
        let input = "  Lunch {with} \"Sam\"\n at noon  ";
        let request = RequestBuilder::default().build(input);
        assert_eq!(request.user_content(), Some(input));
    }

    #[test]
    fn test_empty_input_is_accepted() {
        let request = RequestBuilder::default().build("");
        assert_eq!(request.user_content(), Some(""));
        assert_eq!(request.system_content(), Some(SYSTEM_INSTRUCTIONS));
    }

    #[test]
    fn test_system_content_does_not_depend_on_input() {
        let builder = RequestBuilder::default();
        let a = builder.build("Dentist on Friday");
        let b = builder.build("Call mom, pay rent");

        assert_eq!(a.system_content(), b.system_content());
        assert!(!a.system_content().unwrap().contains("Dentist"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = RequestBuilder::default();
        assert_eq!(builder.build("same"), builder.build("same"));
    }

    #[test]
    fn test_model_and_temperature() {
        let request = RequestBuilder::default().build("x");
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);

        let mut config = ExtractorConfig::default();
        config.model = "gpt-4o-mini".to_string();
        config.temperature = 0.0;
        let request = RequestBuilder::from_config(&config).build("x");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.0);
    }

    #[test]
    fn test_instructions_describe_expected_shape() {
        assert!(SYSTEM_INSTRUCTIONS.contains(r#""items""#));
        assert!(SYSTEM_INSTRUCTIONS.contains(r#""type": "event""#));
        assert!(SYSTEM_INSTRUCTIONS.contains(r#""type": "task""#));
        assert!(SYSTEM_INSTRUCTIONS.contains("startDate"));
        assert!(SYSTEM_INSTRUCTIONS.contains("endDate"));
        assert!(SYSTEM_INSTRUCTIONS.contains("dueDate"));
    }

    #[test]
    fn test_worked_example_decodes() {
        let parsed = crate::parser::parse_extraction_response(SYSTEM_INSTRUCTIONS).unwrap();

        assert_eq!(parsed.items.len(), 2);
        assert!(parsed.failures.is_empty());
        assert!(parsed.items[0].is_schedulable());
        assert!(parsed.items[1].due_date().is_some());
    }
}
