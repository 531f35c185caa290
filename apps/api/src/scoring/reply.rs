//! Two-stage parser for the completion service's reply.
//!
//! Stage 1 parses the reply as the `{ "recommendation", "confidenceScore" }` object.
//! Stage 2 pulls the two fields out of malformed text with regular expressions.
//! If neither yields a recommendation, a placeholder with the default confidence is used.

use regex::Regex;
use serde_json::Value;

use crate::llm_client::strip_json_fences;

pub const PLACEHOLDER_RECOMMENDATION: &str =
    "Unable to extract a recommendation from the AI response.";
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// Reply was a well-formed JSON object.
    Strict,
    /// Fields were pattern-matched out of malformed text.
    Recovered,
    /// Nothing usable; placeholder values.
    Defaulted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub recommendation: String,
    /// Always within [0, 1].
    pub confidence_score: f64,
    pub stage: ParseStage,
}

pub struct ReplyParser {
    recommendation_pattern: Regex,
    confidence_pattern: Regex,
}

impl ReplyParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            recommendation_pattern: Regex::new(r#""recommendation"\s*:\s*"((?:[^"\\]|\\.)*)""#)?,
            confidence_pattern: Regex::new(
                r#""confidenceScore"\s*:\s*(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)"#,
            )?,
        })
    }

    pub fn parse(&self, text: &str) -> ParsedReply {
        self.parse_strict(text)
            .or_else(|| self.recover(text))
            .unwrap_or_else(|| ParsedReply {
                recommendation: PLACEHOLDER_RECOMMENDATION.to_string(),
                confidence_score: DEFAULT_CONFIDENCE,
                stage: ParseStage::Defaulted,
            })
    }

    fn parse_strict(&self, text: &str) -> Option<ParsedReply> {
        let value: Value = serde_json::from_str(strip_json_fences(text)).ok()?;
        let object = value.as_object()?;
        let recommendation = object.get("recommendation")?.as_str()?.to_string();
        let confidence_score = object
            .get("confidenceScore")
            .and_then(Value::as_f64)
            .map(clamp_unit)
            .unwrap_or(DEFAULT_CONFIDENCE);

        Some(ParsedReply {
            recommendation,
            confidence_score,
            stage: ParseStage::Strict,
        })
    }

    fn recover(&self, text: &str) -> Option<ParsedReply> {
        let raw = self.recommendation_pattern.captures(text)?.get(1)?.as_str();
        // The capture is still JSON-escaped; fall back to the raw text if it won't decode.
        let recommendation = serde_json::from_str::<String>(&format!("\"{raw}\""))
            .unwrap_or_else(|_| raw.to_string());

        let confidence_score = self
            .confidence_pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(clamp_unit)
            .unwrap_or(DEFAULT_CONFIDENCE);

        Some(ParsedReply {
            recommendation,
            confidence_score,
            stage: ParseStage::Recovered,
        })
    }
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        DEFAULT_CONFIDENCE
    }
}
