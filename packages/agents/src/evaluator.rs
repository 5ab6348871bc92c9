// ABOUTME: Session evaluation through the language model
// ABOUTME: Parses JSON scores, clamps them, and substitutes static scores on any failure

use std::sync::Arc;

use realworlded_ai::{parse_json_reply, TextGenerator};
use realworlded_core::constants::MAX_SCORE;
use realworlded_core::{Mode, SessionContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::fallbacks;
use crate::persona::Persona;
use crate::prompts::{build_evaluation_prompt, ChatTurn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationSource {
    #[default]
    Model,
    Fallback,
}

impl EvaluationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationSource::Model => "model",
            EvaluationSource::Fallback => "fallback",
        }
    }
}

/// Scores and feedback for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub technical_score: Option<f64>,
    #[serde(default)]
    pub communication_score: Option<f64>,
    #[serde(default)]
    pub creativity_score: Option<f64>,
    #[serde(default)]
    pub business_sense_score: Option<f64>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub detailed_feedback: Option<String>,
    #[serde(default)]
    pub source: EvaluationSource,
    /// The model reply exactly as parsed, before clamping
    #[serde(skip)]
    pub raw: Value,
}

impl Evaluation {
    pub fn fallback(mode: Mode) -> Self {
        let scores = fallbacks::evaluation(mode);
        Self {
            technical_score: Some(scores.technical),
            communication_score: Some(scores.communication),
            creativity_score: Some(scores.creativity),
            business_sense_score: None,
            overall_score: Some(scores.overall),
            strengths: scores.strengths.iter().map(|s| s.to_string()).collect(),
            improvements: scores.improvements.iter().map(|s| s.to_string()).collect(),
            detailed_feedback: Some(scores.feedback.to_string()),
            source: EvaluationSource::Fallback,
            raw: Value::Null,
        }
        .normalized()
    }

    /// JSON stored alongside the report: the unmodified model reply tagged with its source.
    /// Fallback evaluations have no reply, so their own fields are stored instead.
    pub fn payload(&self) -> Value {
        let mut payload = match &self.raw {
            Value::Object(_) => self.raw.clone(),
            _ => serde_json::to_value(self).unwrap_or(Value::Null),
        };
        if let Value::Object(map) = &mut payload {
            map.insert("source".to_string(), Value::from(self.source.as_str()));
        }
        payload
    }

    /// Clamp every score into [0, MAX_SCORE] and default business sense to the technical score
    fn normalized(mut self) -> Self {
        let clamp = |score: Option<f64>| score.map(|s| s.clamp(0.0, MAX_SCORE));

        self.technical_score = clamp(self.technical_score);
        self.communication_score = clamp(self.communication_score);
        self.creativity_score = clamp(self.creativity_score);
        self.overall_score = clamp(self.overall_score);
        self.business_sense_score = clamp(self.business_sense_score.or(self.technical_score));
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.source == EvaluationSource::Fallback
    }
}

pub struct Evaluator {
    persona: Persona,
    generator: Arc<dyn TextGenerator>,
}

impl Evaluator {
    pub fn new(persona: Persona, generator: Arc<dyn TextGenerator>) -> Self {
        Self { persona, generator }
    }

    /// Score a full transcript. Never fails; falls back to static scores for the mode.
    pub async fn evaluate(&self, context: &SessionContext, transcript: &[ChatTurn]) -> Evaluation {
        let mode = context.mode;

        if !self.generator.is_available() {
            debug!("Evaluation running in demo mode");
            return Evaluation::fallback(mode);
        }

        let prompt = build_evaluation_prompt(&self.persona, context, transcript);
        let text = match self.generator.generate_text(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error in evaluation: {}", e);
                return Evaluation::fallback(mode);
            }
        };

        match parse_evaluation(&text) {
            Some(evaluation) => evaluation,
            None => Evaluation::fallback(mode),
        }
    }
}

/// Parse a model reply; replies without an overall score are rejected
fn parse_evaluation(text: &str) -> Option<Evaluation> {
    let raw: Value = parse_json_reply(text).ok()?;

    let mut evaluation: Evaluation = match serde_json::from_value(raw.clone()) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            error!("Evaluation reply has an unexpected shape: {}", e);
            return None;
        }
    };

    if evaluation.overall_score.is_none() {
        warn!("Evaluation reply has no overall_score");
        return None;
    }

    evaluation.source = EvaluationSource::Model;
    evaluation.raw = raw;
    Some(evaluation.normalized())
}
