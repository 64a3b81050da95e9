//! Assessment data model: blueprints, questions, tests, responses and reports.
//!
//! JSON field names are camelCase to stay compatible with the client renderer and
//! the record store, which both consume these records verbatim.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

// ────────────────────────────────────────────────────────────────────────────
// Preferences extracted from free-text notes
// ────────────────────────────────────────────────────────────────────────────

/// Three-valued policy that shifts the difficulty of generated questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBias {
    Easy,
    #[default]
    Balanced,
    Hard,
}

/// Structured preferences detected in a hiring manager's note.
///
/// Fields of the wrong shape decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSignals {
    #[serde(deserialize_with = "lenient::or_default")]
    pub emphasize_problem_solving: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub include_system_design: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub heavy_on_coding: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub scenario_based: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub add_unit_tests: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub difficulty_bias: DifficultyBias,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub min_design_count: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Blueprint
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ", alias = "mcq")]
    Mcq,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "coding")]
    Coding,
    #[serde(rename = "scenario")]
    Scenario,
}

impl QuestionType {
    /// Canonical emission order used by the generator, independent of request order.
    pub const CANONICAL: [QuestionType; 4] = [
        QuestionType::Mcq,
        QuestionType::Short,
        QuestionType::Coding,
        QuestionType::Scenario,
    ];

    /// Lenient parse used for request payloads; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "mcq" => Some(QuestionType::Mcq),
            "short" => Some(QuestionType::Short),
            "coding" => Some(QuestionType::Coding),
            "scenario" => Some(QuestionType::Scenario),
            _ => None,
        }
    }
}

/// Compiled assessment plan. Immutable once compiled.
///
/// Clients send blueprints back verbatim, so decoding is lenient: null or wrongly
/// shaped fields take their defaults and unknown type names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blueprint {
    #[serde(deserialize_with = "lenient::string_opt")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub stack: Vec<String>,
    #[serde(deserialize_with = "lenient::string_opt")]
    pub experience: Option<String>,
    #[serde(deserialize_with = "lenient::question_types")]
    pub types: Vec<QuestionType>,
    /// Minutes.
    #[serde(deserialize_with = "lenient::u32_opt")]
    pub duration: Option<u32>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub nl_notes_parsed: PreferenceSignals,
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A literal input/output pair attached to a coding question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: Value,
    pub expected_output: Value,
}

/// Type-specific payload of a question, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    Mcq { options: Vec<String>, answer: usize },
    #[serde(rename = "short")]
    Short {
        #[serde(rename = "keyPoints")]
        key_points: Vec<String>,
    },
    #[serde(rename = "coding")]
    Coding {
        #[serde(rename = "starterCode")]
        starter_code: String,
        tests: Vec<TestCase>,
        #[serde(rename = "evaluatorHint")]
        evaluator_hint: String,
    },
    #[serde(rename = "scenario")]
    Scenario { rubric: Vec<String> },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Mcq { .. } => QuestionType::Mcq,
            QuestionKind::Short { .. } => QuestionType::Short,
            QuestionKind::Coding { .. } => QuestionType::Coding,
            QuestionKind::Scenario { .. } => QuestionType::Scenario,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub skill: String,
    pub difficulty: Difficulty,
    /// Estimated minutes.
    pub time: u32,
    pub prompt: String,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: String,
    pub blueprint: Blueprint,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Test {
    /// Sum of per-question time estimates, in minutes.
    pub fn total_time(&self) -> u32 {
        self.questions.iter().map(|q| q.time).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────

/// A candidate's answer to one question.
///
/// Deserialization never fails: fields of the wrong shape are dropped, so a
/// malformed answer is scored as unanswered rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Answer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[cfg(test)]
impl Answer {
    pub fn choice(choice: i64) -> Self {
        Self {
            choice: Some(choice),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

impl From<Value> for Answer {
    fn from(value: Value) -> Self {
        let field_str = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Answer {
            choice: value.get("choice").and_then(integral),
            text: field_str("text"),
            code: field_str("code"),
        }
    }
}

/// An integer, or a float with no fractional part (`1.0` is option 1).
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Question id → answer. Missing entries count as unanswered.
pub type Responses = HashMap<String, Answer>;

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTally {
    pub correct: u32,
    pub total: u32,
}

impl SkillTally {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Remediation note for one incorrectly answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub question_id: String,
    pub need: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub overall_score: u32, // 0 – 100
    pub per_skill: BTreeMap<String, SkillTally>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
}
