//! Response Evaluator: scores a candidate's answers against a generated test.
//!
//! Algorithm:
//! 1. For each question in test order, look up the answer by question id
//!    (missing → incorrect, never an error)
//! 2. Score per type:
//!    - MCQ: chosen index equals the answer index
//!    - short / scenario: first token of each key point / rubric criterion found in the
//!      text; correct when at least ceil(50%) of points match
//!    - coding: delegated to the `CodeJudge`
//! 3. Tally correct/total per skill; overall = round(100 × correct / total)
//! 4. Classify skills: strength (ratio ≥ 0.7), weakness (ratio < 0.5)
//! 5. Emit a finding per incorrect question and recommendations in fixed priority order

use std::collections::BTreeMap;

use tracing::debug;

use crate::assessment::judge::CodeJudge;
use crate::assessment::templates::SYSTEM_DESIGN_SKILL;
use crate::models::assessment::{
    Answer, Finding, Question, QuestionKind, Report, Responses, SkillTally, Test,
};

const STRENGTH_THRESHOLD: f64 = 0.7;
const WEAKNESS_THRESHOLD: f64 = 0.5;
const COVERAGE_FRACTION: f64 = 0.5;

const MCQ_NEED: &str = "Review the fundamentals behind this question.";
const CODING_NEED: &str = "Normalize the input by stripping non-alphanumeric characters, \
     fold case, then compare the string against its reversal.";

pub const SYSTEM_DESIGN_RECOMMENDATION: &str = "Practice system design: scalability, data \
     modeling, caching, queueing, failure handling and observability.";
pub const DRILL_RECOMMENDATION: &str =
    "Drill the weak skills with targeted exercises before the next round.";
pub const ADVANCED_RECOMMENDATION: &str =
    "Offer advanced practice or mentoring opportunities in the strong skills.";

/// Outcome of scoring a single question.
struct Verdict {
    correct: bool,
    /// Key points / rubric criteria not matched (short and scenario only).
    missed: Vec<String>,
}

impl Verdict {
    fn from_bool(correct: bool) -> Self {
        Self {
            correct,
            missed: Vec::new(),
        }
    }
}

/// Evaluates responses for a test and builds the report. Never fails.
pub fn evaluate(test: &Test, responses: &Responses, judge: &dyn CodeJudge) -> Report {
    let mut per_skill: BTreeMap<String, SkillTally> = BTreeMap::new();
    let mut findings = Vec::new();
    let mut total_correct = 0_u32;

    for question in &test.questions {
        let verdict = score_question(question, responses.get(&question.id), judge);

        let tally = per_skill.entry(question.skill.clone()).or_default();
        tally.total += 1;
        if verdict.correct {
            tally.correct += 1;
            total_correct += 1;
        } else {
            findings.push(Finding {
                question_id: question.id.clone(),
                need: remediation(&question.kind, &verdict),
            });
        }
    }

    let total_questions = test.questions.len() as u32;
    let overall_score = if total_questions > 0 {
        (100.0 * total_correct as f64 / total_questions as f64).round() as u32
    } else {
        0
    };

    let strengths: Vec<String> = per_skill
        .iter()
        .filter(|(_, t)| t.ratio() >= STRENGTH_THRESHOLD)
        .map(|(skill, _)| skill.clone())
        .collect();
    let weaknesses: Vec<String> = per_skill
        .iter()
        .filter(|(_, t)| t.ratio() < WEAKNESS_THRESHOLD)
        .map(|(skill, _)| skill.clone())
        .collect();

    let recommendations = build_recommendations(&strengths, &weaknesses);

    debug!(
        "Evaluated test {}: {total_correct}/{total_questions} correct, judge={}",
        test.id,
        judge.name()
    );

    Report {
        overall_score,
        per_skill,
        strengths,
        weaknesses,
        findings,
        recommendations,
    }
}

fn score_question(question: &Question, answer: Option<&Answer>, judge: &dyn CodeJudge) -> Verdict {
    let Some(answer) = answer else {
        return match &question.kind {
            QuestionKind::Short { key_points: points } | QuestionKind::Scenario { rubric: points } => {
                Verdict {
                    correct: false,
                    missed: points.clone(),
                }
            }
            _ => Verdict::from_bool(false),
        };
    };

    match &question.kind {
        QuestionKind::Mcq { answer: expected, .. } => Verdict::from_bool(
            answer
                .choice
                .and_then(|c| usize::try_from(c).ok())
                .is_some_and(|c| c == *expected),
        ),
        QuestionKind::Short { key_points: points } | QuestionKind::Scenario { rubric: points } => {
            score_coverage(points, answer.text.as_deref().unwrap_or(""))
        }
        QuestionKind::Coding { tests, .. } => Verdict::from_bool(
            answer
                .code
                .as_deref()
                .is_some_and(|code| judge.judge(code, tests)),
        ),
    }
}

/// Only the first whitespace-delimited token of each point is checked, so points sharing
/// a leading word are all satisfied by that one word.
fn score_coverage(points: &[String], text: &str) -> Verdict {
    let text = text.to_lowercase();
    let mut matched = 0_usize;
    let mut missed = Vec::new();

    for point in points {
        let hit = point
            .split_whitespace()
            .next()
            .map(|token| text.contains(&token.to_lowercase()))
            .unwrap_or(false);
        if hit {
            matched += 1;
        } else {
            missed.push(point.clone());
        }
    }

    let required = (COVERAGE_FRACTION * points.len() as f64).ceil() as usize;
    Verdict {
        correct: matched >= required,
        missed,
    }
}

fn remediation(kind: &QuestionKind, verdict: &Verdict) -> String {
    match kind {
        QuestionKind::Mcq { .. } => MCQ_NEED.to_string(),
        QuestionKind::Short { .. } => {
            format!("Cover the missed key points: {}.", verdict.missed.join("; "))
        }
        QuestionKind::Scenario { .. } => {
            format!("Address the missed rubric criteria: {}.", verdict.missed.join("; "))
        }
        QuestionKind::Coding { .. } => CODING_NEED.to_string(),
    }
}

/// Conditions are independent; each that holds appends its message, in this order.
fn build_recommendations(strengths: &[String], weaknesses: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if weaknesses.iter().any(|s| s == SYSTEM_DESIGN_SKILL) {
        recommendations.push(SYSTEM_DESIGN_RECOMMENDATION.to_string());
    }
    if !weaknesses.is_empty() {
        recommendations.push(DRILL_RECOMMENDATION.to_string());
    }
    if !strengths.is_empty() {
        recommendations.push(ADVANCED_RECOMMENDATION.to_string());
    }
    recommendations
}
