//! Constraint Extractor: detects preference signals in a free-text hiring note.
//!
//! Table-driven: each boolean signal is one row of `FLAG_RULES`. Adding a signal means
//! adding a row and a `Flag` variant, nothing downstream changes shape.
//! Matching runs against the lower-cased note; there is no language understanding here.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::assessment::{DifficultyBias, PreferenceSignals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    EmphasizeProblemSolving,
    IncludeSystemDesign,
    HeavyOnCoding,
    ScenarioBased,
    AddUnitTests,
}

impl Flag {
    fn set(self, signals: &mut PreferenceSignals) {
        match self {
            Flag::EmphasizeProblemSolving => signals.emphasize_problem_solving = true,
            Flag::IncludeSystemDesign => signals.include_system_design = true,
            Flag::HeavyOnCoding => signals.heavy_on_coding = true,
            Flag::ScenarioBased => signals.scenario_based = true,
            Flag::AddUnitTests => signals.add_unit_tests = true,
        }
    }
}

const FLAG_RULES: &[(Flag, &str)] = &[
    (
        Flag::EmphasizeProblemSolving,
        r"problem[ -]solving|dsa|algorithms",
    ),
    (Flag::IncludeSystemDesign, r"system\s*design"),
    (Flag::HeavyOnCoding, r"heavy.*coding|coding[\s-]*heavy"),
    (Flag::ScenarioBased, r"scenario|case\s+study|situational"),
    (Flag::AddUnitTests, r"unit test|test case"),
];

/// Checked in order; the first matching row wins, so `hard` takes precedence.
const BIAS_RULES: &[(DifficultyBias, &str)] = &[
    (DifficultyBias::Hard, r"hard|advanced"),
    (DifficultyBias::Easy, r"easy|beginner"),
];

const MIN_DESIGN_PATTERN: &str = r"at\s+least\s+(\d+)\s+(?:system\s*)?design";

struct CompiledRules {
    flags: Vec<(Flag, Regex)>,
    bias: Vec<(DifficultyBias, Regex)>,
    min_design: Option<Regex>,
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping signal pattern {pattern:?}: {e}");
            None
        }
    }
}

fn rules() -> &'static CompiledRules {
    static RULES: OnceLock<CompiledRules> = OnceLock::new();
    RULES.get_or_init(|| CompiledRules {
        flags: FLAG_RULES
            .iter()
            .filter_map(|(flag, pattern)| compile(pattern).map(|re| (*flag, re)))
            .collect(),
        bias: BIAS_RULES
            .iter()
            .filter_map(|(bias, pattern)| compile(pattern).map(|re| (*bias, re)))
            .collect(),
        min_design: compile(MIN_DESIGN_PATTERN),
    })
}

/// Extracts `PreferenceSignals` from a hiring note. Never fails.
///
/// `None` or blank text yields the all-default record (no flags, balanced, 0 designs).
pub fn extract(notes: Option<&str>) -> PreferenceSignals {
    let mut signals = PreferenceSignals::default();

    let text = match notes.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return signals,
    };

    let rules = rules();

    for (flag, re) in &rules.flags {
        if re.is_match(&text) {
            flag.set(&mut signals);
        }
    }

    signals.difficulty_bias = rules
        .bias
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map(|(bias, _)| *bias)
        .unwrap_or_default();

    signals.min_design_count = rules
        .min_design
        .as_ref()
        .and_then(|re| re.captures(&text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    debug!("Extracted preference signals: {signals:?}");
    signals
}
