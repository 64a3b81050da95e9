//! Question Generator: expands a blueprint into an ordered, tagged question set.
//!
//! Deterministic: no randomness, no I/O. Emission order fixes the ids:
//! 1. every skill in stack order × every requested type in canonical order
//!    (MCQ, short, coding, scenario)
//! 2. system-design scenarios, if the notes asked for them
//!
//! Ids are `Q1, Q2, …` in that order.

use tracing::{debug, warn};

use crate::assessment::templates::{self, SYSTEM_DESIGN_SKILL};
use crate::models::assessment::{
    Blueprint, Difficulty, DifficultyBias, Question, QuestionKind, QuestionType,
};

pub const DEFAULT_SKILL: &str = "general";

/// Ceiling on appended system-design scenarios; larger requests are clamped.
pub const MAX_SYSTEM_DESIGN_QUESTIONS: u32 = 10;

/// Difficulty policy: coding questions carry the bias, everything else trails it.
pub fn pick_difficulty(ty: QuestionType, bias: DifficultyBias) -> Difficulty {
    match (bias, ty) {
        (DifficultyBias::Hard, QuestionType::Coding) => Difficulty::Hard,
        (DifficultyBias::Hard, _) => Difficulty::Medium,
        (DifficultyBias::Easy, _) => Difficulty::Easy,
        (DifficultyBias::Balanced, QuestionType::Coding) => Difficulty::Medium,
        (DifficultyBias::Balanced, _) => Difficulty::Easy,
    }
}

/// Number of extra system-design scenarios the blueprint asks for, at most
/// `MAX_SYSTEM_DESIGN_QUESTIONS`.
pub fn system_design_count(blueprint: &Blueprint) -> u32 {
    let signals = &blueprint.nl_notes_parsed;
    if !signals.include_system_design && signals.min_design_count == 0 {
        return 0;
    }
    let requested = signals.min_design_count.max(1);
    if requested > MAX_SYSTEM_DESIGN_QUESTIONS {
        warn!(
            "Requested {} system design questions, clamping to {}",
            requested, MAX_SYSTEM_DESIGN_QUESTIONS
        );
        return MAX_SYSTEM_DESIGN_QUESTIONS;
    }
    requested
}

/// Generates the question set for a blueprint.
pub fn generate(blueprint: &Blueprint) -> Vec<Question> {
    let default_skills = [DEFAULT_SKILL.to_string()];
    let skills: &[String] = if blueprint.stack.is_empty() {
        &default_skills
    } else {
        &blueprint.stack
    };

    let types: Vec<QuestionType> = QuestionType::CANONICAL
        .into_iter()
        .filter(|ty| blueprint.types.is_empty() || blueprint.types.contains(ty))
        .collect();

    let signals = &blueprint.nl_notes_parsed;
    let mut questions = Vec::new();

    for skill in skills {
        for &ty in &types {
            let (prompt, kind, time) = match ty {
                QuestionType::Mcq => with_time(templates::mcq(skill), templates::MCQ_TIME),
                QuestionType::Short => with_time(templates::short(skill), templates::SHORT_TIME),
                QuestionType::Coding => with_time(
                    templates::coding(skill, signals.add_unit_tests),
                    templates::CODING_TIME,
                ),
                QuestionType::Scenario => {
                    with_time(templates::scenario(skill), templates::SCENARIO_TIME)
                }
            };
            push_question(
                &mut questions,
                kind,
                skill,
                pick_difficulty(ty, signals.difficulty_bias),
                time,
                prompt,
            );
        }
    }

    for _ in 0..system_design_count(blueprint) {
        let (prompt, kind) = templates::system_design(blueprint.role.as_deref());
        push_question(
            &mut questions,
            kind,
            SYSTEM_DESIGN_SKILL,
            Difficulty::Hard,
            templates::SYSTEM_DESIGN_TIME,
            prompt,
        );
    }

    debug!(
        "Generated {} questions for {} skills",
        questions.len(),
        skills.len()
    );
    questions
}

fn with_time((prompt, kind): (String, QuestionKind), time: u32) -> (String, QuestionKind, u32) {
    (prompt, kind, time)
}

fn push_question(
    questions: &mut Vec<Question>,
    kind: QuestionKind,
    skill: &str,
    difficulty: Difficulty,
    time: u32,
    prompt: String,
) {
    let id = format!("Q{}", questions.len() + 1);
    questions.push(Question {
        id,
        kind,
        skill: skill.to_string(),
        difficulty,
        time,
        prompt,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::PreferenceSignals;

    fn blueprint(stack: &[&str], types: &[QuestionType], signals: PreferenceSignals) -> Blueprint {
        Blueprint {
            role: Some("Frontend Engineer".to_string()),
            stack: stack.iter().map(|s| s.to_string()).collect(),
            experience: None,
            types: types.to_vec(),
            duration: None,
            nl_notes_parsed: signals,
        }
    }

    #[test]
    fn test_defaults_produce_four_general_questions() {
        let questions = generate(&Blueprint::default());
        assert_eq!(questions.len(), 4);
        assert!(questions.iter().all(|q| q.skill == DEFAULT_SKILL));
        let types: Vec<QuestionType> = questions.iter().map(Question::question_type).collect();
        assert_eq!(types, QuestionType::CANONICAL.to_vec());
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let bp = blueprint(
            &["Rust", "SQL"],
            &[QuestionType::Coding, QuestionType::Mcq],
            PreferenceSignals {
                include_system_design: true,
                difficulty_bias: DifficultyBias::Hard,
                ..PreferenceSignals::default()
            },
        );
        assert_eq!(generate(&bp), generate(&bp));
    }

    #[test]
    fn test_every_skill_type_pair_is_covered() {
        let stack = ["Rust", "Kafka", "Postgres"];
        let types = [QuestionType::Scenario, QuestionType::Short];
        let questions = generate(&blueprint(&stack, &types, PreferenceSignals::default()));

        assert_eq!(questions.len(), stack.len() * types.len());
        for skill in stack {
            for ty in types {
                assert!(
                    questions
                        .iter()
                        .any(|q| q.skill == skill && q.question_type() == ty),
                    "missing {skill} / {ty:?}"
                );
            }
        }
    }

    #[test]
    fn test_types_follow_canonical_order_not_request_order() {
        let questions = generate(&blueprint(
            &["Go"],
            &[QuestionType::Scenario, QuestionType::Coding, QuestionType::Mcq],
            PreferenceSignals::default(),
        ));
        let types: Vec<QuestionType> = questions.iter().map(Question::question_type).collect();
        assert_eq!(
            types,
            vec![QuestionType::Mcq, QuestionType::Coding, QuestionType::Scenario]
        );
    }

    #[test]
    fn test_min_design_count_two_appends_two_design_scenarios() {
        let questions = generate(&blueprint(
            &["React"],
            &[QuestionType::Mcq],
            PreferenceSignals {
                min_design_count: 2,
                ..PreferenceSignals::default()
            },
        ));

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].question_type(), QuestionType::Mcq);
        assert_eq!(questions[0].skill, "React");

        let design: Vec<&Question> = questions
            .iter()
            .filter(|q| q.skill == SYSTEM_DESIGN_SKILL)
            .collect();
        assert_eq!(design.len(), 2);
        for q in &design {
            assert_eq!(q.question_type(), QuestionType::Scenario);
            assert_eq!(q.difficulty, Difficulty::Hard);
            assert_eq!(q.time, 15);
            assert!(q.prompt.contains("Frontend Engineer"));
            match &q.kind {
                QuestionKind::Scenario { rubric } => assert_eq!(rubric.len(), 6),
                other => panic!("unexpected kind {other:?}"),
            }
        }

        let total_time: u32 = questions.iter().map(|q| q.time).sum();
        assert_eq!(total_time, 32);
        assert_eq!(questions[2].id, "Q3");
    }

    #[test]
    fn test_include_system_design_without_count_appends_one() {
        let bp = blueprint(
            &[],
            &[QuestionType::Short],
            PreferenceSignals {
                include_system_design: true,
                ..PreferenceSignals::default()
            },
        );
        assert_eq!(system_design_count(&bp), 1);
        let questions = generate(&bp);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].skill, SYSTEM_DESIGN_SKILL);
    }

    #[test]
    fn test_design_count_is_clamped_at_ceiling() {
        let with_count = |min_design_count| {
            blueprint(
                &["React"],
                &[QuestionType::Mcq],
                PreferenceSignals {
                    min_design_count,
                    ..PreferenceSignals::default()
                },
            )
        };

        assert_eq!(
            system_design_count(&with_count(MAX_SYSTEM_DESIGN_QUESTIONS)),
            MAX_SYSTEM_DESIGN_QUESTIONS
        );
        assert_eq!(
            system_design_count(&with_count(MAX_SYSTEM_DESIGN_QUESTIONS + 1)),
            MAX_SYSTEM_DESIGN_QUESTIONS
        );

        let questions = generate(&with_count(u32::MAX));
        assert_eq!(questions.len(), 1 + MAX_SYSTEM_DESIGN_QUESTIONS as usize);
        assert_eq!(questions.last().map(|q| q.id.as_str()), Some("Q11"));
    }

    #[test]
    fn test_no_design_trigger_appends_nothing() {
        assert_eq!(system_design_count(&Blueprint::default()), 0);
    }

    #[test]
    fn test_difficulty_policy_table() {
        use DifficultyBias::*;
        use QuestionType::*;

        assert_eq!(pick_difficulty(Coding, Hard), Difficulty::Hard);
        assert_eq!(pick_difficulty(Mcq, Hard), Difficulty::Medium);
        assert_eq!(pick_difficulty(Scenario, Hard), Difficulty::Medium);
        assert_eq!(pick_difficulty(Coding, Easy), Difficulty::Easy);
        assert_eq!(pick_difficulty(Short, Easy), Difficulty::Easy);
        assert_eq!(pick_difficulty(Coding, Balanced), Difficulty::Medium);
        assert_eq!(pick_difficulty(Short, Balanced), Difficulty::Easy);
    }

    #[test]
    fn test_template_shapes_and_times() {
        let questions = generate(&blueprint(&["Python"], &[], PreferenceSignals::default()));
        for q in &questions {
            match &q.kind {
                QuestionKind::Mcq { options, answer } => {
                    assert_eq!(q.time, 2);
                    assert_eq!(options.len(), 4);
                    assert!(*answer < options.len());
                }
                QuestionKind::Short { key_points } => {
                    assert_eq!(q.time, 3);
                    assert_eq!(key_points.len(), 3);
                }
                QuestionKind::Coding {
                    starter_code,
                    tests,
                    ..
                } => {
                    assert_eq!(q.time, 10);
                    assert!(!starter_code.is_empty());
                    assert_eq!(tests.len(), 2);
                    assert!(q.prompt.contains("Python"));
                }
                QuestionKind::Scenario { rubric } => {
                    assert_eq!(q.time, 5);
                    assert_eq!(rubric.len(), 4);
                    assert!(rubric.iter().any(|c| c.contains("Python")));
                }
            }
        }
    }

    #[test]
    fn test_unit_test_signal_extends_coding_prompt_only() {
        let plain = generate(&blueprint(&["Rust"], &[QuestionType::Coding], PreferenceSignals::default()));
        let with_tests = generate(&blueprint(
            &["Rust"],
            &[QuestionType::Coding],
            PreferenceSignals {
                add_unit_tests: true,
                ..PreferenceSignals::default()
            },
        ));
        assert!(!plain[0].prompt.contains("unit tests"));
        assert!(with_tests[0].prompt.contains("unit tests"));
        assert_eq!(plain[0].id, with_tests[0].id);
        assert_eq!(plain[0].kind, with_tests[0].kind);
    }
}
