//! Question templates. Each builder synthesizes the type-specific payload and prompt
//! for one skill; ids and difficulty are assigned by the generator.

use serde_json::json;

use crate::models::assessment::{QuestionKind, TestCase};

pub const MCQ_TIME: u32 = 2;
pub const SHORT_TIME: u32 = 3;
pub const CODING_TIME: u32 = 10;
pub const SCENARIO_TIME: u32 = 5;
pub const SYSTEM_DESIGN_TIME: u32 = 15;

pub const SYSTEM_DESIGN_SKILL: &str = "system-design";

/// Index of the correct option in `mcq`, fixed by the template.
pub const MCQ_ANSWER: usize = 1;

pub const SHORT_KEY_POINTS: &[&str] = &[
    "mention trade-offs",
    "mention testing",
    "mention performance",
];

pub const SYSTEM_DESIGN_RUBRIC: &[&str] = &[
    "scalability of the core services",
    "data modeling and storage choices",
    "caching strategy and invalidation",
    "async processing and queueing",
    "consistency and failure handling",
    "observability through metrics, logs and traces",
];

const PALINDROME_STARTER: &str = "function isPalindrome(s) {\n  // your code here\n}\n";

const PALINDROME_HINT: &str =
    "Strip non-alphanumeric characters, lower-case, then compare against the reversed string.";

pub fn mcq(skill: &str) -> (String, QuestionKind) {
    let prompt = format!("Which statement about {skill} is most accurate in production use?");
    let options = vec![
        format!("{skill} removes the need for code review"),
        format!("Understanding {skill} core abstractions helps avoid common runtime pitfalls"),
        format!("{skill} guarantees bug-free code when used with defaults"),
        format!("{skill} should never be combined with other tools"),
    ];
    (
        prompt,
        QuestionKind::Mcq {
            options,
            answer: MCQ_ANSWER,
        },
    )
}

pub fn short(skill: &str) -> (String, QuestionKind) {
    let prompt = format!(
        "In a few sentences, explain how you would structure a production {skill} codebase for maintainability."
    );
    (
        prompt,
        QuestionKind::Short {
            key_points: SHORT_KEY_POINTS.iter().map(|p| p.to_string()).collect(),
        },
    )
}

pub fn coding(skill: &str, with_unit_tests: bool) -> (String, QuestionKind) {
    let mut prompt = format!(
        "Using {skill}, implement isPalindrome(s) that returns true when s reads the same \
         forwards and backwards, ignoring case and non-alphanumeric characters."
    );
    if with_unit_tests {
        prompt.push_str(" Include unit tests covering your edge cases.");
    }
    (
        prompt,
        QuestionKind::Coding {
            starter_code: PALINDROME_STARTER.to_string(),
            tests: vec![
                TestCase {
                    input: json!("A man, a plan, a canal: Panama"),
                    expected_output: json!(true),
                },
                TestCase {
                    input: json!("race a car"),
                    expected_output: json!(false),
                },
            ],
            evaluator_hint: PALINDROME_HINT.to_string(),
        },
    )
}

pub fn scenario(skill: &str) -> (String, QuestionKind) {
    let prompt = format!(
        "A release of your {skill} service is causing intermittent errors for some users \
         and the deadline for the next feature is close. Walk through how you would handle it."
    );
    let rubric = vec![
        format!("identifies likely root causes in the {skill} code path"),
        "prioritizes mitigation by user impact".to_string(),
        "communicates trade-offs and status to stakeholders".to_string(),
        format!("proposes {skill} tests or monitoring to prevent regressions"),
    ];
    (prompt, QuestionKind::Scenario { rubric })
}

pub fn system_design(role: Option<&str>) -> (String, QuestionKind) {
    let role = role.unwrap_or("software engineer");
    let prompt = format!(
        "As a {role}, design a service that ingests user events at high volume and serves \
         per-user activity feeds. Describe components, data flow and how it evolves under load."
    );
    (
        prompt,
        QuestionKind::Scenario {
            rubric: SYSTEM_DESIGN_RUBRIC.iter().map(|c| c.to_string()).collect(),
        },
    )
}
