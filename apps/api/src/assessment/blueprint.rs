//! Blueprint Compiler: combines explicit requirement fields with extracted note signals.
//!
//! The compiler preserves caller intent: an empty stack or type list stays empty here and
//! is resolved to defaults by the generator.

use serde::Deserialize;

use crate::assessment::extractor;
use crate::models::assessment::{Blueprint, QuestionType};
use crate::models::lenient;

/// Raw hiring requirement as submitted by a client. Every field is optional; null or
/// wrongly shaped values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlueprintRequest {
    #[serde(deserialize_with = "lenient::string_opt")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub stack: Vec<String>,
    #[serde(deserialize_with = "lenient::string_opt")]
    pub experience: Option<String>,
    /// Type names; unknown names are dropped rather than rejected.
    #[serde(deserialize_with = "lenient::string_vec")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "lenient::u32_opt")]
    pub duration: Option<u32>,
    #[serde(deserialize_with = "lenient::string_opt")]
    pub notes: Option<String>,
}

/// Compiles a `Blueprint`. Total: never fails, calls the extractor exactly once.
pub fn compile(
    role: Option<String>,
    stack: Vec<String>,
    experience: Option<String>,
    types: &[QuestionType],
    duration: Option<u32>,
    notes: Option<&str>,
) -> Blueprint {
    let mut unique_types: Vec<QuestionType> = Vec::with_capacity(types.len());
    for ty in types {
        if !unique_types.contains(ty) {
            unique_types.push(*ty);
        }
    }

    let stack = stack
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Blueprint {
        role: non_blank(role),
        stack,
        experience: non_blank(experience),
        types: unique_types,
        duration,
        nl_notes_parsed: extractor::extract(notes),
    }
}

/// Compiles a blueprint from a client request, parsing type names leniently.
pub fn compile_request(request: BlueprintRequest) -> Blueprint {
    let types: Vec<QuestionType> = request
        .types
        .iter()
        .filter_map(|name| QuestionType::parse(name))
        .collect();

    compile(
        request.role,
        request.stack,
        request.experience,
        &types,
        request.duration,
        request.notes.as_deref(),
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
