//! Code Judge: pluggable correctness decision for coding answers.
//!
//! Default: `HeuristicCodeJudge` (static token sniffing, no execution).
//! A sandboxed runner that executes `tests` can implement the same trait; the evaluator
//! only consumes the boolean verdict.
//!
//! `AppState` holds an `Arc<dyn CodeJudge>`.

use crate::models::assessment::TestCase;

pub trait CodeJudge: Send + Sync {
    fn judge(&self, code: &str, tests: &[TestCase]) -> bool;

    /// Backend label, surfaced in logs.
    fn name(&self) -> &'static str;
}

/// Tokens that indicate stripping of non-alphanumeric characters.
const NORMALIZATION_TOKENS: &[&str] = &[
    "replace",
    "[^a-z0-9",
    "[^a-za-z0-9",
    "[^0-9a-z",
    "\\w",
    "isalnum",
    "is_alphanumeric",
    "isletterordigit",
];

/// Tokens that indicate case folding.
const CASE_FOLD_TOKENS: &[&str] = &[
    "tolowercase",
    "touppercase",
    "to_lowercase",
    "to_ascii_lowercase",
    "to_uppercase",
    ".lower(",
    ".upper(",
    "casefold",
];

/// Tokens that indicate a reversal.
const REVERSAL_TOKENS: &[&str] = &["reverse", "[::-1]", ".rev()"];

/// Static stand-in for execution: all three predicates must hold.
pub struct HeuristicCodeJudge;

impl HeuristicCodeJudge {
    fn contains_any(code: &str, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| code.contains(t))
    }
}

impl CodeJudge for HeuristicCodeJudge {
    fn judge(&self, code: &str, _tests: &[TestCase]) -> bool {
        let code = code.to_lowercase();
        Self::contains_any(&code, NORMALIZATION_TOKENS)
            && Self::contains_any(&code, CASE_FOLD_TOKENS)
            && Self::contains_any(&code, REVERSAL_TOKENS)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_palindrome_passes() {
        let code = r#"
            function isPalindrome(s) {
              const t = s.replace(/[^a-z0-9]/i, '').toLowerCase();
              return t === t.split('').reverse().join('');
            }
        "#;
        assert!(HeuristicCodeJudge.judge(code, &[]));
    }

    #[test]
    fn test_missing_reversal_fails() {
        let code = "const t = s.replace(/[^a-z0-9]/gi, '').toLowerCase(); return t.length > 0;";
        assert!(!HeuristicCodeJudge.judge(code, &[]));
    }

    #[test]
    fn test_missing_case_fold_fails() {
        let code = "s.replace(/\\W/g, '').split('').reverse()";
        assert!(!HeuristicCodeJudge.judge(code, &[]));
    }

    #[test]
    fn test_python_and_rust_idioms_pass() {
        let python = "t = ''.join(c for c in s if c.isalnum()).lower()\nreturn t == t[::-1]";
        assert!(HeuristicCodeJudge.judge(python, &[]));

        let rust = "let t: String = s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase(); t == t.chars().rev().collect::<String>()";
        assert!(HeuristicCodeJudge.judge(rust, &[]));
    }

    #[test]
    fn test_empty_code_fails() {
        assert!(!HeuristicCodeJudge.judge("", &[]));
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(HeuristicCodeJudge.name(), "heuristic");
    }
}
