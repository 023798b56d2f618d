// src/checker/evaluate.rs
// =============================================================================
// Turns a finished fetch into a verdict for one redirect rule.
//
// A rule passes when BOTH hold:
// - the first response in the chain has the expected status code
// - the chain ends on the expected target URL (ignoring trailing slashes)
//
// Both mismatches are reported together when both happen.
// =============================================================================

use std::fmt::Write;

use serde::Serialize;

use super::http::{CheckFailure, FetchOutcome};
use crate::rules::RedirectRule;

// The verdict for one rule, one row of the failure report
//
// Field order here is the report's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckResult {
    pub source: String,
    pub target: String,
    pub expected_code: i64,
    /// Status of the first response; None when no response arrived at all
    pub first_status: Option<u16>,
    pub final_url: Option<String>,
    pub ok: bool,
    pub error: String,
}

impl CheckResult {
    fn empty(rule: &RedirectRule) -> Self {
        CheckResult {
            source: rule.source.clone(),
            target: rule.target.clone(),
            expected_code: rule.expected_code,
            first_status: None,
            final_url: None,
            ok: false,
            error: String::new(),
        }
    }
}

/// Compares URLs the lenient way: surrounding whitespace and trailing
/// slashes do not count.
pub fn normalize_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

// Evaluates a successful fetch against the rule's expectation
pub fn evaluate(rule: &RedirectRule, outcome: &FetchOutcome) -> CheckResult {
    let first_status = outcome.first_hop().status;
    let final_url = &outcome.last.url;

    let status_ok = i64::from(first_status) == rule.expected_code;
    let url_ok = normalize_url(final_url) == normalize_url(&rule.target);

    // Writing into a String cannot fail
    let mut error = String::new();
    if !status_ok {
        let _ = write!(
            error,
            "expected code {}, got {}. ",
            rule.expected_code, first_status
        );
    }
    if !url_ok {
        let _ = write!(
            error,
            "expected final URL {}, got {}.",
            rule.target, final_url
        );
    }

    CheckResult {
        first_status: Some(first_status),
        final_url: Some(final_url.clone()),
        ok: status_ok && url_ok,
        error,
        ..CheckResult::empty(rule)
    }
}

// Builds the failing result for a check that never got a final response
pub fn from_failure(rule: &RedirectRule, failure: &CheckFailure) -> CheckResult {
    let mut result = CheckResult {
        error: failure.to_string(),
        ..CheckResult::empty(rule)
    };

    // A loop still tells us how the chain started and where it was heading
    if let CheckFailure::RedirectLoop {
        first_status,
        last_url,
        ..
    } = failure
    {
        result.first_status = Some(*first_status);
        result.final_url = Some(last_url.clone());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::http::Hop;
    use std::time::Duration;

    fn rule(expected_code: i64) -> RedirectRule {
        RedirectRule {
            source: "https://a.com/old".to_string(),
            target: "https://a.com/new".to_string(),
            expected_code,
        }
    }

    fn redirect(status: u16, from: &str, to: &str) -> Hop {
        Hop {
            status,
            url: from.to_string(),
            location: Some(to.to_string()),
        }
    }

    fn landing(url: &str) -> Hop {
        Hop {
            status: 200,
            url: url.to_string(),
            location: None,
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://a.com/b/"), "https://a.com/b");
        assert_eq!(normalize_url("https://a.com/b"), "https://a.com/b");
        assert_eq!(normalize_url("  https://a.com/b//  "), "https://a.com/b");
        assert_eq!(
            normalize_url(normalize_url("https://a.com/b/")),
            normalize_url("https://a.com/b/")
        );
    }

    #[test]
    fn test_matching_redirect_passes() {
        let outcome = FetchOutcome {
            chain: vec![redirect(301, "https://a.com/old", "https://a.com/new/")],
            last: landing("https://a.com/new/"),
        };

        let result = evaluate(&rule(301), &outcome);
        assert!(result.ok);
        assert_eq!(result.error, "");
        assert_eq!(result.first_status, Some(301));
        assert_eq!(result.final_url.as_deref(), Some("https://a.com/new/"));
    }

    #[test]
    fn test_wrong_status_is_reported() {
        let outcome = FetchOutcome {
            chain: vec![redirect(302, "https://a.com/old", "https://a.com/new")],
            last: landing("https://a.com/new"),
        };

        let result = evaluate(&rule(301), &outcome);
        assert!(!result.ok);
        assert_eq!(result.first_status, Some(302));
        assert_eq!(result.error, "expected code 301, got 302. ");
    }

    #[test]
    fn test_wrong_target_is_reported() {
        let outcome = FetchOutcome {
            chain: vec![redirect(301, "https://a.com/old", "https://a.com/other")],
            last: landing("https://a.com/other"),
        };

        let result = evaluate(&rule(301), &outcome);
        assert!(!result.ok);
        assert_eq!(
            result.error,
            "expected final URL https://a.com/new, got https://a.com/other."
        );
    }

    #[test]
    fn test_both_mismatches_are_kept() {
        let outcome = FetchOutcome {
            chain: vec![redirect(307, "https://a.com/old", "https://a.com/other")],
            last: landing("https://a.com/other"),
        };

        let result = evaluate(&rule(301), &outcome);
        assert!(!result.ok);
        assert!(result.error.contains("expected code 301, got 307. "));
        assert!(result
            .error
            .contains("expected final URL https://a.com/new, got https://a.com/other."));
    }

    #[test]
    fn test_out_of_range_code_never_matches() {
        let outcome = FetchOutcome {
            chain: vec![redirect(301, "https://a.com/old", "https://a.com/new")],
            last: landing("https://a.com/new"),
        };

        let result = evaluate(&rule(70000), &outcome);
        assert!(!result.ok);
        assert_eq!(result.expected_code, 70000);
        assert_eq!(result.error, "expected code 70000, got 301. ");
    }

    #[test]
    fn test_rule_without_redirect() {
        let rule = RedirectRule {
            source: "https://a.com/page".to_string(),
            target: "https://a.com/page".to_string(),
            expected_code: 200,
        };
        let outcome = FetchOutcome {
            chain: vec![],
            last: landing("https://a.com/page"),
        };

        let result = evaluate(&rule, &outcome);
        assert!(result.ok);
        assert_eq!(result.first_status, Some(200));
    }

    #[test]
    fn test_failure_has_no_status() {
        let result = from_failure(&rule(301), &CheckFailure::Connection);
        assert!(!result.ok);
        assert_eq!(result.first_status, None);
        assert_eq!(result.final_url, None);
        assert_eq!(result.error, "connection error");

        let result = from_failure(&rule(301), &CheckFailure::Timeout(Duration::from_secs(8)));
        assert_eq!(result.error, "request timed out after 8s");
    }

    #[test]
    fn test_loop_failure_keeps_diagnostics() {
        let failure = CheckFailure::RedirectLoop {
            limit: 30,
            first_status: 301,
            previous_url: Some("https://a.com/x".to_string()),
            last_url: "https://a.com/y".to_string(),
        };

        let result = from_failure(&rule(301), &failure);
        assert!(!result.ok);
        assert_eq!(result.first_status, Some(301));
        // FinalUrl and the diagnosis name the same URL
        assert_eq!(result.final_url.as_deref(), Some("https://a.com/y"));
        assert_eq!(
            result.error,
            "redirect limit (30) exceeded. Possible loop: https://a.com/x → https://a.com/y"
        );
    }
}
