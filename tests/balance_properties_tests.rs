use bracescan::context::{context_or_tail, tail_window};
use bracescan::matcher::find_unmatched;
use bracescan::scanner::{scan_backward, scan_forward};
use bracescan::{BracketPair, Document, Position, UnmatchedBracket};
use std::fs;
use tempfile::TempDir;

const PAIR: BracketPair = BracketPair::BRACES;

fn doc(lines: &[&str]) -> Document {
    Document::from_lines(lines.iter().copied())
}

/// A spread of balanced and unbalanced inputs used by the property checks
fn corpus() -> Vec<Document> {
    vec![
        doc(&[]),
        doc(&["{a}"]),
        doc(&["{", "{", "}"]),
        doc(&["}", "{"]),
        doc(&["}}}", "x", "{"]),
        doc(&["item {", "  text: \"}\"", "}"]),
        doc(&["{ { {", "} }", "} }", "{"]),
        Document::from_text("t", "a {\r\n  b { c }\r\n}\r\n"),
    ]
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_balance_conservation() {
    for d in corpus() {
        let fwd = scan_forward(&d, PAIR);
        let back = scan_backward(&d, PAIR);
        assert_eq!(fwd.final_balance, -back.final_balance, "{:?}", d);
    }
}

#[test]
fn test_matcher_soundness() {
    for d in corpus() {
        let fwd = scan_forward(&d, PAIR);
        let unmatched = find_unmatched(&d, PAIR);
        if unmatched.is_balanced() {
            assert_eq!(fwd.final_balance, 0, "{:?}", d);
        }
        if fwd.final_balance != 0 {
            assert!(!unmatched.is_balanced(), "{:?}", d);
        }
        // leftover openers minus stray closers is the final balance
        assert_eq!(
            unmatched.openers.len() as i64 - unmatched.closers.len() as i64,
            fwd.final_balance
        );
    }
}

#[test]
fn test_earliest_extreme_tie_break() {
    let fwd = scan_forward(&doc(&["}", "{{}}", "}{"]), PAIR);
    assert_eq!(fwd.min.value, -1);
    assert_eq!(fwd.min.line, Some(1));

    // without the leading closer nothing ever drops below 0
    let fwd = scan_forward(&doc(&["{{}}", "}{"]), PAIR);
    assert_eq!(fwd.min.value, 0);
    assert_eq!(fwd.min.line, None);
}

#[test]
fn test_idempotence() {
    for d in corpus() {
        assert_eq!(scan_forward(&d, PAIR), scan_forward(&d, PAIR));
        assert_eq!(scan_backward(&d, PAIR), scan_backward(&d, PAIR));
        assert_eq!(find_unmatched(&d, PAIR), find_unmatched(&d, PAIR));
    }
}

#[test]
fn test_braces_in_strings_are_counted() {
    let unmatched = find_unmatched(&doc(&["item {", "  text: \"}\"", "}"]), PAIR);
    assert_eq!(unmatched.closers, vec![Position::new(3, 1)]);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_single_balanced_line() {
    let d = doc(&["{a}"]);
    assert_eq!(scan_forward(&d, PAIR).final_balance, 0);
    assert!(find_unmatched(&d, PAIR).is_balanced());
    assert_eq!(scan_backward(&d, PAIR).first_negative_line, None);
}

#[test]
fn test_scenario_unclosed_first_opener() {
    let d = doc(&["{", "{", "}"]);
    assert_eq!(scan_forward(&d, PAIR).final_balance, 1);
    let unmatched = find_unmatched(&d, PAIR);
    assert_eq!(
        unmatched.findings(),
        vec![UnmatchedBracket::UnmatchedOpener(Position::new(1, 1))]
    );
}

#[test]
fn test_scenario_closer_before_opener() {
    let d = doc(&["}", "{"]);
    let fwd = scan_forward(&d, PAIR);
    assert_eq!(fwd.min.value, -1);
    assert_eq!(fwd.min.line, Some(1));

    let unmatched = find_unmatched(&d, PAIR);
    assert_eq!(unmatched.closers, vec![Position::new(1, 1)]);
    assert_eq!(unmatched.openers, vec![Position::new(2, 1)]);
}

#[test]
fn test_scenario_thousand_pairs() {
    let mut lines = Vec::new();
    for i in 0..500 {
        lines.push(format!("block{} {{", i));
        lines.push(format!("  inner {{ value: {} }}", i));
        lines.push("}".to_string());
    }
    let d = Document::from_lines(lines);

    let fwd = scan_forward(&d, PAIR);
    assert_eq!(fwd.final_balance, 0);
    assert_eq!(fwd.min.line, None);
    assert_eq!(fwd.max.value, 1);
    assert!(find_unmatched(&d, PAIR).is_balanced());
    let back = scan_backward(&d, PAIR);
    assert_eq!(back.first_negative_line, None);
    assert_eq!(back.final_balance, 0);
}

#[test]
fn test_scenario_empty_document() {
    let d = Document::from_text("empty", "");
    let fwd = scan_forward(&d, PAIR);
    assert_eq!(fwd.final_balance, 0);
    assert_eq!(fwd.min.line, None);
    assert_eq!(fwd.max.line, None);
    assert_eq!(scan_backward(&d, PAIR).final_balance, 0);
    assert!(find_unmatched(&d, PAIR).is_balanced());
    assert!(context_or_tail(&d, fwd.min.line, 5, 20).is_empty());
    assert!(tail_window(&d, 20).is_empty());
}

// =============================================================================
// Loading from disk
// =============================================================================

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("View.qml");
    fs::write(&path, "Item {\n    Rectangle {\n    }\n").unwrap();

    let d = Document::load(&path).unwrap();
    assert_eq!(d.len(), 3);
    assert_eq!(scan_forward(&d, PAIR).final_balance, 1);
    assert_eq!(find_unmatched(&d, PAIR).openers, vec![Position::new(1, 6)]);
}

#[test]
fn test_bare_cr_line_endings() {
    let d = Document::from_text("t", "a\r}\rb");
    assert_eq!(d.len(), 3);
    assert_eq!(find_unmatched(&d, PAIR).closers, vec![Position::new(2, 1)]);
    assert_eq!(scan_forward(&d, PAIR).min.line, Some(2));
}

#[test]
fn test_load_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let err = Document::load(temp.path().join("missing.qml")).unwrap_err();
    assert!(err.to_string().contains("missing.qml"));
}
