//! Property tests for the code matcher.

use proptest::prelude::*;

use scribe_core::matcher::{normalize, partial_ratio, CodeMatcher};
use scribe_core::models::CandidateCode;

fn label() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{3,10}", 1..5).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn substring_of_label_always_matches(label in label(), start in 0usize..100, len in 1usize..100) {
        let chars: Vec<char> = label.chars().collect();
        let start = start % chars.len();
        let end = (start + len).min(chars.len());
        let fragment: String = chars[start..end].iter().collect();
        prop_assume!(!normalize(&fragment).is_empty());

        let codes = vec![CandidateCode::new("X01", label.clone())];
        let matcher = CodeMatcher::new(&codes);

        let matched = matcher.match_text(&fragment);
        prop_assert_eq!(matched.map(|c| c.code.as_str()), Some("X01"));
    }

    #[test]
    fn case_and_punctuation_do_not_matter(label in label()) {
        let codes = vec![CandidateCode::new("X01", label.clone())];
        let matcher = CodeMatcher::new(&codes);

        let noisy = format!("- {}.", label.to_uppercase().replace(' ', ", "));
        prop_assert!(matcher.match_text(&noisy).is_some());
    }

    #[test]
    fn inserted_token_breaks_match(
        words in prop::collection::vec("[a-z]{3,8}", 2..5),
        inserted in "[0-9]{2,4}",
        at in 1usize..4,
    ) {
        let label = words.join(" ");
        let at = 1 + (at - 1) % (words.len() - 1);
        let mut perturbed = words.clone();
        perturbed.insert(at, inserted);
        let line = perturbed.join(" ");

        let codes = vec![CandidateCode::new("X01", label)];
        let matcher = CodeMatcher::new(&codes);

        prop_assert!(matcher.match_text(&line).is_none());
    }

    #[test]
    fn matching_is_deterministic(label in label(), line in "[a-zA-Z ,.]{0,30}") {
        let codes = vec![
            CandidateCode::new("X01", label),
            CandidateCode::new("X02", "hypertension"),
        ];
        let matcher = CodeMatcher::new(&codes);
        let lines = vec![line.clone(), line];

        let first = matcher.match_lines(&lines);
        let second = matcher.match_lines(&lines);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() == 0 || first.len() == 2);
    }

    #[test]
    fn partial_ratio_is_bounded_and_symmetric(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let ab = partial_ratio(&a, &b);
        let ba = partial_ratio(&b, &a);
        prop_assert!((0.0..=1.0).contains(&ab));
        if a.chars().count() != b.chars().count() {
            prop_assert_eq!(ab, ba);
        }
    }
}

#[test]
fn test_empty_candidates_never_match() {
    let codes: Vec<CandidateCode> = Vec::new();
    let matcher = CodeMatcher::new(&codes);

    assert!(matcher.match_lines(&["Hypertension", "Diabetes"]).is_empty());
}
