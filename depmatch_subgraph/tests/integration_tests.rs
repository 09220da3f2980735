#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use depmatch_graph::Indexed;
use depmatch_subgraph::{
    AbortReason, Config, DedupeMode, ExactMatcher, MatchError, PayloadMatcher, Predicate,
    PredicateMatcher,
};
use rstest::rstest;

mod common;

use common::{
    SUBJECT_OBJECT, TWO_SUBJECTS, Words, head_dependent, setup_test_logging, tokens, words,
};

#[rstest]
#[case::subject_edge(&[("b", "a", "NSUBJ")], true)]
#[case::object_edge(&[("b", "c", "DOBJ")], true)]
#[case::unknown_relation(&[("b", "a", "DEP")], false)]
#[case::reversed_direction(&[("a", "b", "NSUBJ")], false)]
#[case::label_on_wrong_pair(&[("b", "a", "DOBJ")], false)]
fn exact_pattern_existence(
    #[case] edges: &[(&'static str, &'static str, &'static str)],
    #[case] expected: bool,
) {
    setup_test_logging();
    let vertices: Vec<&'static str> = edges.iter().flat_map(|(s, t, _)| [*s, *t]).collect();
    let pattern = words(&vertices, edges);
    let matcher = ExactMatcher::new(&pattern, &*SUBJECT_OBJECT);
    assert_eq!(matcher.exists_match(), expected);
    assert_eq!(matcher.try_exists_match(), Ok(expected));
    assert_eq!(!matcher.enumerate_matches().unwrap().is_empty(), expected);
}

#[test]
fn predicate_pattern_finds_both_subjects() {
    setup_test_logging();
    let subject = Predicate::equals("a").or(&Predicate::equals("c"));
    let verb = Predicate::equals("b");
    let pattern = head_dependent(verb.clone(), subject.clone(), Predicate::equals("NSUBJ"));

    let matcher = PredicateMatcher::new(&pattern, &*TWO_SUBJECTS);
    let matches = matcher.enumerate_matches().unwrap();
    assert_eq!(matches.len(), 2);

    let mut subjects: Vec<&str> = matches
        .iter()
        .map(|m| *m.get(&subject).unwrap())
        .collect();
    subjects.sort_unstable();
    assert_eq!(subjects, vec!["a", "c"]);
    assert!(matches.iter().all(|m| m.get(&verb) == Some(&"b")));
    assert!(matcher.exists_match());
}

#[test]
fn predicate_edge_filters_relations() {
    setup_test_logging();
    let pattern = head_dependent(
        Predicate::any("head"),
        Predicate::any("dependent"),
        Predicate::equals("DOBJ"),
    );
    let matcher = PredicateMatcher::new(&pattern, &*SUBJECT_OBJECT);
    let matches = matcher.enumerate_matches().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].iter().map(|(_, t)| *t).collect::<Vec<_>>(),
        vec!["c", "b"]
    );

    let matcher = PredicateMatcher::new(&pattern, &*TWO_SUBJECTS);
    assert!(!matcher.exists_match());
}

#[test]
fn same_named_predicates_stay_separate_vertices() {
    setup_test_logging();
    // "the dog chased the cat"
    let target = words(
        &["the1", "dog", "chased", "the2", "cat"],
        &[
            ("chased", "dog", "NSUBJ"),
            ("chased", "cat", "DOBJ"),
            ("dog", "the1", "DET"),
            ("cat", "the2", "DET"),
        ],
    );

    let det = |w: &&'static str| w.starts_with("the");
    let dog = Predicate::equals("dog");
    let cat = Predicate::equals("cat");
    let det1 = Predicate::new("det", det);
    let det2 = Predicate::new("det", det);

    let mut pattern = depmatch_subgraph::PredicateGraph::new();
    for v in [&dog, &det1, &cat, &det2] {
        assert!(pattern.add_vertex(v.clone()));
    }
    assert_eq!(pattern.vertex_count(), 4);
    pattern.add_edge(&dog, &det1, Predicate::equals("DET")).unwrap();
    pattern.add_edge(&cat, &det2, Predicate::equals("DET")).unwrap();

    let matcher = PredicateMatcher::new(&pattern, &target);
    let matches = matcher.enumerate_matches().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].get(&det1), Some(&"the1"));
    assert_eq!(matches[0].get(&det2), Some(&"the2"));
}

#[test]
fn oversized_pattern_is_rejected() {
    setup_test_logging();
    let target = words(&["a", "b"], &[("b", "a", "NSUBJ")]);
    let pattern = words(&["a", "b", "c"], &[]);
    let matcher = ExactMatcher::new(&pattern, &target);
    assert_eq!(
        matcher.enumerate_matches().unwrap_err(),
        MatchError::PatternTooLarge {
            pattern: 3,
            target: 2
        }
    );
    assert!(!matcher.exists_match());
    assert!(matches!(
        matcher.try_exists_match(),
        Err(MatchError::PatternTooLarge { .. })
    ));
}

#[test]
fn empty_pattern_has_one_empty_embedding() {
    setup_test_logging();
    let pattern = Words::new();
    let matcher = ExactMatcher::new(&pattern, &*SUBJECT_OBJECT);
    let matches = matcher.enumerate_matches().unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_empty());
    assert!(matcher.exists_match());
}

#[rstest]
#[case::exact(DedupeMode::Exact, 2)]
#[case::target_set(DedupeMode::TargetSet, 1)]
#[case::none(DedupeMode::None, 2)]
fn dedupe_modes_on_symmetric_pattern(#[case] dedupe: DedupeMode, #[case] expected: usize) {
    setup_test_logging();
    // Both pattern dependents accept either target dependent.
    let target = words(&["x", "y", "z"], &[("y", "x", "CONJ"), ("y", "z", "CONJ")]);
    let mut pattern = depmatch_subgraph::PredicateGraph::new();
    let head = Predicate::equals("y");
    let left = Predicate::any_of(["x", "z"]);
    let right = left.renamed("other");
    for v in [&head, &left, &right] {
        pattern.add_vertex(v.clone());
    }
    pattern
        .add_edge(&head, &left, Predicate::equals("CONJ"))
        .unwrap();
    pattern
        .add_edge(&head, &right, Predicate::equals("CONJ"))
        .unwrap();

    let config = Config::builder().dedupe(dedupe).build();
    let matcher = PredicateMatcher::with_config(&pattern, &target, config);
    assert_eq!(matcher.enumerate_matches().unwrap().len(), expected);
}

#[rstest]
#[case::first(Config::default())]
#[case::rarest(Config::builder().rarest_anchor().build())]
#[case::random(Config::builder().random_anchor(17).build())]
fn anchor_policy_does_not_change_results(#[case] config: Config) {
    setup_test_logging();
    let pattern = head_dependent(
        Predicate::equals("b"),
        Predicate::any("dependent"),
        Predicate::any("relation"),
    );
    let matcher = PredicateMatcher::with_config(&pattern, &*TWO_SUBJECTS, config);
    let mut signatures: Vec<_> = matcher
        .enumerate_matches()
        .unwrap()
        .iter()
        .map(|m| m.signature())
        .collect();
    signatures.sort();
    assert_eq!(signatures.len(), 2);

    let baseline = PredicateMatcher::new(&pattern, &*TWO_SUBJECTS);
    let mut expected: Vec<_> = baseline
        .enumerate_matches()
        .unwrap()
        .iter()
        .map(|m| m.signature())
        .collect();
    expected.sort();
    assert_eq!(signatures, expected);
}

#[test]
fn payload_matching_ignores_indices() {
    setup_test_logging();
    // "the dog chased the cat" at indices 0.., pattern tokens at 100..
    let target = tokens(
        0,
        &["the", "dog", "chased", "the", "cat"],
        &[(2, 1, "NSUBJ"), (2, 4, "DOBJ"), (1, 0, "DET"), (4, 3, "DET")],
    );
    let pattern = tokens(100, &["dog", "the"], &[(0, 1, "DET")]);

    let matcher = PayloadMatcher::new(pattern.graph(), target.graph());
    let matches = matcher.enumerate_matches().unwrap();
    assert_eq!(matches.len(), 1);
    let dog = matches[0].get(&Indexed::new(100, "dog")).unwrap();
    assert_eq!(dog.index, 1);

    // Exact matching compares indices, which never line up across graphs.
    let exact = ExactMatcher::new(pattern.graph(), target.graph());
    assert!(!exact.exists_match());
}

#[test]
fn step_limit_stops_enumeration() {
    setup_test_logging();
    let pattern = head_dependent(
        Predicate::any("head"),
        Predicate::any("dependent"),
        Predicate::any("relation"),
    );
    let config = Config::builder().step_limit(3).build();
    let matcher = PredicateMatcher::with_config(&pattern, &*TWO_SUBJECTS, config);
    assert_eq!(
        matcher.enumerate_matches().unwrap_err(),
        MatchError::SearchAborted {
            steps: 4,
            reason: AbortReason::StepLimit
        }
    );
    assert!(!matcher.exists_match());
    assert_eq!(matcher.progress().steps, 4);
}

#[rstest]
#[case::identical(&[("b", "a", "NSUBJ"), ("b", "c", "DOBJ")], true)]
#[case::relabelled(&[("b", "a", "NSUBJ"), ("b", "c", "NSUBJ")], false)]
#[case::extra_edge(&[("b", "a", "NSUBJ"), ("b", "c", "DOBJ"), ("a", "c", "DEP")], false)]
#[case::missing_edge(&[("b", "a", "NSUBJ")], false)]
fn isomorphism_needs_mutual_embedding(
    #[case] edges: &[(&'static str, &'static str, &'static str)],
    #[case] expected: bool,
) {
    setup_test_logging();
    let other = words(&["a", "b", "c"], edges);
    assert_eq!(ExactMatcher::new(&other, &*SUBJECT_OBJECT).is_isomorphic(), expected);
    assert_eq!(ExactMatcher::new(&*SUBJECT_OBJECT, &other).is_isomorphic(), expected);
}

#[test]
fn isomorphism_size_mismatch_does_not_search() {
    setup_test_logging();
    let smaller = words(&["a", "b"], &[("b", "a", "NSUBJ")]);
    let matcher = ExactMatcher::new(&smaller, &*SUBJECT_OBJECT);
    assert!(!matcher.is_isomorphic());
    assert_eq!(matcher.progress().steps, 0);
}
