#![allow(dead_code)]

use std::sync::Once;

use depmatch_graph::{Graph, Indexed, IndexedGraph};
use depmatch_subgraph::{Predicate, PredicateGraph};

static INIT: Once = Once::new();

pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub type Words = Graph<&'static str, &'static str>;

lazy_static::lazy_static! {
    /// b -> a (NSUBJ), b -> c (DOBJ).
    pub static ref SUBJECT_OBJECT: Words = words(&["a", "b", "c"], &[("b", "a", "NSUBJ"), ("b", "c", "DOBJ")]);

    /// b -> a (NSUBJ), b -> c (NSUBJ).
    pub static ref TWO_SUBJECTS: Words = words(&["a", "b", "c"], &[("b", "a", "NSUBJ"), ("b", "c", "NSUBJ")]);
}

pub fn words(
    vertices: &[&'static str],
    edges: &[(&'static str, &'static str, &'static str)],
) -> Words {
    let mut g = Words::new();
    for v in vertices {
        g.add_vertex(*v);
    }
    for (s, t, l) in edges {
        if s == t {
            g.add_self_loop(s, *l).unwrap();
        } else {
            g.add_edge(s, t, *l).unwrap();
        }
    }
    g
}

/// Two-vertex predicate pattern: `head` -[label]-> `dependent`.
pub fn head_dependent(
    head: Predicate<&'static str>,
    dependent: Predicate<&'static str>,
    label: Predicate<&'static str>,
) -> PredicateGraph<&'static str, &'static str> {
    let mut g = PredicateGraph::new();
    g.add_vertex(dependent.clone());
    g.add_vertex(head.clone());
    g.add_edge(&head, &dependent, label).unwrap();
    g
}

pub type Tokens = IndexedGraph<Indexed<&'static str>, Indexed<&'static str>>;

/// Indexed tokens numbered from `offset`; edges numbered after the tokens.
pub fn tokens(offset: usize, words: &[&'static str], edges: &[(usize, usize, &'static str)]) -> Tokens {
    let mut g = Tokens::new();
    for (i, w) in words.iter().enumerate() {
        g.add_vertex(Indexed::new(offset + i, *w)).unwrap();
    }
    let mut next = offset + words.len();
    for (s, t, l) in edges {
        let source = g.vertex_by_index(offset + s).unwrap().clone();
        let target = g.vertex_by_index(offset + t).unwrap().clone();
        let label = Indexed::new(next, *l);
        if s == t {
            g.add_self_loop(&source, label).unwrap();
        } else {
            g.add_edge(&source, &target, label).unwrap();
        }
        next += 1;
    }
    g
}
