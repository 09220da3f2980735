#![allow(dead_code)]

use std::sync::Once;

use depmatch_graph::{Graph, Indexed, IndexedGraph};

static INIT: Once = Once::new();

pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Assert that an invariant holds
#[macro_export]
macro_rules! assert_invariant {
    ($cond:expr, $invariant_name:expr) => {
        if !$cond {
            panic!(
                "Invariant violated: {}\nCondition: {}",
                $invariant_name,
                stringify!($cond)
            );
        }
    };
}

/// "the dog chased the cat": chased -> dog (NSUBJ), chased -> cat (DOBJ).
pub fn chased_sentence() -> Graph<&'static str, &'static str> {
    let mut g = Graph::new();
    for v in ["dog", "chased", "cat"] {
        g.add_vertex(v);
    }
    g.add_edge(&"chased", &"dog", "NSUBJ").unwrap();
    g.add_edge(&"chased", &"cat", "DOBJ").unwrap();
    g
}

pub type Token = Indexed<&'static str>;

/// Indexed tokens 0..words.len(), no edges.
pub fn indexed_tokens(words: &[&'static str]) -> IndexedGraph<Token, Token> {
    let mut g = IndexedGraph::new();
    for (i, w) in words.iter().enumerate() {
        g.add_vertex(Indexed::new(i, *w)).unwrap();
    }
    g
}
