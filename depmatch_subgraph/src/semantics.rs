//! How a pattern value is tested against a target value.
//!
//! The search is written once against [`Accepts`]; the marker types below
//! select exact-value, predicate, or payload matching.

use depmatch_graph::Indexed;

use crate::predicate::Predicate;

/// Decides whether a pattern element accepts a target element.
///
/// Implemented for vertices and edges alike: a matcher over pattern values
/// `PV`/`PE` and target values `TV`/`TE` needs `Accepts<PV, TV>` and
/// `Accepts<PE, TE>`.
pub trait Accepts<P: ?Sized, T: ?Sized> {
    /// True if `pattern` accepts `target`.
    fn accepts(pattern: &P, target: &T) -> bool;
}

/// Pattern values are compared with `==` against target values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl<T: PartialEq + ?Sized> Accepts<T, T> for Exact {
    fn accepts(pattern: &T, target: &T) -> bool {
        pattern == target
    }
}

/// Pattern values are predicates applied to target values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByPredicate;

impl<T> Accepts<Predicate<T>, T> for ByPredicate {
    fn accepts(pattern: &Predicate<T>, target: &T) -> bool {
        pattern.test(target)
    }
}

/// Indexed values on both sides, compared by payload rather than index.
///
/// [`Indexed`] equality follows the index, which identifies an element
/// within one graph. Across a pattern and a target the indices are
/// unrelated, so content matching compares payloads instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByPayload;

impl<T: PartialEq> Accepts<Indexed<T>, Indexed<T>> for ByPayload {
    fn accepts(pattern: &Indexed<T>, target: &Indexed<T>) -> bool {
        pattern.payload == target.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_uses_equality() {
        assert!(<Exact as Accepts<str, str>>::accepts("NSUBJ", "NSUBJ"));
        assert!(!<Exact as Accepts<str, str>>::accepts("NSUBJ", "DOBJ"));
    }

    #[test]
    fn payload_ignores_index() {
        let p = Indexed::new(1, "dog");
        assert!(ByPayload::accepts(&p, &Indexed::new(40, "dog")));
        assert!(!ByPayload::accepts(&p, &Indexed::new(1, "cat")));
        assert!(!Exact::accepts(&p, &Indexed::new(40, "dog")));
    }

    #[test]
    fn predicate_applies_test() {
        let p = Predicate::new("long", |w: &String| w.len() > 3);
        assert!(ByPredicate::accepts(&p, &"chased".to_string()));
        assert!(!ByPredicate::accepts(&p, &"dog".to_string()));
    }
}
