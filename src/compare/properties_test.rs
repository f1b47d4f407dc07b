//! Property tests for the structural predicates.

use proptest::prelude::*;

use super::{equals, matches};
use crate::testing::arb_value;

proptest! {
    #[test]
    fn equals_is_reflexive(a in arb_value()) {
        let copy = a.deep_clone();
        prop_assert!(equals(&a, &a));
        prop_assert!(equals(&a, &copy));
        prop_assert!(matches(&a, &copy));
    }

    #[test]
    fn equals_is_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(equals(&a, &b), equals(&b, &a));
    }

    #[test]
    fn equals_implies_mutual_match(a in arb_value(), b in arb_value()) {
        if equals(&a, &b) {
            prop_assert!(matches(&a, &b));
            prop_assert!(matches(&b, &a));
        }
    }

    #[test]
    fn mutual_match_implies_equals_for_json(a in arb_value(), b in arb_value()) {
        if matches(&a, &b) && matches(&b, &a) {
            prop_assert!(equals(&a, &b));
        }
    }

    #[test]
    fn predicates_do_not_mutate(a in arb_value(), b in arb_value()) {
        let (before_a, before_b) = (a.deep_clone(), b.deep_clone());
        let _ = matches(&a, &b);
        let _ = equals(&a, &b);
        prop_assert!(equals(&a, &before_a));
        prop_assert!(equals(&b, &before_b));
    }
}
