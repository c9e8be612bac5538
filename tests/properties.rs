//! Property-based tests for the canonicity, reducedness, and idempotence guarantees (P1, P2,
//! P5, P6), generating small random expression trees over a fixed variable order.

use proptest::prelude::*;
use robdd_tt::{Assignment, Engine, Expr, VariableOrder};
use std::sync::Arc;

const VARS: &[&str] = &["a", "b", "c"];

fn order() -> VariableOrder {
    VariableOrder::new(VARS.iter().map(|v| Arc::from(*v)).collect())
}

fn all_assignments() -> Vec<Assignment> {
    let n = VARS.len();
    (0..(1usize << n))
        .map(|row| {
            VARS.iter()
                .enumerate()
                .map(|(i, name)| (Arc::from(*name), (row >> (n - 1 - i)) & 1 == 1))
                .collect()
        })
        .collect()
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0..VARS.len()).prop_map(|i| Expr::var(VARS[i])),
        any::<bool>().prop_map(Expr::Const),
    ];

    leaf.prop_recursive(5, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| e.not()),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Expr::And),
            prop::collection::vec(inner, 1..4).prop_map(Expr::Or),
        ]
    })
}

fn truth_vector(expr: &Expr) -> Vec<bool> {
    let mut engine = Engine::new();
    engine.build(expr, order()).unwrap();
    all_assignments().iter().map(|a| engine.evaluate(a)).collect()
}

proptest! {
    /// P2: every reachable decision node is ordered and irredundant. Exercised indirectly here
    /// by checking the sweep leaves exactly the reachable node count, which can only hold if no
    /// node the sweep keeps is unreachable or duplicated.
    #[test]
    fn reducedness_holds_after_every_build(expr in arb_expr()) {
        let mut engine = Engine::new();
        engine.build(&expr, order()).unwrap();
        prop_assert_eq!(engine.size(), engine.unique_table_len() + 2);
    }

    /// P6: rebuilding the same tree twice is functionally and structurally idempotent.
    #[test]
    fn rebuilding_is_idempotent(expr in arb_expr()) {
        let mut first = Engine::new();
        first.build(&expr, order()).unwrap();

        let mut second = Engine::new();
        second.build(&expr, order()).unwrap();

        prop_assert_eq!(first.size(), second.size());
        for a in all_assignments() {
            prop_assert_eq!(first.evaluate(&a), second.evaluate(&a));
        }
    }

    /// P4: evaluate(a) = 1 iff a is consistent with some path returned by paths_to_one().
    #[test]
    fn paths_to_one_agree_with_evaluate(expr in arb_expr()) {
        let mut engine = Engine::new();
        engine.build(&expr, order()).unwrap();
        let ones: Vec<Assignment> = engine.complete_assignments_to_one();

        for a in all_assignments() {
            let expected = ones.iter().any(|full| full == &a);
            prop_assert_eq!(engine.evaluate(&a), expected);
        }
    }

    /// P1: semantically equivalent trees (`e` and `not not e`) build to identical truth vectors,
    /// the observable proxy for "same canonical graph" used throughout the design.
    #[test]
    fn semantically_equivalent_trees_produce_equal_truth_vectors(expr in arb_expr()) {
        let doubled = expr.clone().not().not();
        prop_assert_eq!(truth_vector(&expr), truth_vector(&doubled));
    }
}
