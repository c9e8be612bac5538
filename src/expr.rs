use std::sync::Arc;

/// The expression-tree input to [`crate::Engine::build`] (§6.1).
///
/// This is the tagged variant the distilled `(tag, arg1, .., argk)` tuples re-architect into:
/// an identifier, a constant, a unary negation, or an n-ary `and`/`or`. The builder left-folds
/// `And`/`Or` across their operands, so `And(vec![a])` is just `a` and `And(vec![])` is rejected
/// as a malformed expression rather than silently defaulting to an identity element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(Arc<str>),
    Const(bool),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<Arc<str>>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    pub fn and(self, other: Expr) -> Expr {
        match self {
            Expr::And(mut terms) => {
                terms.push(other);
                Expr::And(terms)
            }
            first => Expr::And(vec![first, other]),
        }
    }

    pub fn or(self, other: Expr) -> Expr {
        match self {
            Expr::Or(mut terms) => {
                terms.push(other);
                Expr::Or(terms)
            }
            first => Expr::Or(vec![first, other]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluent_builders_compose_nary_nodes() {
        let expr = Expr::var("x").and(Expr::var("y")).and(Expr::var("z"));
        assert_eq!(
            expr,
            Expr::And(vec![Expr::var("x"), Expr::var("y"), Expr::var("z")])
        );
    }

    #[test]
    fn not_wraps_a_single_operand() {
        let expr = Expr::var("x").not();
        assert_eq!(expr, Expr::Not(Box::new(Expr::var("x"))));
    }
}
