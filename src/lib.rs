//! **What is this?** This crate builds canonical **Binary Decision Diagrams** (BDDs), or more
//! precisely, Reduced Ordered Binary Decision Diagrams (ROBDDs), from small propositional
//! formulas over named Boolean variables, and uses them to answer truth-table questions:
//! point evaluation under an assignment, and enumeration of every assignment that makes a
//! formula true.
//!
//! ## What is a BDD?
//!
//! A BDD is a *directed acyclic graph* with two terminal vertices, `0` and `1`, which have no
//! outgoing edges, and decision vertices. Each decision vertex tests one Boolean variable and
//! has two outgoing edges, `low` (taken when the variable is `0`) and `high` (taken when the
//! variable is `1`). Evaluating the graph under a variable assignment means walking from the
//! root, following `low` or `high` at each decision vertex according to the assignment, until a
//! terminal is reached.
//!
//! A BDD is *ordered* when every root-to-terminal path visits variables in the same relative
//! order, and *reduced* when no decision vertex has `low == high` (that test is redundant) and
//! no two vertices test the same variable with the same two children (they would compute the
//! same function and can be shared). An ordered, reduced BDD is canonical: two formulas that
//! compute the same Boolean function, built over the same variable order, produce the same
//! graph.
//!
//! ## How this crate builds them
//!
//! Rather than growing one node per formula in isolation, [`Engine`] hash-conses every node it
//! allocates in a *unique table*, so structurally identical subgraphs within one build are
//! always the same node, and memoizes every binary operator application in an *apply cache*, so
//! recombining shared subformulas costs a cache lookup rather than a recursive descent. Together
//! these two tables are what keep [`Engine::build`] polynomial instead of exponential in the size
//! of its inputs.
//!
//! After a build completes, the reachable portion of the graph is swept into a fresh,
//! densely-packed arena in depth-first postorder, with the two terminals always occupying slots
//! `0` and `1` — the encoding trick array-based BDD implementations use to make node identity a
//! plain integer and the graph trivially comparable.
//!
//! ## Crate layout
//!
//! - [`expr`]: the expression-tree input to the engine.
//! - [`engine`]: the ROBDD engine itself — node store, apply, builder, sweep, query surface.
//! - [`error`]: the error taxonomy shared by the parser and the engine.
//! - [`parser`]: the lexer and recursive-descent parser for the source program grammar.
//! - [`render`]: formats engine query results as the textual truth-table output.

mod node;
mod pointer;
mod variable;

pub mod engine;
pub mod error;
pub mod expr;
pub mod parser;
pub mod render;

pub use engine::{Assignment, Engine};
pub use error::{EngineError, ProgramError, SemanticError, SyntaxError};
pub use expr::Expr;
pub use pointer::NodePointer;
pub use variable::{VariableId, VariableOrder};
