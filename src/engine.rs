//! The ROBDD engine: node store, apply, builder, reducing sweep, and query surface (§4).

use crate::error::EngineError;
use crate::expr::Expr;
use crate::node::{Node, Op};
use crate::pointer::NodePointer;
use crate::variable::{VariableId, VariableOrder};
use fxhash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A (possibly partial) mapping from variable name to Boolean value.
///
/// Missing variables are treated as `false` by [`Engine::evaluate`] (§4.5). A `BTreeMap` keeps
/// assignments in a canonical, sortable order, which both [`Engine::paths_to_one`] and the
/// renderer depend on.
pub type Assignment = BTreeMap<Arc<str>, bool>;

/// Owns the unique table and apply cache for one build, per §3's lifecycle: an engine instance
/// is reusable across builds, but every [`Engine::build`] call clears both tables and starts a
/// fresh graph. Nothing about a prior build is visible after the next one starts.
pub struct Engine {
    variables: VariableOrder,
    /// Sentinel variable id used by terminal nodes; always equal to `variables.len()`.
    sentinel: VariableId,
    nodes: Vec<Node>,
    unique_table: FxHashMap<Node, NodePointer>,
    apply_cache: FxHashMap<(NodePointer, NodePointer, Op), NodePointer>,
    root: Option<NodePointer>,
}

impl Engine {
    /// An engine with no variables and no build yet performed.
    pub fn new() -> Engine {
        Engine {
            variables: VariableOrder::new(Vec::new()),
            sentinel: VariableId(0),
            nodes: Vec::new(),
            unique_table: FxHashMap::default(),
            apply_cache: FxHashMap::default(),
            root: None,
        }
    }

    pub fn variables(&self) -> &VariableOrder {
        &self.variables
    }

    /// The node currently at the root of the built graph.
    ///
    /// # Panics
    ///
    /// Panics if no build has completed yet.
    pub fn root(&self) -> NodePointer {
        self.root.expect("engine has no built root; call build() first")
    }

    /// Number of nodes reachable from the root, including the two terminals (§4.4 postcondition
    /// P5: after a build, every node in the unique table is reachable from the root, and the
    /// unique table's size equals this count).
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of non-terminal entries live in the unique table right now.
    pub fn unique_table_len(&self) -> usize {
        self.unique_table.len()
    }

    /// Clears engine state, installs `variables` as the new order, translates `expr` into a
    /// node graph through repeated `apply` calls, sweeps unreachable nodes, and returns the
    /// reduced root (§4.3).
    ///
    /// On failure the engine is left cleared and reusable; no half-built graph is visible.
    pub fn build(&mut self, expr: &Expr, variables: VariableOrder) -> Result<NodePointer, EngineError> {
        self.reset(variables);

        let mut memo: FxHashMap<*const Expr, NodePointer> = FxHashMap::default();
        let result = self.build_recursive(expr, &mut memo);

        match result {
            Ok(root) => {
                let root = self.sweep(root);
                self.root = Some(root);
                tracing::debug!(
                    nodes = self.nodes.len(),
                    vars = self.variables.len(),
                    "build complete"
                );
                Ok(root)
            }
            Err(err) => {
                self.reset(VariableOrder::new(Vec::new()));
                Err(err)
            }
        }
    }

    fn reset(&mut self, variables: VariableOrder) {
        self.sentinel = VariableId(variables.len() as u16);
        self.variables = variables;
        self.nodes = vec![
            Node::terminal(self.sentinel, false),
            Node::terminal(self.sentinel, true),
        ];
        self.unique_table = FxHashMap::default();
        self.unique_table.insert(self.nodes[0], NodePointer::zero());
        self.unique_table.insert(self.nodes[1], NodePointer::one());
        self.apply_cache = FxHashMap::default();
        self.root = None;
    }

    /// The only way to create a node (§4.1). Does not itself enforce reducedness (I3); callers
    /// (here, only [`Engine::apply`] and the `Var` case of the builder) must ensure `low != high`
    /// before calling, or accept a redundant test.
    fn mk(&mut self, var: VariableId, low: NodePointer, high: NodePointer) -> NodePointer {
        let node = Node { var, low, high };
        if let Some(&existing) = self.unique_table.get(&node) {
            return existing;
        }
        let pointer = NodePointer(self.nodes.len() as u32);
        self.nodes.push(node);
        self.unique_table.insert(node, pointer);
        pointer
    }

    fn var_of(&self, pointer: NodePointer) -> VariableId {
        self.nodes[pointer.to_index()].var
    }

    fn low_of(&self, pointer: NodePointer) -> NodePointer {
        self.nodes[pointer.to_index()].low
    }

    fn high_of(&self, pointer: NodePointer) -> NodePointer {
        self.nodes[pointer.to_index()].high
    }

    /// Binary recursive operator combinator, memoized over `(a, b, op)` (§4.2).
    fn apply(&mut self, op: Op, a: NodePointer, b: NodePointer) -> NodePointer {
        if a.is_terminal() && b.is_terminal() {
            return NodePointer::from_bool(op.eval(a.is_one(), b.is_one()));
        }

        let key = (a, b, op);
        if let Some(&cached) = self.apply_cache.get(&key) {
            return cached;
        }

        let var_a = self.var_of(a);
        let var_b = self.var_of(b);
        let v = var_a.min(var_b);

        let (a_low, a_high) = if var_a == v { (self.low_of(a), self.high_of(a)) } else { (a, a) };
        let (b_low, b_high) = if var_b == v { (self.low_of(b), self.high_of(b)) } else { (b, b) };

        let low = self.apply(op, a_low, b_low);
        let high = self.apply(op, a_high, b_high);

        let result = if low == high { low } else { self.mk(v, low, high) };
        self.apply_cache.insert(key, result);
        result
    }

    fn build_recursive(
        &mut self,
        expr: &Expr,
        memo: &mut FxHashMap<*const Expr, NodePointer>,
    ) -> Result<NodePointer, EngineError> {
        let key = expr as *const Expr;
        if let Some(&pointer) = memo.get(&key) {
            return Ok(pointer);
        }

        let pointer = match expr {
            Expr::Const(value) => NodePointer::from_bool(*value),
            Expr::Var(name) => {
                let id = self
                    .variables
                    .index_of(name)
                    .ok_or_else(|| EngineError::UnknownIdentifier(Arc::clone(name)))?;
                self.mk(id, NodePointer::zero(), NodePointer::one())
            }
            Expr::Not(inner) => {
                let g = self.build_recursive(inner, memo)?;
                self.apply(Op::Not, g, g)
            }
            Expr::And(terms) => self.build_nary(Op::And, terms, memo)?,
            Expr::Or(terms) => self.build_nary(Op::Or, terms, memo)?,
        };

        memo.insert(key, pointer);
        Ok(pointer)
    }

    fn build_nary(
        &mut self,
        op: Op,
        terms: &[Expr],
        memo: &mut FxHashMap<*const Expr, NodePointer>,
    ) -> Result<NodePointer, EngineError> {
        let (first, rest) = terms.split_first().ok_or_else(|| {
            EngineError::MalformedExpression(format!("{op:?} with no operands", op = op))
        })?;

        let mut acc = self.build_recursive(first, memo)?;
        for term in rest {
            let next = self.build_recursive(term, memo)?;
            acc = self.apply(op, acc, next);
        }
        Ok(acc)
    }

    /// Prunes the unique table down to what is reachable from `root`, and re-encodes the
    /// reachable graph as a dense array in DFS postorder with the terminals fixed at slots `0`
    /// and `1` (§4.4). Returns the root's new pointer.
    fn sweep(&mut self, root: NodePointer) -> NodePointer {
        let mut new_nodes = Vec::with_capacity(self.nodes.len());
        new_nodes.push(self.nodes[0]);
        new_nodes.push(self.nodes[1]);

        let mut remap: FxHashMap<NodePointer, NodePointer> = FxHashMap::default();
        remap.insert(NodePointer::zero(), NodePointer::zero());
        remap.insert(NodePointer::one(), NodePointer::one());

        let new_root = sweep_visit(&self.nodes, root, &mut new_nodes, &mut remap);

        let discarded = self.nodes.len() - new_nodes.len();
        self.nodes = new_nodes;

        self.unique_table.clear();
        for (index, node) in self.nodes.iter().enumerate().skip(2) {
            self.unique_table.insert(*node, NodePointer(index as u32));
        }
        self.apply_cache.clear();

        tracing::trace!(retained = self.nodes.len(), discarded, "sweep complete");
        new_root
    }

    /// Point evaluation (§4.5): walk from the root, choosing `high` when the node's variable is
    /// assigned `true`, `low` otherwise; variables absent from `assignment` are treated as
    /// `false`.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        let mut node = self.root();
        while !node.is_terminal() {
            let var = self.var_of(node);
            let name = self.variables.name_of(var);
            let branch_high = assignment.get(name.as_ref()).copied().unwrap_or(false);
            node = if branch_high { self.high_of(node) } else { self.low_of(node) };
        }
        node.is_one()
    }

    /// DFS from the root, emitting one partial assignment per root-to-`1` path (§4.5).
    pub fn paths_to_one(&self) -> Vec<Assignment> {
        let mut results = Vec::new();
        let mut current = Assignment::new();
        self.paths_to_one_recursive(self.root(), &mut current, &mut results);
        results
    }

    fn paths_to_one_recursive(&self, node: NodePointer, current: &mut Assignment, results: &mut Vec<Assignment>) {
        if node.is_one() {
            results.push(current.clone());
            return;
        }
        if node.is_zero() {
            return;
        }

        let var = self.var_of(node);
        let name = Arc::clone(self.variables.name_of(var));

        current.insert(Arc::clone(&name), true);
        self.paths_to_one_recursive(self.high_of(node), current, results);

        current.insert(Arc::clone(&name), false);
        self.paths_to_one_recursive(self.low_of(node), current, results);

        current.remove(&name);
    }

    /// Every satisfying assignment, as a complete mapping over the full variable order: each
    /// partial path from [`Engine::paths_to_one`] is expanded over its unassigned variables
    /// (§4.5). This yields exactly the truth table's `1` rows; ordering is unspecified.
    pub fn complete_assignments_to_one(&self) -> Vec<Assignment> {
        let mut out = Vec::new();
        for path in self.paths_to_one() {
            let missing: Vec<Arc<str>> = self
                .variables
                .names()
                .iter()
                .filter(|name| !path.contains_key(name.as_ref()))
                .cloned()
                .collect();

            let combinations = 1usize << missing.len();
            for bits in 0..combinations {
                let mut full = path.clone();
                for (i, name) in missing.iter().enumerate() {
                    let value = (bits >> i) & 1 == 1;
                    full.insert(Arc::clone(name), value);
                }
                out.push(full);
            }
        }
        out
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

fn sweep_visit(
    old_nodes: &[Node],
    node: NodePointer,
    new_nodes: &mut Vec<Node>,
    remap: &mut FxHashMap<NodePointer, NodePointer>,
) -> NodePointer {
    if let Some(&mapped) = remap.get(&node) {
        return mapped;
    }

    let old = old_nodes[node.to_index()];
    let low = sweep_visit(old_nodes, old.low, new_nodes, remap);
    let high = sweep_visit(old_nodes, old.high, new_nodes, remap);

    let new_pointer = NodePointer(new_nodes.len() as u32);
    new_nodes.push(Node { var: old.var, low, high });
    remap.insert(node, new_pointer);
    new_pointer
}
