use crate::pointer::NodePointer;
use crate::variable::VariableId;

/// One vertex of the ROBDD graph, as kept in the engine's unique table.
///
/// Terminal nodes carry a `var` equal to the number of declared variables — a sentinel larger
/// than every real [`VariableId`], which makes terminal-vs-decision comparisons in [`crate::engine::Engine::apply`]
/// fall out of the normal "earliest variable in the order wins" rule without a special case.
/// The two terminals are told apart by their `low`/`high` fields pointing at themselves:
/// `NodePointer::zero()` for the `0` terminal, `NodePointer::one()` for the `1` terminal. This
/// keeps `Node` a plain hashable key with no separate "is this 0 or 1" payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Node {
    pub(crate) var: VariableId,
    pub(crate) low: NodePointer,
    pub(crate) high: NodePointer,
}

impl Node {
    pub(crate) fn terminal(sentinel: VariableId, value: bool) -> Node {
        let pointer = NodePointer::from_bool(value);
        Node {
            var: sentinel,
            low: pointer,
            high: pointer,
        }
    }
}

/// The binary Boolean operators the apply engine combines nodes with, plus `Not`, which is
/// applied as a pointwise operator on a node paired with itself (§4.2: "projection onto the
/// first argument, inverted").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    And,
    Or,
    Not,
}

impl Op {
    pub(crate) fn eval(self, x: bool, y: bool) -> bool {
        match self {
            Op::And => x && y,
            Op::Or => x || y,
            Op::Not => !x,
        }
    }
}
