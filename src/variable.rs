use fxhash::FxHashMap;
use std::sync::Arc;

/// Identifies one variable's position in a [`VariableOrder`].
///
/// Usage example: `order.index_of("x")`.
///
/// Variables are addressed by this opaque index rather than by name everywhere performance
/// matters (node keys, ordering comparisons); the index is intentionally small and `Copy` so
/// nodes can carry it directly instead of an `Arc<str>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(pub(crate) u16);

impl VariableId {
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A fixed, ordered sequence of variable names, and the index lookup for it.
///
/// A build fixes one `VariableOrder`; the position of a name in it is the variable's `idx` for
/// ordering purposes (§3 of the design). Names absent from the order have no `VariableId` and
/// are rejected by the builder as an unknown identifier.
#[derive(Clone, Debug)]
pub struct VariableOrder {
    names: Vec<Arc<str>>,
    index: FxHashMap<Arc<str>, VariableId>,
}

impl VariableOrder {
    pub fn new(names: Vec<Arc<str>>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (Arc::clone(name), VariableId(i as u16)))
            .collect();
        VariableOrder { names, index }
    }

    /// Number of declared variables. Also used as the sentinel "variable index" of terminals,
    /// since it compares greater than every real variable's index.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<VariableId> {
        self.index.get(name).copied()
    }

    pub fn name_of(&self, id: VariableId) -> &Arc<str> {
        &self.names[id.as_usize()]
    }

    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_respects_declaration_order() {
        let order = VariableOrder::new(vec![Arc::from("x"), Arc::from("y"), Arc::from("z")]);
        assert_eq!(order.index_of("x"), Some(VariableId(0)));
        assert_eq!(order.index_of("y"), Some(VariableId(1)));
        assert_eq!(order.index_of("z"), Some(VariableId(2)));
        assert_eq!(order.index_of("w"), None);
    }

    #[test]
    fn name_of_round_trips() {
        let order = VariableOrder::new(vec![Arc::from("a"), Arc::from("b")]);
        let id = order.index_of("b").unwrap();
        assert_eq!(order.name_of(id).as_ref(), "b");
    }
}
