use serde_json::Value;

/// Identifies a cell by its position in the underlying row list, not the
/// sorted/filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row_idx: usize,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub cell: CellKey,
    pub value: Value,
}
