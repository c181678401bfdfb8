#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// `field == None` means rows keep the order they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}
