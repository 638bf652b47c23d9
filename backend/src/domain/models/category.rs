#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A validated category about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
}
