#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub stock_total: i64,
    pub category_id: i64,
    pub price_per_day: i64,
}

/// A game row joined with the name of its category
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithCategory {
    pub game: Game,
    pub category_name: String,
}

/// A validated game about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub name: String,
    pub image: Option<String>,
    pub stock_total: i64,
    pub category_id: i64,
    pub price_per_day: i64,
}
