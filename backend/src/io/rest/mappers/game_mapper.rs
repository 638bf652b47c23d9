use crate::domain::models::GameWithCategory;
use shared::Game as SharedGame;

pub struct GameMapper;

impl GameMapper {
    /// Converts a joined game row to the listing DTO
    pub fn to_dto(domain: GameWithCategory) -> SharedGame {
        let GameWithCategory { game, category_name } = domain;
        SharedGame {
            id: game.id,
            name: game.name,
            image: game.image,
            stock_total: game.stock_total,
            category_id: game.category_id,
            price_per_day: game.price_per_day,
            category_name,
        }
    }
}
