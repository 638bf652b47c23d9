use crate::domain::models::Category as DomainCategory;
use shared::Category as SharedCategory;

pub struct CategoryMapper;

impl CategoryMapper {
    pub fn to_dto(domain: DomainCategory) -> SharedCategory {
        SharedCategory {
            id: domain.id,
            name: domain.name,
        }
    }
}
