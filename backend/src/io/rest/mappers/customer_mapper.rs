use crate::domain::models::Customer as DomainCustomer;
use crate::io::rest::mappers::DATE_FORMAT;
use shared::Customer as SharedCustomer;

pub struct CustomerMapper;

impl CustomerMapper {
    pub fn to_dto(domain: DomainCustomer) -> SharedCustomer {
        SharedCustomer {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            cpf: domain.cpf,
            birthday: domain.birthday.format(DATE_FORMAT).to_string(),
        }
    }
}
