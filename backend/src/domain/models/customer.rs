use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub cpf: String,
    pub birthday: NaiveDate,
}

/// Validated customer data, written as-is by both insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub cpf: String,
    pub birthday: NaiveDate,
}
