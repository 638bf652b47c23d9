use std::sync::Arc;

use shared::CustomerRequest;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::Page;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Customer;
use crate::domain::validation::validate_customer;
use crate::storage::{is_unique_violation, CustomerRepository, DbConnection};

/// Service for registering and maintaining customers
#[derive(Clone)]
pub struct CustomerService {
    customers: CustomerRepository,
    clock: Arc<dyn Clock>,
}

impl CustomerService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            customers: CustomerRepository::new(db),
            clock,
        }
    }

    /// List customers, optionally only those whose cpf starts with `cpf_prefix`
    pub async fn list_customers(&self, cpf_prefix: Option<&str>, page: Page) -> DomainResult<Vec<Customer>> {
        let customers = self.customers.list_customers(cpf_prefix, page).await?;
        info!("Found {} customers", customers.len());
        Ok(customers)
    }

    pub async fn get_customer(&self, customer_id: i64) -> DomainResult<Customer> {
        match self.customers.get_customer(customer_id).await? {
            Some(customer) => Ok(customer),
            None => {
                warn!("Customer not found: {}", customer_id);
                Err(not_found(customer_id))
            }
        }
    }

    /// Register a customer with a cpf no one else holds
    pub async fn create_customer(&self, request: CustomerRequest) -> DomainResult<Customer> {
        let fields = validate_customer(&request, self.clock.today())?;

        if self.customers.find_by_cpf(&fields.cpf).await?.is_some() {
            warn!("Customer cpf already registered: {}", fields.cpf);
            return Err(duplicate_cpf(&fields.cpf));
        }

        let id = match self.customers.store_customer(&fields).await {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_cpf(&fields.cpf)),
            Err(e) => return Err(e.into()),
        };

        info!("Created customer: {} with ID: {}", fields.name, id);
        Ok(Customer {
            id,
            name: fields.name,
            phone: fields.phone,
            cpf: fields.cpf,
            birthday: fields.birthday,
        })
    }

    /// Replace a customer's data. Keeping its own cpf is not a conflict.
    pub async fn update_customer(&self, customer_id: i64, request: CustomerRequest) -> DomainResult<Customer> {
        let fields = validate_customer(&request, self.clock.today())?;

        if self.customers.get_customer(customer_id).await?.is_none() {
            warn!("Customer not found: {}", customer_id);
            return Err(not_found(customer_id));
        }

        if let Some(holder) = self.customers.find_by_cpf(&fields.cpf).await? {
            if holder.id != customer_id {
                warn!("Customer cpf {} already belongs to customer {}", fields.cpf, holder.id);
                return Err(duplicate_cpf(&fields.cpf));
            }
        }

        let updated = match self.customers.update_customer(customer_id, &fields).await {
            Ok(updated) => updated,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_cpf(&fields.cpf)),
            Err(e) => return Err(e.into()),
        };
        if !updated {
            return Err(not_found(customer_id));
        }

        info!("Updated customer: {} with ID: {}", fields.name, customer_id);
        Ok(Customer {
            id: customer_id,
            name: fields.name,
            phone: fields.phone,
            cpf: fields.cpf,
            birthday: fields.birthday,
        })
    }
}

fn not_found(customer_id: i64) -> DomainError {
    DomainError::NotFound(format!("Customer {} not found", customer_id))
}

fn duplicate_cpf(cpf: &str) -> DomainError {
    DomainError::Conflict(format!("A customer with cpf {} already exists", cpf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::NaiveDate;

    async fn setup_test() -> CustomerService {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        CustomerService::new(db, clock)
    }

    fn request(name: &str, cpf: &str) -> CustomerRequest {
        CustomerRequest {
            name: Some(name.to_string()),
            phone: Some("21998899222".to_string()),
            cpf: Some(cpf.to_string()),
            birthday: Some("1992-10-05".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_customer() {
        let service = setup_test().await;

        let created = service.create_customer(request("João Alfredo", "01234567890")).await.expect("Failed to create");
        let fetched = service.get_customer(created.id).await.expect("Failed to get customer");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_nonexistent_customer() {
        let service = setup_test().await;
        assert!(matches!(service.get_customer(99).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_cpf_conflicts() {
        let service = setup_test().await;
        service.create_customer(request("João", "01234567890")).await.unwrap();

        let result = service.create_customer(request("Maria", "01234567890")).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_cpf() {
        let service = setup_test().await;
        let customer = service.create_customer(request("João", "01234567890")).await.unwrap();

        let updated = service
            .update_customer(customer.id, request("João Alfredo", "01234567890"))
            .await
            .expect("Keeping the same cpf must not conflict");
        assert_eq!(updated.name, "João Alfredo");
        assert_eq!(service.get_customer(customer.id).await.unwrap().name, "João Alfredo");
    }

    #[tokio::test]
    async fn test_update_to_other_customers_cpf_conflicts() {
        let service = setup_test().await;
        service.create_customer(request("João", "01234567890")).await.unwrap();
        let maria = service.create_customer(request("Maria", "09876543210")).await.unwrap();

        let result = service.update_customer(maria.id, request("Maria", "01234567890")).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(service.get_customer(maria.id).await.unwrap().cpf, "09876543210");
    }

    #[tokio::test]
    async fn test_update_nonexistent_customer() {
        let service = setup_test().await;
        let result = service.update_customer(5, request("Ghost", "01234567890")).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_future_birthday_rejected() {
        let service = setup_test().await;
        let mut future = request("João", "01234567890");
        future.birthday = Some("2030-01-01".to_string());

        assert!(matches!(service.create_customer(future).await, Err(DomainError::Validation(_))));
    }
}
