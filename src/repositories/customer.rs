//! # Customer Repository
//!
//! CRUD operations for customers. Deleting a customer removes its pets in the
//! same connection scope, so callers running inside a transaction get an
//! atomic cascade.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::require_non_blank;
use crate::error::RepositoryError;
use crate::forms::CustomerInput;
use crate::models::customer::{
    ActiveModel as CustomerActiveModel, Column as CustomerColumn, Entity as Customer,
    Model as CustomerModel,
};
use crate::models::pet::{self, Entity as Pet, Model as PetModel};

/// Repository for Customer database operations
pub struct CustomerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CustomerRepository<'a, C> {
    /// Create a new CustomerRepository over a pool or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List all customers ordered by id
    pub async fn list_customers(&self) -> Result<Vec<CustomerModel>, RepositoryError> {
        Customer::find()
            .order_by_asc(CustomerColumn::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List every customer together with its pets
    pub async fn list_customers_with_pets(
        &self,
    ) -> Result<Vec<(CustomerModel, Vec<PetModel>)>, RepositoryError> {
        Customer::find()
            .find_with_related(Pet)
            .order_by_asc(CustomerColumn::Id)
            .order_by_asc(pet::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Get customer by ID
    pub async fn get_customer_by_id(
        &self,
        customer_id: i32,
    ) -> Result<Option<CustomerModel>, RepositoryError> {
        Customer::find_by_id(customer_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Get a customer and the pets it owns
    pub async fn get_customer_with_pets(
        &self,
        customer_id: i32,
    ) -> Result<Option<(CustomerModel, Vec<PetModel>)>, RepositoryError> {
        let Some(customer) = self.get_customer_by_id(customer_id).await? else {
            return Ok(None);
        };

        let pets = customer
            .find_related(Pet)
            .order_by_asc(pet::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(Some((customer, pets)))
    }

    /// Create a new customer
    pub async fn create_customer(
        &self,
        input: CustomerInput,
    ) -> Result<CustomerModel, RepositoryError> {
        validate_customer(&input)?;

        let customer = CustomerActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(Some(input.address)),
            ..Default::default()
        };

        let result = customer
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(customer_id = result.id, "Customer created");
        Ok(result)
    }

    /// Overwrite every editable field of an existing customer
    pub async fn update_customer(
        &self,
        customer_id: i32,
        input: CustomerInput,
    ) -> Result<CustomerModel, RepositoryError> {
        validate_customer(&input)?;

        let customer = self
            .get_customer_by_id(customer_id)
            .await?
            .ok_or_else(|| customer_not_found(customer_id))?;

        let mut active_customer = customer.into_active_model();
        active_customer.first_name = Set(input.first_name);
        active_customer.last_name = Set(input.last_name);
        active_customer.email = Set(input.email);
        active_customer.phone = Set(input.phone);
        active_customer.address = Set(Some(input.address));

        let result = active_customer
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(customer_id, "Customer updated");
        Ok(result)
    }

    /// Delete a customer and every pet it owns. Returns the number of pets removed.
    pub async fn delete_customer(&self, customer_id: i32) -> Result<u64, RepositoryError> {
        let customer = self
            .get_customer_by_id(customer_id)
            .await?
            .ok_or_else(|| customer_not_found(customer_id))?;

        let pets_removed = Pet::delete_many()
            .filter(pet::Column::CustomerId.eq(customer_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .rows_affected;

        customer
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(customer_id, pets_removed, "Customer deleted");
        Ok(pets_removed)
    }

    /// Get customer count
    pub async fn customer_count(&self) -> Result<u64, RepositoryError> {
        Customer::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

fn customer_not_found(customer_id: i32) -> RepositoryError {
    RepositoryError::not_found(format!("Customer {} not found", customer_id))
}

fn validate_customer(input: &CustomerInput) -> Result<(), RepositoryError> {
    require_non_blank(&input.first_name, "First name")?;
    require_non_blank(&input.last_name, "Last name")?;
    require_non_blank(&input.email, "Email")?;
    require_non_blank(&input.phone, "Phone")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection, TransactionTrait};

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn jane() -> CustomerInput {
        CustomerInput {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-1234".to_string(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_customer_round_trip() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let created = repo.create_customer(jane()).await.unwrap();
        let found = repo.get_customer_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.first_name, "Jane");
        assert_eq!(found.last_name, "Doe");
        assert_eq!(found.email, "jane@example.com");
        assert_eq!(found.phone, "555-1234");
        assert_eq!(found.address.as_deref(), Some(""));
        assert!(found.created_at.is_some());
        assert!(found.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_create_customer_requires_fields() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let mut input = jane();
        input.phone = "  ".to_string();

        let result = repo.create_customer(input).await;
        assert!(matches!(result, Err(RepositoryError::Validation(msg)) if msg == "Phone is required"));
        assert_eq!(repo.customer_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        repo.create_customer(jane()).await.unwrap();
        let result = repo.create_customer(jane()).await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(repo.customer_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_customer_refreshes_timestamp() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let created = repo.create_customer(jane()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut input = jane();
        input.phone = "555-9999".to_string();
        input.address = "1 Main St".to_string();
        let updated = repo.update_customer(created.id, input).await.unwrap();

        assert_eq!(updated.phone, "555-9999");
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let result = repo.update_customer(404, jane()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rolled_back_transaction_leaves_no_customer() {
        let db = setup_test_db().await;

        let txn = db.begin().await.unwrap();
        CustomerRepository::new(&txn)
            .create_customer(jane())
            .await
            .unwrap();
        txn.rollback().await.unwrap();

        assert_eq!(
            CustomerRepository::new(&db).customer_count().await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_list_customers_with_pets_includes_petless_customers() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        repo.create_customer(jane()).await.unwrap();
        let mut other = jane();
        other.email = "john@example.com".to_string();
        repo.create_customer(other).await.unwrap();

        let listed = repo.list_customers_with_pets().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|(_, pets)| pets.is_empty()));
        assert!(listed[0].0.id < listed[1].0.id);
    }
}
