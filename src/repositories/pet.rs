//! # Pet Repository
//!
//! CRUD operations for pets. A pet is always created under an existing
//! customer; ownership never changes after creation.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::require_non_blank;
use crate::error::RepositoryError;
use crate::forms::PetInput;
use crate::models::customer::Entity as Customer;
use crate::models::pet::{
    ActiveModel as PetActiveModel, Column as PetColumn, Entity as Pet, Model as PetModel,
};

/// Repository for Pet database operations
pub struct PetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List all pets ordered by id
    pub async fn list_pets(&self) -> Result<Vec<PetModel>, RepositoryError> {
        Pet::find()
            .order_by_asc(PetColumn::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List the pets owned by one customer
    pub async fn list_pets_for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<PetModel>, RepositoryError> {
        Pet::find()
            .filter(PetColumn::CustomerId.eq(customer_id))
            .order_by_asc(PetColumn::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn get_pet_by_id(&self, pet_id: i32) -> Result<Option<PetModel>, RepositoryError> {
        Pet::find_by_id(pet_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Create a pet owned by `customer_id`
    pub async fn create_pet(
        &self,
        customer_id: i32,
        input: PetInput,
    ) -> Result<PetModel, RepositoryError> {
        validate_pet(&input)?;

        let owner_exists = Customer::find_by_id(customer_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .is_some();
        if !owner_exists {
            return Err(RepositoryError::not_found(format!(
                "Customer {} not found",
                customer_id
            )));
        }

        let pet = PetActiveModel {
            name: Set(input.name),
            species: Set(input.species),
            breed: Set(Some(input.breed)),
            age: Set(input.age),
            weight: Set(input.weight),
            color: Set(Some(input.color)),
            gender: Set(Some(input.gender)),
            microchip_id: Set(input.microchip_id),
            notes: Set(Some(input.notes)),
            customer_id: Set(customer_id),
            ..Default::default()
        };

        let result = pet
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(pet_id = result.id, customer_id, "Pet created");
        Ok(result)
    }

    /// Overwrite every editable field of an existing pet
    pub async fn update_pet(
        &self,
        pet_id: i32,
        input: PetInput,
    ) -> Result<PetModel, RepositoryError> {
        validate_pet(&input)?;

        let pet = self
            .get_pet_by_id(pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?;

        let mut active_pet = pet.into_active_model();
        active_pet.name = Set(input.name);
        active_pet.species = Set(input.species);
        active_pet.breed = Set(Some(input.breed));
        active_pet.age = Set(input.age);
        active_pet.weight = Set(input.weight);
        active_pet.color = Set(Some(input.color));
        active_pet.gender = Set(Some(input.gender));
        active_pet.microchip_id = Set(input.microchip_id);
        active_pet.notes = Set(Some(input.notes));

        let result = active_pet
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(pet_id, "Pet updated");
        Ok(result)
    }

    /// Delete a pet. Returns the id of the customer that owned it.
    pub async fn delete_pet(&self, pet_id: i32) -> Result<i32, RepositoryError> {
        let pet = self
            .get_pet_by_id(pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?;
        let customer_id = pet.customer_id;

        pet.delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(pet_id, customer_id, "Pet deleted");
        Ok(customer_id)
    }

    pub async fn pet_count(&self) -> Result<u64, RepositoryError> {
        Pet::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

fn pet_not_found(pet_id: i32) -> RepositoryError {
    RepositoryError::not_found(format!("Pet {} not found", pet_id))
}

fn validate_pet(input: &PetInput) -> Result<(), RepositoryError> {
    require_non_blank(&input.name, "Name")?;
    require_non_blank(&input.species, "Species")?;
    Ok(())
}
