//! Pet entity model
//!
//! This module contains the SeaORM entity model for the pets table. Each pet
//! belongs to exactly one customer.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::customer;
use super::format_timestamp;

/// Pet entity representing an animal owned by a customer
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    /// Unique identifier for the pet (primary key, auto-assigned)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Dog, Cat, Bird, ...
    pub species: String,

    pub breed: Option<String>,

    /// Age in years; `None` means unknown, which is distinct from zero
    pub age: Option<i32>,

    pub weight: Option<f64>,

    pub color: Option<String>,

    pub gender: Option<String>,

    /// Microchip identifier, unique across all pets when present
    #[sea_orm(unique)]
    pub microchip_id: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    /// Owning customer
    pub customer_id: i32,

    pub created_at: Option<DateTimeUtc>,

    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            self.created_at = Set(Some(now));
        }
        self.updated_at = Set(Some(now));
        Ok(self)
    }
}

/// Serialized pet mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetRecord {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Rex")]
    pub name: String,
    #[schema(example = "Dog")]
    pub species: String,
    pub breed: Option<String>,
    #[schema(example = 3)]
    pub age: Option<i32>,
    #[schema(example = 12.5)]
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub microchip_id: Option<String>,
    pub notes: Option<String>,
    pub customer_id: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Model> for PetRecord {
    fn from(pet: &Model) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            age: pet.age,
            weight: pet.weight,
            color: pet.color.clone(),
            gender: pet.gender.clone(),
            microchip_id: pet.microchip_id.clone(),
            notes: pet.notes.clone(),
            customer_id: pet.customer_id,
            created_at: format_timestamp(pet.created_at),
            updated_at: format_timestamp(pet.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pet_record_keeps_missing_age_distinct_from_zero() {
        let mut pet = Model {
            id: 1,
            name: "Tom".to_string(),
            species: "Cat".to_string(),
            breed: None,
            age: None,
            weight: Some(4.2),
            color: Some("grey".to_string()),
            gender: Some("Male".to_string()),
            microchip_id: Some("985112003456789".to_string()),
            notes: None,
            customer_id: 2,
            created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
            updated_at: Some(Utc.with_ymd_and_hms(2025, 3, 2, 12, 0, 0).unwrap()),
        };

        let value = serde_json::to_value(PetRecord::from(&pet)).unwrap();
        assert!(value["age"].is_null());
        assert_eq!(value["weight"], 4.2);
        assert_eq!(value["updated_at"], "2025-03-02T12:00:00.000000Z");

        pet.age = Some(0);
        let value = serde_json::to_value(PetRecord::from(&pet)).unwrap();
        assert_eq!(value["age"], 0);
    }
}
