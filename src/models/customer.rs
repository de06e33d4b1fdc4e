//! Customer entity model
//!
//! This module contains the SeaORM entity model for the customers table,
//! which stores the clinic's clients. A customer owns zero or more pets.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format_timestamp;
use super::pet::{self, PetRecord};

/// Customer entity representing a clinic client
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer (primary key, auto-assigned)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Contact email, unique across all customers
    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    /// Postal address (optional free text)
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    /// Timestamp when the customer was created
    pub created_at: Option<DateTimeUtc>,

    /// Timestamp of the last mutation
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pet::Entity")]
    Pet,
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pet.def()
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

/// Serialized customer mapping, including the customer's pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerRecord {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "555-1234")]
    pub phone: String,
    pub address: Option<String>,
    /// Creation timestamp (RFC 3339), null when unknown
    #[schema(example = "2025-10-17T09:30:00.000000Z")]
    pub created_at: Option<String>,
    /// Last update timestamp (RFC 3339), null when unknown
    pub updated_at: Option<String>,
    pub pets: Vec<PetRecord>,
}

impl CustomerRecord {
    /// Builds the mapping for a customer and the pets it owns.
    pub fn from_parts(customer: &Model, pets: &[pet::Model]) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            created_at: format_timestamp(customer.created_at),
            updated_at: format_timestamp(customer.updated_at),
            pets: pets.iter().map(PetRecord::from).collect(),
        }
    }
}

impl Model {
    /// Full name as shown on pages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
