//! Test utilities for database testing.
//!
//! In-memory SQLite with every migration applied. Foreign keys stay enforced
//! so the cascade from customers to pets behaves as it does in production.

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use vet_crm::forms::{CustomerInput, PetInput};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Customer fixture; `email` keeps fixtures unique.
pub fn customer_input(first_name: &str, email: &str) -> CustomerInput {
    CustomerInput {
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: "555-1234".to_string(),
        address: String::new(),
    }
}

/// Pet fixture with only the mandatory fields filled in.
pub fn pet_input(name: &str, species: &str) -> PetInput {
    PetInput {
        name: name.to_string(),
        species: species.to_string(),
        breed: String::new(),
        age: None,
        weight: None,
        color: String::new(),
        gender: String::new(),
        microchip_id: None,
        notes: String::new(),
    }
}
