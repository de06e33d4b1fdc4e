//! Database migrations for the clinic CRM.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_10_17_090000_create_customers;
mod m2025_10_17_090100_create_pets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_10_17_090000_create_customers::Migration),
            Box::new(m2025_10_17_090100_create_pets::Migration),
        ]
    }
}
