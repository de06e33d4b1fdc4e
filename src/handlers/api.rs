//! # JSON API Handlers
//!
//! Read-only JSON views of customers and pets.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::{ApiError, not_found};
use crate::models::{CustomerRecord, PetRecord};
use crate::repositories::{CustomerRepository, PetRepository};
use crate::server::AppState;

/// List every customer with its pets nested
#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "All customers ordered by id", body = [CustomerRecord]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn api_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerRecord>>, ApiError> {
    let customers = CustomerRepository::new(&state.db)
        .list_customers_with_pets()
        .await?;

    Ok(Json(
        customers
            .iter()
            .map(|(customer, pets)| CustomerRecord::from_parts(customer, pets))
            .collect(),
    ))
}

/// Fetch one customer with its pets
#[utoipa::path(
    get,
    path = "/api/customer/{id}",
    params(
        ("id" = i32, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "The customer", body = CustomerRecord),
        (status = 404, description = "Customer not found", body = ApiError, example = json!({
            "code": "NOT_FOUND",
            "message": "Customer not found",
            "details": {"id": 42},
            "retry_after": null,
            "trace_id": "req-5f0c4f6e-2b8e-4d8e-9d5f-3a2b1c0d9e8f"
        })),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn api_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<CustomerRecord>, ApiError> {
    let (customer, pets) = CustomerRepository::new(&state.db)
        .get_customer_with_pets(customer_id)
        .await?
        .ok_or_else(|| not_found("Customer", customer_id))?;

    Ok(Json(CustomerRecord::from_parts(&customer, &pets)))
}

/// List every pet
#[utoipa::path(
    get,
    path = "/api/pets",
    responses(
        (status = 200, description = "All pets ordered by id", body = [PetRecord]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "pets"
)]
pub async fn api_pets(State(state): State<AppState>) -> Result<Json<Vec<PetRecord>>, ApiError> {
    let pets = PetRepository::new(&state.db).list_pets().await?;
    Ok(Json(pets.iter().map(PetRecord::from).collect()))
}
