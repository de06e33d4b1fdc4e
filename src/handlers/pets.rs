//! Pet pages. Pets are always reached through their owner.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::flash::{Flash, redirect_with_flash};
use super::{MutationError, begin, settle, views};
use crate::error::{PageError, RepositoryError};
use crate::forms::{PetForm, PetInput};
use crate::models::customer::Model as CustomerModel;
use crate::models::pet::Model as PetModel;
use crate::repositories::{CustomerRepository, PetRepository};
use crate::server::AppState;
use crate::telemetry;

pub async fn add_pet_form(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let owner = load_owner(&state, customer_id).await?;

    Ok(Html(views::pet_form(
        "Add Pet",
        &format!("/add_pet/{}", customer_id),
        &owner,
        &PetForm::default(),
        None,
    )))
}

pub async fn add_pet(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Form(form): Form<PetForm>,
) -> Result<Response, PageError> {
    let owner = load_owner(&state, customer_id).await?;

    let outcome: Result<PetModel, MutationError> = async {
        let input = PetInput::try_from(form.clone())?;
        let txn = begin(&state.db).await?;
        let result = PetRepository::new(&txn).create_pet(customer_id, input).await;
        Ok(settle(txn, result).await?)
    }
    .await;

    telemetry::record_mutation("pet", "create", outcome.is_ok());
    match outcome {
        Ok(pet) => Ok(redirect_with_flash(
            &format!("/customer/{}", pet.customer_id),
            &Flash::success("Pet added successfully!"),
        )
        .into_response()),
        // The owner can disappear between the page load and the write.
        Err(err) => {
            tracing::warn!(customer_id, error = %err, "Pet create failed");
            Ok(redisplay(
                "Add Pet",
                &format!("/add_pet/{}", customer_id),
                &owner,
                &form,
                &format!("Error adding pet: {}", err),
            ))
        }
    }
}

pub async fn edit_pet_form(
    State(state): State<AppState>,
    Path(pet_id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let (pet, owner) = load_pet_with_owner(&state, pet_id).await?;

    Ok(Html(views::pet_form(
        "Edit Pet",
        &format!("/edit_pet/{}", pet_id),
        &owner,
        &PetForm::from(&pet),
        None,
    )))
}

pub async fn edit_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i32>,
    Form(form): Form<PetForm>,
) -> Result<Response, PageError> {
    let (_, owner) = load_pet_with_owner(&state, pet_id).await?;

    let outcome: Result<PetModel, MutationError> = async {
        let input = PetInput::try_from(form.clone())?;
        let txn = begin(&state.db).await?;
        let result = PetRepository::new(&txn).update_pet(pet_id, input).await;
        Ok(settle(txn, result).await?)
    }
    .await;

    telemetry::record_mutation("pet", "update", outcome.is_ok());
    match outcome {
        Ok(pet) => Ok(redirect_with_flash(
            &format!("/customer/{}", pet.customer_id),
            &Flash::success("Pet updated successfully!"),
        )
        .into_response()),
        Err(err) if err.is_not_found() => Err(pet_missing(pet_id)),
        Err(err) => {
            tracing::warn!(pet_id, error = %err, "Pet update failed");
            Ok(redisplay(
                "Edit Pet",
                &format!("/edit_pet/{}", pet_id),
                &owner,
                &form,
                &format!("Error updating pet: {}", err),
            ))
        }
    }
}

pub async fn delete_pet(State(state): State<AppState>, Path(pet_id): Path<i32>) -> Response {
    let outcome: Result<i32, RepositoryError> = async {
        let txn = begin(&state.db).await?;
        let result = PetRepository::new(&txn).delete_pet(pet_id).await;
        settle(txn, result).await
    }
    .await;

    telemetry::record_mutation("pet", "delete", outcome.is_ok());
    match outcome {
        Ok(customer_id) => redirect_with_flash(
            &format!("/customer/{}", customer_id),
            &Flash::success("Pet deleted successfully!"),
        )
        .into_response(),
        Err(err) => {
            tracing::warn!(pet_id, error = %err, "Pet delete failed");
            redirect_with_flash("/", &Flash::error(format!("Error deleting pet: {}", err)))
                .into_response()
        }
    }
}

async fn load_owner(state: &AppState, customer_id: i32) -> Result<CustomerModel, PageError> {
    CustomerRepository::new(&state.db)
        .get_customer_by_id(customer_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Customer {} not found", customer_id)))
}

async fn load_pet_with_owner(
    state: &AppState,
    pet_id: i32,
) -> Result<(PetModel, CustomerModel), PageError> {
    let pet = PetRepository::new(&state.db)
        .get_pet_by_id(pet_id)
        .await?
        .ok_or_else(|| pet_missing(pet_id))?;
    let owner = load_owner(state, pet.customer_id).await?;
    Ok((pet, owner))
}

fn redisplay(
    title: &str,
    action: &str,
    owner: &CustomerModel,
    form: &PetForm,
    message: &str,
) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::pet_form(title, action, owner, form, Some(message))),
    )
        .into_response()
}

fn pet_missing(pet_id: i32) -> PageError {
    PageError::NotFound(format!("Pet {} not found", pet_id))
}
