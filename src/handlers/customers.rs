//! Customer pages: list, detail, add, edit and delete.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::flash::{Flash, FlashQuery, redirect_with_flash};
use super::{MutationError, begin, settle, views};
use crate::error::{PageError, RepositoryError};
use crate::forms::{CustomerForm, CustomerInput};
use crate::models::customer::Model as CustomerModel;
use crate::repositories::CustomerRepository;
use crate::server::AppState;
use crate::telemetry;

/// Dashboard; the same customer table as `/customers`.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    render_list(&state, "Dashboard", query).await
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    render_list(&state, "Customers", query).await
}

async fn render_list(
    state: &AppState,
    title: &str,
    query: FlashQuery,
) -> Result<Html<String>, PageError> {
    let customers = CustomerRepository::new(&state.db)
        .list_customers_with_pets()
        .await?;
    Ok(Html(views::customer_list(
        title,
        &customers,
        query.into_flash().as_ref(),
    )))
}

pub async fn customer_detail(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    let (customer, pets) = CustomerRepository::new(&state.db)
        .get_customer_with_pets(customer_id)
        .await?
        .ok_or_else(|| customer_missing(customer_id))?;

    Ok(Html(views::customer_detail(
        &customer,
        &pets,
        query.into_flash().as_ref(),
    )))
}

pub async fn add_customer_form() -> Html<String> {
    Html(views::customer_form(
        "Add Customer",
        "/add_customer",
        &CustomerForm::default(),
        None,
    ))
}

pub async fn add_customer(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, PageError> {
    let outcome: Result<CustomerModel, MutationError> = async {
        let input = CustomerInput::try_from(form.clone())?;
        let txn = begin(&state.db).await?;
        let result = CustomerRepository::new(&txn).create_customer(input).await;
        Ok(settle(txn, result).await?)
    }
    .await;

    telemetry::record_mutation("customer", "create", outcome.is_ok());
    match outcome {
        Ok(customer) => Ok(redirect_with_flash(
            &format!("/customer/{}", customer.id),
            &Flash::success("Customer added successfully!"),
        )
        .into_response()),
        Err(err) => {
            tracing::warn!(error = %err, "Customer create failed");
            Ok(redisplay(
                "Add Customer",
                "/add_customer",
                &form,
                &format!("Error adding customer: {}", err),
            ))
        }
    }
}

pub async fn edit_customer_form(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let customer = load_customer(&state, customer_id).await?;

    Ok(Html(views::customer_form(
        "Edit Customer",
        &format!("/edit_customer/{}", customer_id),
        &CustomerForm::from(&customer),
        None,
    )))
}

pub async fn edit_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, PageError> {
    // Unknown ids are terminal, whatever the submitted form contains.
    load_customer(&state, customer_id).await?;

    let outcome: Result<CustomerModel, MutationError> = async {
        let input = CustomerInput::try_from(form.clone())?;
        let txn = begin(&state.db).await?;
        let result = CustomerRepository::new(&txn)
            .update_customer(customer_id, input)
            .await;
        Ok(settle(txn, result).await?)
    }
    .await;

    telemetry::record_mutation("customer", "update", outcome.is_ok());
    match outcome {
        Ok(customer) => Ok(redirect_with_flash(
            &format!("/customer/{}", customer.id),
            &Flash::success("Customer updated successfully!"),
        )
        .into_response()),
        Err(err) if err.is_not_found() => Err(customer_missing(customer_id)),
        Err(err) => {
            tracing::warn!(customer_id, error = %err, "Customer update failed");
            Ok(redisplay(
                "Edit Customer",
                &format!("/edit_customer/{}", customer_id),
                &form,
                &format!("Error updating customer: {}", err),
            ))
        }
    }
}

/// Removes the customer and every pet it owns in one transaction.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Response {
    let outcome: Result<u64, RepositoryError> = async {
        let txn = begin(&state.db).await?;
        let result = CustomerRepository::new(&txn)
            .delete_customer(customer_id)
            .await;
        settle(txn, result).await
    }
    .await;

    telemetry::record_mutation("customer", "delete", outcome.is_ok());
    let flash = match outcome {
        Ok(_) => Flash::success("Customer deleted successfully!"),
        Err(err) => {
            tracing::warn!(customer_id, error = %err, "Customer delete failed");
            Flash::error(format!("Error deleting customer: {}", err))
        }
    };
    redirect_with_flash("/customers", &flash).into_response()
}

fn redisplay(title: &str, action: &str, form: &CustomerForm, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::customer_form(title, action, form, Some(message))),
    )
        .into_response()
}

async fn load_customer(state: &AppState, customer_id: i32) -> Result<CustomerModel, PageError> {
    CustomerRepository::new(&state.db)
        .get_customer_by_id(customer_id)
        .await?
        .ok_or_else(|| customer_missing(customer_id))
}

fn customer_missing(customer_id: i32) -> PageError {
    PageError::NotFound(format!("Customer {} not found", customer_id))
}
