//! # Form Inputs
//!
//! Typed wire shapes for the HTML forms and their validated counterparts.
//! Every mutating handler converts its form exactly once, before opening a
//! transaction; repositories only ever see the validated input types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{customer, pet};

/// Failures converting a submitted form into a validated input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Customer form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Validated customer fields, used for both create and full-overwrite update.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl TryFrom<CustomerForm> for CustomerInput {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: required(form.first_name, "first_name")?,
            last_name: required(form.last_name, "last_name")?,
            email: required(form.email, "email")?,
            phone: required(form.phone, "phone")?,
            address: form.address.unwrap_or_default(),
        })
    }
}

impl From<&customer::Model> for CustomerForm {
    fn from(customer: &customer::Model) -> Self {
        Self {
            first_name: Some(customer.first_name.clone()),
            last_name: Some(customer.last_name.clone()),
            email: Some(customer.email.clone()),
            phone: Some(customer.phone.clone()),
            address: customer.address.clone(),
        }
    }
}

/// Pet form as submitted by the browser. Numeric fields arrive as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetForm {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub microchip_id: Option<String>,
    pub notes: Option<String>,
}

/// Validated pet fields, used for both create and full-overwrite update.
#[derive(Debug, Clone, PartialEq)]
pub struct PetInput {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub color: String,
    pub gender: String,
    /// Blank input becomes `None`; only present microchips must be unique.
    pub microchip_id: Option<String>,
    pub notes: String,
}

impl TryFrom<PetForm> for PetInput {
    type Error = FormError;

    fn try_from(form: PetForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(form.name, "name")?,
            species: required(form.species, "species")?,
            breed: form.breed.unwrap_or_default(),
            age: parse_optional_int("age", form.age.as_deref())?,
            weight: parse_optional_float("weight", form.weight.as_deref())?,
            color: form.color.unwrap_or_default(),
            gender: form.gender.unwrap_or_default(),
            microchip_id: form
                .microchip_id
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            notes: form.notes.unwrap_or_default(),
        })
    }
}

impl From<&pet::Model> for PetForm {
    fn from(pet: &pet::Model) -> Self {
        Self {
            name: Some(pet.name.clone()),
            species: Some(pet.species.clone()),
            breed: pet.breed.clone(),
            age: pet.age.map(|age| age.to_string()),
            weight: pet.weight.map(|weight| weight.to_string()),
            color: pet.color.clone(),
            gender: pet.gender.clone(),
            microchip_id: pet.microchip_id.clone(),
            notes: pet.notes.clone(),
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FormError> {
    value.ok_or(FormError::MissingField(field))
}

/// Blank or absent means "no value", which is distinct from zero.
pub fn parse_optional_int(field: &'static str, raw: Option<&str>) -> Result<Option<i32>, FormError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| FormError::InvalidInteger {
            field,
            value: text.to_string(),
        })
}

/// Blank or absent means "no value". Non-finite numbers are rejected.
pub fn parse_optional_float(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<f64>, FormError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FormError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet_form(age: Option<&str>, weight: Option<&str>) -> PetForm {
        PetForm {
            name: Some("Rex".to_string()),
            species: Some("Dog".to_string()),
            age: age.map(str::to_string),
            weight: weight.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_age_is_none_not_zero() {
        let input = PetInput::try_from(pet_form(Some(""), None)).unwrap();
        assert_eq!(input.age, None);

        let input = PetInput::try_from(pet_form(Some("0"), None)).unwrap();
        assert_eq!(input.age, Some(0));
    }

    #[test]
    fn test_non_numeric_age_is_rejected() {
        let err = PetInput::try_from(pet_form(Some("abc"), None)).unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidInteger {
                field: "age",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_weight_parsing() {
        let input = PetInput::try_from(pet_form(Some(" 3 "), Some("12.5"))).unwrap();
        assert_eq!(input.age, Some(3));
        assert_eq!(input.weight, Some(12.5));

        assert!(matches!(
            PetInput::try_from(pet_form(None, Some("heavy"))),
            Err(FormError::InvalidNumber { field: "weight", .. })
        ));
        assert!(matches!(
            PetInput::try_from(pet_form(None, Some("NaN"))),
            Err(FormError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_blank_microchip_becomes_none() {
        let mut form = pet_form(None, None);
        form.microchip_id = Some("   ".to_string());
        assert_eq!(PetInput::try_from(form).unwrap().microchip_id, None);
    }

    #[test]
    fn test_missing_species_is_rejected() {
        let mut form = pet_form(None, None);
        form.species = None;
        assert_eq!(
            PetInput::try_from(form).unwrap_err(),
            FormError::MissingField("species")
        );
    }

    #[test]
    fn test_customer_form_conversion() {
        let form = CustomerForm {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("555-1234".to_string()),
            address: None,
        };
        let input = CustomerInput::try_from(form).unwrap();
        assert_eq!(input.address, "");

        let missing = CustomerForm {
            email: None,
            ..Default::default()
        };
        assert_eq!(
            CustomerInput::try_from(missing).unwrap_err(),
            FormError::MissingField("first_name")
        );
    }
}
