//! Minimal server-built HTML pages.
//!
//! Every value interpolated into markup goes through [`escape`].

use std::fmt::Write;

use super::flash::{Flash, FlashLevel};
use crate::forms::{CustomerForm, PetForm};
use crate::models::{customer, pet};

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let notice = match flash {
        Some(flash) => {
            let class = match flash.level {
                FlashLevel::Success => "flash flash-success",
                FlashLevel::Error => "flash flash-error",
            };
            format!(
                "<div class=\"{}\" role=\"alert\">{}</div>\n",
                class,
                escape(&flash.message)
            )
        }
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title} | Veterinary CRM</title>\n</head>\n<body>\n<nav><a href=\"/\">Dashboard</a> | <a href=\"/customers\">Customers</a> | <a href=\"/add_customer\">Add customer</a></nav>\n{notice}<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
        notice = notice,
        body = body,
    )
}

fn opt(value: &Option<String>) -> String {
    escape(value.as_deref().unwrap_or(""))
}

/// Customer table shared by the dashboard and the customer list.
pub fn customer_list(
    title: &str,
    customers: &[(customer::Model, Vec<pet::Model>)],
    flash: Option<&Flash>,
) -> String {
    let mut body = String::new();
    if customers.is_empty() {
        body.push_str("<p>No customers yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Email</th><th>Phone</th><th>Pets</th></tr></thead>\n<tbody>\n",
        );
        for (customer, pets) in customers {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"/customer/{id}\">{name}</a></td><td>{email}</td><td>{phone}</td><td>{pets}</td></tr>",
                id = customer.id,
                name = escape(&customer.full_name()),
                email = escape(&customer.email),
                phone = escape(&customer.phone),
                pets = pets.len(),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    layout(title, flash, &body)
}

pub fn customer_detail(
    customer: &customer::Model,
    pets: &[pet::Model],
    flash: Option<&Flash>,
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<dl>\n<dt>Email</dt><dd>{email}</dd>\n<dt>Phone</dt><dd>{phone}</dd>\n<dt>Address</dt><dd>{address}</dd>\n</dl>\n<p><a href=\"/edit_customer/{id}\">Edit customer</a> | <a href=\"/add_pet/{id}\">Add pet</a></p>\n<form method=\"post\" action=\"/delete_customer/{id}\"><button type=\"submit\">Delete customer and all pets</button></form>\n<h2>Pets</h2>\n",
        email = escape(&customer.email),
        phone = escape(&customer.phone),
        address = opt(&customer.address),
        id = customer.id,
    );

    if pets.is_empty() {
        body.push_str("<p>No pets registered.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Species</th><th>Breed</th><th>Age</th><th>Weight</th><th>Microchip</th><th></th></tr></thead>\n<tbody>\n",
        );
        for pet in pets {
            let _ = writeln!(
                body,
                "<tr><td>{name}</td><td>{species}</td><td>{breed}</td><td>{age}</td><td>{weight}</td><td>{chip}</td><td><a href=\"/edit_pet/{id}\">Edit</a> <form method=\"post\" action=\"/delete_pet/{id}\"><button type=\"submit\">Delete</button></form></td></tr>",
                name = escape(&pet.name),
                species = escape(&pet.species),
                breed = opt(&pet.breed),
                age = pet.age.map(|age| age.to_string()).unwrap_or_default(),
                weight = pet.weight.map(|weight| weight.to_string()).unwrap_or_default(),
                chip = opt(&pet.microchip_id),
                id = pet.id,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout(&customer.full_name(), flash, &body)
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| {
            format!(
                "<div class=\"flash flash-error\" role=\"alert\">{}</div>\n",
                escape(message)
            )
        })
        .unwrap_or_default()
}

fn text_input(name: &str, label: &str, value: &Option<String>, required: bool) -> String {
    format!(
        "<label>{label}<input type=\"text\" name=\"{name}\" value=\"{value}\"{required}></label>\n",
        label = escape(label),
        name = name,
        value = opt(value),
        required = if required { " required" } else { "" },
    )
}

pub fn customer_form(title: &str, action: &str, form: &CustomerForm, error: Option<&str>) -> String {
    let mut body = error_block(error);
    let _ = write!(body, "<form method=\"post\" action=\"{}\">\n", escape(action));
    body.push_str(&text_input("first_name", "First name", &form.first_name, true));
    body.push_str(&text_input("last_name", "Last name", &form.last_name, true));
    body.push_str(&text_input("email", "Email", &form.email, true));
    body.push_str(&text_input("phone", "Phone", &form.phone, true));
    let _ = write!(
        body,
        "<label>Address<textarea name=\"address\">{}</textarea></label>\n",
        opt(&form.address)
    );
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    layout(title, None, &body)
}

pub fn pet_form(
    title: &str,
    action: &str,
    owner: &customer::Model,
    form: &PetForm,
    error: Option<&str>,
) -> String {
    let mut body = error_block(error);
    let _ = write!(
        body,
        "<p>Owner: <a href=\"/customer/{}\">{}</a></p>\n<form method=\"post\" action=\"{}\">\n",
        owner.id,
        escape(&owner.full_name()),
        escape(action)
    );
    body.push_str(&text_input("name", "Name", &form.name, true));
    body.push_str(&text_input("species", "Species", &form.species, true));
    body.push_str(&text_input("breed", "Breed", &form.breed, false));
    body.push_str(&text_input("age", "Age (years)", &form.age, false));
    body.push_str(&text_input("weight", "Weight", &form.weight, false));
    body.push_str(&text_input("color", "Color", &form.color, false));
    body.push_str(&text_input("gender", "Gender", &form.gender, false));
    body.push_str(&text_input("microchip_id", "Microchip ID", &form.microchip_id, false));
    let _ = write!(
        body,
        "<label>Notes<textarea name=\"notes\">{}</textarea></label>\n",
        opt(&form.notes)
    );
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    layout(title, None, &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(title, None, &format!("<p>{}</p>\n", escape(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_form_redisplays_submitted_values_escaped() {
        let form = CustomerForm {
            first_name: Some("<script>".to_string()),
            ..Default::default()
        };
        let html = customer_form("Add customer", "/add_customer", &form, Some("Email is required"));

        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Email is required"));
    }

    #[test]
    fn test_layout_renders_flash() {
        let html = error_page("Not Found", "Customer 3 not found");
        assert!(html.contains("<h1>Not Found</h1>"));
        assert!(html.contains("Customer 3 not found"));

        let html = customer_list("Customers", &[], Some(&Flash::success("Customer deleted successfully!")));
        assert!(html.contains("flash-success"));
        assert!(html.contains("No customers yet."));
    }
}
