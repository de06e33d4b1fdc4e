//! One-shot notices carried across redirects.
//!
//! There is no server-side session: the notice travels in the redirect
//! target's query string (`notice`, `level`) and the landing page renders it.

use axum::response::Redirect;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Query parameters a redirect target may receive.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub notice: Option<String>,
    pub level: Option<String>,
}

impl FlashQuery {
    pub fn into_flash(self) -> Option<Flash> {
        let message = self.notice.filter(|notice| !notice.is_empty())?;
        let level = match self.level.as_deref() {
            Some("error") => FlashLevel::Error,
            _ => FlashLevel::Success,
        };
        Some(Flash { level, message })
    }
}

/// 303 redirect to `path` carrying `flash`.
pub fn redirect_with_flash(path: &str, flash: &Flash) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("notice", &flash.message)
        .append_pair("level", flash.level.as_str())
        .finish();
    Redirect::to(&format!("{}?{}", path, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn test_redirect_encodes_notice() {
        let response =
            redirect_with_flash("/customer/3", &Flash::error("Error adding pet: age & weight"))
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(
            location,
            "/customer/3?notice=Error+adding+pet%3A+age+%26+weight&level=error"
        );
    }

    #[test]
    fn test_query_into_flash() {
        let query = FlashQuery {
            notice: Some("Customer added successfully!".to_string()),
            level: None,
        };
        assert_eq!(
            query.into_flash(),
            Some(Flash::success("Customer added successfully!"))
        );

        let empty = FlashQuery {
            notice: Some(String::new()),
            level: Some("error".to_string()),
        };
        assert_eq!(empty.into_flash(), None);
    }
}
