use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::users::models::User;

/// Submitted `tambah`/`ubah` form. Undeclared keys are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[serde(default)]
    #[validate(
        custom(function = "crate::shared::validation::username"),
        length(max = 20, message = "Username must not exceed 20 characters")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(
        custom(function = "crate::shared::validation::not_blank"),
        length(max = 100, message = "Nama must not exceed 100 characters")
    )]
    pub nama: String,

    /// Never echoed back into a rendered form
    #[serde(default, skip_serializing)]
    #[validate(length(min = 5, max = 255, message = "Password must be 5-255 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = "crate::shared::validation::positive_id"))]
    pub level_id: String,
}

/// Typed form values, available once the form has validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub level_id: i64,
    pub username: String,
    pub nama: String,
    pub password: String,
}

impl UserForm {
    pub fn into_input(self) -> Result<UserInput, AppError> {
        let level_id = self
            .level_id
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("level_id must be a number".to_string()))?;

        Ok(UserInput {
            level_id,
            username: self.username.trim().to_string(),
            nama: self.nama.trim().to_string(),
            password: self.password,
        })
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            nama: user.nama.clone(),
            password: String::new(),
            level_id: user.level_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> UserForm {
        UserForm {
            username: "manager_2".to_string(),
            nama: "Manager 2".to_string(),
            password: "12345".to_string(),
            level_id: "2".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let form = valid();
        assert!(form.validate().is_ok());

        let input = form.into_input().unwrap();
        assert_eq!(input.level_id, 2);
        assert_eq!(input.username, "manager_2");
        assert_eq!(input.password, "12345");
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let form = UserForm {
            username: "bad name".to_string(),
            nama: " ".to_string(),
            password: "123".to_string(),
            level_id: "".to_string(),
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["username", "nama", "password", "level_id"] {
            assert!(fields.contains_key(field), "expected error on {}", field);
        }
    }

    #[test]
    fn test_blank_username_has_one_message() {
        let form = UserForm {
            username: String::new(),
            ..valid()
        };
        let errors = form.validate().unwrap_err();
        let messages = crate::shared::validation::field_messages(&errors);
        assert_eq!(messages["username"], vec!["This field is required.".to_string()]);
    }

    #[test]
    fn test_password_is_not_serialized() {
        let json = serde_json::to_string(&valid()).unwrap();
        assert!(!json.contains("12345"));
        assert!(json.contains("manager_2"));
    }
}
