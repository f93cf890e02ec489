//! User input, output and change shapes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User creation input. Fields are copied one-to-one onto the new row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UserIn {
    /// Unique display name
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    /// Unique email address
    #[validate(
        email(message = "Invalid email format"),
        length(max = 320, message = "Email must be at most 320 characters")
    )]
    pub email: String,
    /// Stored password
    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: String,
}

impl UserIn {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Field changes for an existing user.
///
/// `None` means "leave the column unchanged"; there is no way to clear a
/// column through this shape. Also used as the overlay of server-set fields
/// on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub uuid: Option<Uuid>,
    pub superuser: Option<bool>,
    pub deleted: Option<bool>,
}

impl UserChanges {
    /// Change set touching only the name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// User output (safe to return to clients)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub name: String,
    pub email: String,
    pub uuid: Uuid,
}
