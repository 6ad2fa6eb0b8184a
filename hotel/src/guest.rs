//! Guest identities.
//!
//! Accounts are owned by the identity collaborator; the library mirrors the
//! parts it needs (contact details and the staff capability) so reservations
//! can reference a guest and administrative operations can be gated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage identifier of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub i64);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored guest account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Storage identifier.
    pub id: GuestId,
    /// Unique login name.
    pub username: String,
    /// Address confirmations are sent to.
    pub email: String,
    /// Display name used in notifications.
    pub full_name: String,
    /// Hotel staff member.
    pub is_staff: bool,
    /// Administrator.
    pub is_superuser: bool,
}

impl Guest {
    /// Returns whether this identity may perform administrative operations.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::{Guest, GuestId};
    ///
    /// let guest = Guest {
    ///     id: GuestId(1),
    ///     username: "ana".into(),
    ///     email: "ana@example.com".into(),
    ///     full_name: "Ana".into(),
    ///     is_staff: false,
    ///     is_superuser: true,
    /// };
    /// assert!(guest.is_staff_or_admin());
    /// ```
    #[must_use]
    pub const fn is_staff_or_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// Fails with [`Error::Unauthorized`] unless this identity is staff.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` naming `action` for non-staff identities.
    pub fn require_staff(&self, action: &str) -> Result<()> {
        if self.is_staff_or_admin() {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                user: self.username.clone(),
                action: action.to_string(),
            })
        }
    }

    /// Name to greet the guest with, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// A guest account that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    /// Unique login name.
    pub username: String,
    /// Contact e-mail.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Hotel staff member.
    pub is_staff: bool,
    /// Administrator.
    pub is_superuser: bool,
}

impl NewGuest {
    /// Creates a validated, non-staff guest.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the username is blank or contains
    /// whitespace, or if the e-mail has no `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::NewGuest;
    ///
    /// let guest = NewGuest::new("ana", "ana@example.com").unwrap();
    /// assert!(!guest.is_staff);
    /// assert!(NewGuest::new("ana maria", "ana@example.com").is_err());
    /// assert!(NewGuest::new("ana", "not-an-address").is_err());
    /// ```
    pub fn new(username: impl AsRef<str>, email: impl AsRef<str>) -> Result<Self> {
        let username = username.as_ref().trim();
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(Error::Validation {
                field: "username".into(),
                message: format!("invalid username '{username}'"),
            });
        }

        let email = email.as_ref().trim();
        if !email.contains('@') {
            return Err(Error::Validation {
                field: "email".into(),
                message: format!("invalid e-mail address '{email}'"),
            });
        }

        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            full_name: String::new(),
            is_staff: false,
            is_superuser: false,
        })
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl AsRef<str>) -> Self {
        self.full_name = full_name.as_ref().trim().to_string();
        self
    }

    /// Marks the account as staff.
    #[must_use]
    pub const fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    /// Marks the account as administrator.
    #[must_use]
    pub const fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(is_staff: bool) -> Guest {
        Guest {
            id: GuestId(7),
            username: "bob".into(),
            email: "bob@example.com".into(),
            full_name: String::new(),
            is_staff,
            is_superuser: false,
        }
    }

    #[test]
    fn test_require_staff() {
        assert!(guest(true).require_staff("confirm reservations").is_ok());

        let err = guest(false).require_staff("confirm reservations").unwrap_err();
        assert!(matches!(err, Error::Unauthorized { ref user, .. } if user == "bob"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(guest(false).display_name(), "bob");

        let mut named = guest(false);
        named.full_name = "Bob Lee".into();
        assert_eq!(named.display_name(), "Bob Lee");
    }

    #[test]
    fn test_new_guest_builders() {
        let guest = NewGuest::new(" carla ", "carla@example.com")
            .unwrap()
            .with_full_name("Carla Díaz ")
            .staff(true);
        assert_eq!(guest.username, "carla");
        assert_eq!(guest.full_name, "Carla Díaz");
        assert!(guest.is_staff);
        assert!(!guest.is_superuser);
    }
}
