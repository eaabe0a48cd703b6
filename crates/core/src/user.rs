//! User payload model.
//!
//! Mirrors the JSON shape returned by `GET /api/?results=N`. Fields the
//! feed does not use (login, dob, nationality, ...) are ignored during
//! deserialization.

use serde::{Deserialize, Serialize};

/// Envelope returned by the user listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Users in upstream order.
    pub results: Vec<User>,
}

/// A single random user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: Name,
    pub email: String,
    pub phone: String,
    /// Avatar URLs. Carried for presentation; the feed never reads them.
    pub picture: Picture,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Honorific, e.g. `"Mr"` or `"Ms"`.
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Name {
    /// Title, first and last name joined by single spaces.
    ///
    /// ```
    /// use userfeed_core::user::Name;
    ///
    /// let name = Name {
    ///     title: "Mr".into(),
    ///     first: "John".into(),
    ///     last: "Doe".into(),
    /// };
    /// assert_eq!(name.full_name(), "Mr John Doe");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.title, self.first, self.last)
    }
}

impl User {
    /// Shorthand for [`Name::full_name`].
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}
