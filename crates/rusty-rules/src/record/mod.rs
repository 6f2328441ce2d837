// File: src/record/mod.rs
// Purpose: The closed set of validated record types

pub mod application;
pub mod user;

pub use application::{Address, Applicant, Application, Sin};
pub use user::{Account, PostalAddress, User};

use crate::schema::{Entity, Schema};

/// Every entity a rule map may target.
pub static SCHEMAS: &[&Schema] = &[
    &user::USER,
    &user::POSTAL_ADDRESS,
    &user::ACCOUNT_SCHEMA,
    &application::APPLICATION,
    &application::APPLICANT,
    &application::ADDRESS,
];

/// A record handed to the dispatcher, tagged by type.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    User(&'a User),
    Application(&'a Application),
}

impl Record<'_> {
    /// Name of the root entity, used as the first path segment
    pub fn entity_name(&self) -> &'static str {
        match self {
            Record::User(_) => User::SCHEMA.name,
            Record::Application(_) => Application::SCHEMA.name,
        }
    }
}

impl<'a> From<&'a User> for Record<'a> {
    fn from(user: &'a User) -> Self {
        Record::User(user)
    }
}

impl<'a> From<&'a Application> for Record<'a> {
    fn from(application: &'a Application) -> Self {
        Record::Application(application)
    }
}
