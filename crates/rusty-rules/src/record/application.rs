// File: src/record/application.rs
// Purpose: Application record: applicants keyed by id, each with an address

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::{Entity, Field, Schema};
use crate::value::FieldValue;

pub const APPLICANTS: Field = Field::plain("Applicants");

pub const APPLICATION: Schema = Schema {
    name: "Application",
    fields: &[APPLICANTS],
};

pub const SOCIAL_INSURANCE_NUMBER: Field = Field::plain("SocialInsuranceNumber");
pub const APPLICANT_EMAIL: Field = Field::plain("Email");
pub const APPLICANT_PHONE: Field = Field::plain("Phone");
pub const APPLICANT_ADDRESS: Field = Field::plain("Address");

pub const APPLICANT: Schema = Schema {
    name: "Applicant",
    fields: &[
        SOCIAL_INSURANCE_NUMBER,
        APPLICANT_EMAIL,
        APPLICANT_PHONE,
        APPLICANT_ADDRESS,
    ],
};

pub const STREET: Field = Field::plain("Street");
pub const CITY: Field = Field::plain("City");
pub const COUNTRY_CODE: Field = Field::plain("CountryCode");
pub const POSTAL_CODE: Field = Field::plain("PostalCode");

pub const ADDRESS: Schema = Schema {
    name: "Address",
    fields: &[STREET, CITY, COUNTRY_CODE, POSTAL_CODE],
};

/// Social insurance number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sin(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// `None` entries are applicants that were declared but never filled in
    #[serde(rename = "Applicants", default)]
    pub applicants: BTreeMap<i64, Option<Applicant>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(rename = "SocialInsuranceNumber", default)]
    pub social_insurance_number: Option<Sin>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Address", default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "Street", default)]
    pub street: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "CountryCode", default)]
    pub country_code: String,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: String,
}

impl Entity for Application {
    const SCHEMA: &'static Schema = &APPLICATION;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "Applicants" => FieldValue::Items(
                self.applicants
                    .iter()
                    .map(|(key, applicant)| {
                        let value = match applicant {
                            Some(_) => FieldValue::Record,
                            None => FieldValue::Absent,
                        };
                        (key.to_string(), value)
                    })
                    .collect(),
            ),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Applicant {
    const SCHEMA: &'static Schema = &APPLICANT;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "SocialInsuranceNumber" => self
                .social_insurance_number
                .as_ref()
                .map_or(FieldValue::Absent, |sin| FieldValue::Str(&sin.0)),
            "Email" => self.email.as_ref().into(),
            "Phone" => FieldValue::Str(&self.phone),
            "Address" => FieldValue::Record,
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Address {
    const SCHEMA: &'static Schema = &ADDRESS;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "Street" => FieldValue::Str(&self.street),
            "City" => FieldValue::Str(&self.city),
            "CountryCode" => FieldValue::Str(&self.country_code),
            "PostalCode" => FieldValue::Str(&self.postal_code),
            _ => FieldValue::Absent,
        }
    }
}
