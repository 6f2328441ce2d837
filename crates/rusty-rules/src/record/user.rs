// File: src/record/user.rs
// Purpose: User record with postal addresses and an account

use serde::{Deserialize, Serialize};

use crate::schema::{Entity, Field, Schema};
use crate::value::FieldValue;

pub const LAST_NAME: Field = Field::plain("LastName");
pub const FIRST_NAME: Field = Field::new("FirstName", "FIRSTNAME");
pub const AGE: Field = Field::new("Age", "myAge");
pub const EMAIL: Field = Field::plain("Email");
pub const PHONE: Field = Field::plain("Phone");
pub const ADDRESSES: Field = Field::plain("Addresses");
pub const ACCOUNT: Field = Field::new("Account", "account");

pub const USER: Schema = Schema {
    name: "User",
    fields: &[LAST_NAME, FIRST_NAME, AGE, EMAIL, PHONE, ADDRESSES, ACCOUNT],
};

pub const ZIP_CODE: Field = Field::plain("ZipCode");
pub const PROVINCE: Field = Field::plain("Province");

pub const POSTAL_ADDRESS: Schema = Schema {
    name: "PostalAddress",
    fields: &[ZIP_CODE, PROVINCE],
};

pub const ACCOUNT_ID: Field = Field::new("ID", "anID");
pub const BALANCE: Field = Field::plain("Balance");

pub const ACCOUNT_SCHEMA: Schema = Schema {
    name: "Account",
    fields: &[ACCOUNT_ID, BALANCE],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "LastName", default)]
    pub last_name: String,
    #[serde(rename = "FIRSTNAME", default)]
    pub first_name: String,
    #[serde(rename = "myAge", default)]
    pub age: u8,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Addresses", default)]
    pub addresses: Vec<PostalAddress>,
    #[serde(rename = "account", default)]
    pub account: Option<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "ZipCode", default)]
    pub zip_code: String,
    #[serde(rename = "Province", default)]
    pub province: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "anID", default)]
    pub id: String,
    #[serde(rename = "Balance", default)]
    pub balance: f64,
}

impl Entity for User {
    const SCHEMA: &'static Schema = &USER;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "LastName" => FieldValue::Str(&self.last_name),
            "FirstName" => FieldValue::Str(&self.first_name),
            "Age" => self.age.into(),
            "Email" => FieldValue::Str(&self.email),
            "Phone" => FieldValue::Str(&self.phone),
            "Addresses" => FieldValue::Items(
                (0..self.addresses.len())
                    .map(|i| (i.to_string(), FieldValue::Record))
                    .collect(),
            ),
            "Account" => match self.account {
                Some(_) => FieldValue::Record,
                None => FieldValue::Absent,
            },
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for PostalAddress {
    const SCHEMA: &'static Schema = &POSTAL_ADDRESS;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "ZipCode" => FieldValue::Str(&self.zip_code),
            "Province" => FieldValue::Str(&self.province),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Account {
    const SCHEMA: &'static Schema = &ACCOUNT_SCHEMA;

    fn value(&self, name: &str) -> FieldValue<'_> {
        match name {
            "ID" => FieldValue::Str(&self.id),
            "Balance" => self.balance.into(),
            _ => FieldValue::Absent,
        }
    }
}
