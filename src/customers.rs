//! Customer records and their row mappers.

use crate::core::db::{FromRow, Row};
use crate::core::MappingError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names produced by the customer query
pub mod columns {
    pub const ID: &str = "CustomerIdentifier";
    pub const COMPANY_NAME: &str = "CompanyName";
    pub const CONTACT_NAME: &str = "ContactName";
    pub const CONTACT_TITLE: &str = "ContactTitle";
    pub const STREET: &str = "Street";
    pub const CITY: &str = "City";
    pub const REGION: &str = "Region";
    pub const POSTAL_CODE: &str = "PostalCode";
    pub const COUNTRY: &str = "Country";
    pub const PHONE: &str = "Phone";
    pub const FAX: &str = "Fax";
    pub const CONTACT_TYPE_ID: &str = "ContactTypeIdentifier";
    pub const MODIFIED_DATE: &str = "ModifiedDate";
}

/// A customer joined with its contact type.
///
/// Optional fields are `None` when the store holds `NULL`; callers wanting
/// empty strings convert explicitly. A customer without a contact type has
/// neither `contact_type_id` nor `contact_title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: Option<String>,
    pub street: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub phone: String,
    pub fax: Option<String>,
    pub contact_type_id: Option<i64>,
    pub modified_date: Option<NaiveDateTime>,
}

impl FromRow for Customer {
    fn from_row(row: &Row) -> Result<Self, MappingError> {
        Ok(Customer {
            id: row.integer(columns::ID)?,
            company_name: row.text(columns::COMPANY_NAME)?,
            contact_name: row.text(columns::CONTACT_NAME)?,
            contact_title: row.optional_text(columns::CONTACT_TITLE)?,
            street: row.text(columns::STREET)?,
            city: row.text(columns::CITY)?,
            region: row.optional_text(columns::REGION)?,
            postal_code: row.optional_text(columns::POSTAL_CODE)?,
            country: row.text(columns::COUNTRY)?,
            phone: row.text(columns::PHONE)?,
            fax: row.optional_text(columns::FAX)?,
            contact_type_id: row.optional_integer(columns::CONTACT_TYPE_ID)?,
            modified_date: row.optional_timestamp(columns::MODIFIED_DATE)?,
        })
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.id, self.company_name)
    }
}

/// Contact name and title of a single customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub contact_name: String,
    pub contact_title: Option<String>,
}

impl FromRow for ContactInfo {
    fn from_row(row: &Row) -> Result<Self, MappingError> {
        Ok(ContactInfo {
            contact_name: row.text(columns::CONTACT_NAME)?,
            contact_title: row.optional_text(columns::CONTACT_TITLE)?,
        })
    }
}
