//! Visitor log models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{optional, required, Collection, Record};
use crate::error::FarmResult;

/// A person who entered the farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: String,
    /// Visit date
    pub date: NaiveDate,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub purpose: String,
}

impl Record for Visitor {
    const COLLECTION: Collection = Collection::Visitors;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Visitor form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVisitor {
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub mobile: String,
    pub address: Option<String>,
    pub purpose: String,
}

impl NewVisitor {
    pub(crate) fn into_record(self, id: String, today: NaiveDate) -> FarmResult<Visitor> {
        Ok(Visitor {
            id,
            date: today,
            name: required("name", &self.name)?,
            dob: self.dob,
            mobile: required("mobile", &self.mobile)?,
            address: optional(self.address.as_deref()),
            purpose: required("purpose", &self.purpose)?,
        })
    }
}
