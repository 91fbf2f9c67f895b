//! Catalog validation logic.
//!
//! Structural checks only: versions, ids and names. Physical plausibility of
//! a record is judged by the engine when the record is converted.

use crate::schema::Catalog;
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    if catalog.version == 0 || catalog.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: catalog.version,
        });
    }

    check_ids(
        catalog.actuators.iter().map(|a| (a.id.as_str(), a.name.as_str())),
        "actuators",
    )?;
    check_ids(
        catalog.fluids.iter().map(|f| (f.id.as_str(), f.name.as_str())),
        "fluids",
    )?;

    Ok(())
}

fn check_ids<'a>(
    records: impl Iterator<Item = (&'a str, &'a str)>,
    context: &str,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (id, name) in records {
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} id"),
                value: id.to_string(),
                reason: "id must not be empty".to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} '{id}' name"),
                value: name.to_string(),
                reason: "name must not be empty".to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}
