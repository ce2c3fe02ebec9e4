//! The student/mentor tag on a profile.
//!
//! The kind is fixed at signup and stored as a column, so it is resolved
//! at write time; exactly one matching sub-record (student or mentor row)
//! exists per profile.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Student,
    Mentor,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Student => "student",
            ProfileKind::Mentor => "mentor",
        }
    }

    /// Parse the `{kind}` path segment of the signup route.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "student" => Ok(ProfileKind::Student),
            "mentor" => Ok(ProfileKind::Mentor),
            _ => Err(CoreError::Validation("Tipo de usuário inválido!".into())),
        }
    }
}
