//! Field validation helpers.
//!
//! Every check returns `Err(CoreError::Validation)` with the exact
//! Portuguese message the API answers with, so handlers can `?` straight
//! through. Checks are ordered by the caller; messages never leak which
//! parser failed.

use chrono::{NaiveDate, Utc};

use crate::error::CoreError;

/// Oldest accepted age, expressed in weeks (~150 years).
const MAX_AGE_WEEKS: i64 = 7800;

pub const BLANK_FIELD_MSG: &str = "Todos os campos devem ser preenchidos!";
pub const CHAR_LIMIT_MSG: &str = "Respeite os limites de caracteres de cada campo!";
pub const INVALID_BIRTH_DATE_MSG: &str = "Data de nascimento inválida!";

fn validation(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

/// Reject if any of the given fields is empty after trimming.
pub fn require_filled(fields: &[&str]) -> Result<(), CoreError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(validation(BLANK_FIELD_MSG));
    }
    Ok(())
}

/// Reject if any `(value, limit)` pair exceeds its character limit.
///
/// Limits are counted in characters, not bytes, so accented names are
/// measured the way the frontend counts them.
pub fn enforce_char_limits(fields: &[(&str, usize)]) -> Result<(), CoreError> {
    if fields.iter().any(|(value, limit)| value.chars().count() > *limit) {
        return Err(validation(CHAR_LIMIT_MSG));
    }
    Ok(())
}

/// Password rules: confirmation must match, minimum 6 characters.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(validation("As senhas devem ser iguais!"));
    }
    if password.chars().count() < 6 {
        return Err(validation("A senha deve ter pelo menos 6 caracteres!"));
    }
    Ok(())
}

/// Parse an ISO-8601 birth date and check the age is positive and sane.
pub fn validate_birth_date(birth_date: &str) -> Result<NaiveDate, CoreError> {
    let date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map_err(|_| validation(INVALID_BIRTH_DATE_MSG))?;

    let today = Utc::now().date_naive();
    let age = today.signed_duration_since(date);

    if age <= chrono::Duration::zero() || age >= chrono::Duration::weeks(MAX_AGE_WEEKS) {
        return Err(validation(INVALID_BIRTH_DATE_MSG));
    }

    Ok(date)
}

/// Normalize a username: trimmed, lowercased, inner spaces removed.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase().replace(' ', "")
}

/// Normalize a lookup-table name (skill/market/major): trimmed, lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
