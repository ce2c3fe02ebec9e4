//! Profile entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::{DbId, Timestamp};

/// A profile row from the `profiles` table.
///
/// `kind` mirrors the sub-record: a `student` profile has exactly one
/// `students` row, a `mentor` profile exactly one `mentors` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub linkedin: String,
    pub photo: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A student sub-record row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub profile_id: DbId,
    pub university_id: Option<DbId>,
    pub major_id: Option<DbId>,
}

/// A mentor sub-record row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mentor {
    pub id: DbId,
    pub profile_id: DbId,
}

/// Profile row joined with its username, the shape most list endpoints need.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileWithUsername {
    pub id: DbId,
    pub username: String,
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub linkedin: String,
    pub photo: String,
    pub birth_date: Option<NaiveDate>,
}

/// Everything signup creates in one transaction.
#[derive(Debug, Clone)]
pub struct CreateSignup {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub skill_ids: Vec<DbId>,
    /// Student-only affiliation, resolved by name before the transaction.
    pub university_id: Option<DbId>,
    pub major_id: Option<DbId>,
}

/// DTO for the profile-edit operation. `None` fields keep current values.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub linkedin: Option<String>,
    pub photo: Option<String>,
    pub skill_ids: Vec<DbId>,
    pub university_id: Option<DbId>,
    pub major_id: Option<DbId>,
}

/// Filters for the paged profile directory listing.
#[derive(Debug, Clone, Default)]
pub struct ProfileListFilter {
    pub kind: Option<String>,
    pub university_names: Option<Vec<String>>,
    pub major_names: Option<Vec<String>>,
    pub skill_names: Option<Vec<String>>,
}
