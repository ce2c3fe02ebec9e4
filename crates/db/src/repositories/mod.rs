//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod chat_repo;
pub mod discussion_repo;
pub mod link_repo;
pub mod market_repo;
pub mod member_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod request_repo;
pub mod session_repo;
pub mod skill_repo;
pub mod star_repo;
pub mod university_repo;
pub mod user_repo;

pub use chat_repo::ChatRepo;
pub use discussion_repo::DiscussionRepo;
pub use link_repo::LinkRepo;
pub use market_repo::MarketRepo;
pub use member_repo::MemberRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use request_repo::RequestRepo;
pub use session_repo::SessionRepo;
pub use skill_repo::SkillRepo;
pub use star_repo::StarRepo;
pub use university_repo::UniversityRepo;
pub use user_repo::UserRepo;
