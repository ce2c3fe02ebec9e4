//! Closed category sets for projects and discussions.
//!
//! Each category has a stable machine `value` and a Portuguese
//! `readable` label that the frontend displays verbatim.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Project category. The set is closed; anything else is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Startup,
    JuniorEnterprise,
    Academic,
    SocialProject,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Startup,
        ProjectCategory::JuniorEnterprise,
        ProjectCategory::Academic,
        ProjectCategory::SocialProject,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ProjectCategory::Startup => "startup",
            ProjectCategory::JuniorEnterprise => "junior_enterprise",
            ProjectCategory::Academic => "academic",
            ProjectCategory::SocialProject => "social_project",
        }
    }

    pub fn readable(self) -> &'static str {
        match self {
            ProjectCategory::Startup => "startup",
            ProjectCategory::JuniorEnterprise => "empresa júnior",
            ProjectCategory::Academic => "projeto acadêmico",
            ProjectCategory::SocialProject => "projeto social",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == value)
            .ok_or_else(|| CoreError::Validation("Categoria do projeto inválida!".into()))
    }
}

/// Discussion category attached to project discussion topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionCategory {
    Doubt,
    Suggestion,
    Feedback,
}

impl DiscussionCategory {
    pub const ALL: [DiscussionCategory; 3] = [
        DiscussionCategory::Doubt,
        DiscussionCategory::Suggestion,
        DiscussionCategory::Feedback,
    ];

    pub fn value(self) -> &'static str {
        match self {
            DiscussionCategory::Doubt => "doubt",
            DiscussionCategory::Suggestion => "suggestion",
            DiscussionCategory::Feedback => "feedback",
        }
    }

    pub fn readable(self) -> &'static str {
        match self {
            DiscussionCategory::Doubt => "dúvida",
            DiscussionCategory::Suggestion => "sugestão",
            DiscussionCategory::Feedback => "feedback",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == value)
            .ok_or_else(|| CoreError::Validation("Categoria da discussão inválida!".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_category_roundtrip() {
        for category in ProjectCategory::ALL {
            assert_eq!(ProjectCategory::parse(category.value()).unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_project_category_rejected() {
        let err = ProjectCategory::parse("ngo").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_readable_labels() {
        assert_eq!(ProjectCategory::JuniorEnterprise.readable(), "empresa júnior");
        assert_eq!(DiscussionCategory::Doubt.readable(), "dúvida");
    }
}
