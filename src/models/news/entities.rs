use crate::models::users::entities::UserRole;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub enum Audience {
    All,
    Students,
    Teachers,
    Parents,
}

impl Audience {
    /// The audience value that addresses a role directly
    pub fn for_role(role: UserRole) -> Option<Audience> {
        match role {
            UserRole::Student => Some(Audience::Students),
            UserRole::Teacher => Some(Audience::Teachers),
            UserRole::Parent => Some(Audience::Parents),
            UserRole::Admin => None,
        }
    }

    pub fn includes(self, role: UserRole) -> bool {
        self == Audience::All || role == UserRole::Admin || Audience::for_role(role) == Some(self)
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::All => write!(f, "all"),
            Audience::Students => write!(f, "students"),
            Audience::Teachers => write!(f, "teachers"),
            Audience::Parents => write!(f, "parents"),
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Audience::All),
            "students" => Ok(Audience::Students),
            "teachers" => Ok(Audience::Teachers),
            "parents" => Ok(Audience::Parents),
            _ => Err(format!("Invalid audience: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct News {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl News {
    /// Published news for the viewer's audience; authors and admins see all
    pub fn is_visible_to(&self, viewer_id: i64, role: UserRole) -> bool {
        role == UserRole::Admin
            || self.author_id == viewer_id
            || (self.is_published && self.audience.includes(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_matching() {
        assert!(Audience::All.includes(UserRole::Parent));
        assert!(Audience::Students.includes(UserRole::Student));
        assert!(!Audience::Students.includes(UserRole::Parent));
        assert!(Audience::Parents.includes(UserRole::Admin));
    }

    #[test]
    fn test_drafts_hidden_from_readers() {
        let now = chrono::Utc::now();
        let news = News {
            id: 1,
            author_id: 7,
            title: "Sports day".into(),
            body: "Friday".into(),
            audience: Audience::All,
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        assert!(!news.is_visible_to(8, UserRole::Student));
        assert!(news.is_visible_to(7, UserRole::Teacher));
        assert!(news.is_visible_to(1, UserRole::Admin));
    }
}
