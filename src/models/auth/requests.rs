use super::entities::OtpPurpose;
use crate::models::academics::entities::NewRoleProfile;
use crate::models::academics::taxonomy::{self, GradeLevel, Section, Stream, Subject};
use crate::models::users::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// Email address or FAV ID
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Role profile fields shared by registration and admin user creation
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RoleProfileFields {
    pub grade_level: Option<GradeLevel>,
    pub section: Option<Section>,
    pub stream: Option<Stream>,
    pub subject: Option<Subject>,
    pub qualification: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
}

impl RoleProfileFields {
    /// Validates the fields required by `role` and builds its profile
    pub fn into_profile(self, role: UserRole) -> Result<NewRoleProfile, String> {
        match role {
            UserRole::Admin => Ok(NewRoleProfile::Admin),
            UserRole::Student => {
                let grade_level = self
                    .grade_level
                    .ok_or("Grade level is required for students")?;
                let section = self.section.ok_or("Section is required for students")?;
                taxonomy::validate_placement(grade_level, self.stream)?;
                Ok(NewRoleProfile::Student {
                    grade_level,
                    section,
                    stream: self.stream,
                })
            }
            UserRole::Teacher => {
                let subject = self.subject.ok_or("Subject is required for teachers")?;
                Ok(NewRoleProfile::Teacher {
                    subject,
                    qualification: non_empty(self.qualification),
                })
            }
            UserRole::Parent => Ok(NewRoleProfile::Parent {
                occupation: non_empty(self.occupation),
                address: non_empty(self.address),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(flatten)]
    #[ts(flatten)]
    pub profile: RoleProfileFields,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ResendOtpRequest {
    pub email: String,
    #[serde(default = "default_purpose")]
    pub purpose: OtpPurpose,
}

fn default_purpose() -> OtpPurpose {
    OtpPurpose::Register
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_profile_requires_placement() {
        let fields = RoleProfileFields {
            grade_level: Some(GradeLevel::try_from(11).unwrap()),
            section: Some(Section::try_from("C").unwrap()),
            ..Default::default()
        };
        assert!(fields.into_profile(UserRole::Student).is_err());

        let fields = RoleProfileFields {
            grade_level: Some(GradeLevel::try_from(11).unwrap()),
            section: Some(Section::try_from("C").unwrap()),
            stream: Some(Stream::Social),
            ..Default::default()
        };
        assert!(matches!(
            fields.into_profile(UserRole::Student),
            Ok(NewRoleProfile::Student { .. })
        ));
    }

    #[test]
    fn test_teacher_profile_requires_subject() {
        assert!(
            RoleProfileFields::default()
                .into_profile(UserRole::Teacher)
                .is_err()
        );
        let fields = RoleProfileFields {
            subject: Some(Subject::Physics),
            qualification: Some("  ".into()),
            ..Default::default()
        };
        match fields.into_profile(UserRole::Teacher) {
            Ok(NewRoleProfile::Teacher {
                subject,
                qualification,
            }) => {
                assert_eq!(subject, Subject::Physics);
                assert!(qualification.is_none());
            }
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    #[test]
    fn test_register_request_flattens_profile() {
        let json = r#"{
            "email": "hana@falcon.edu.et",
            "password": "Secret123",
            "full_name": "Hana Tesfaye",
            "role": "student",
            "grade_level": 9,
            "section": "b"
        }"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.role, UserRole::Student);
        assert_eq!(req.profile.section.unwrap().as_str(), "B");
    }
}
