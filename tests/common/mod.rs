#![allow(dead_code)]

use std::sync::Arc;

use falcon_dlms::models::academics::entities::{NewRoleProfile, StudentProfile};
use falcon_dlms::models::academics::{GradeLevel, Section, Subject};
use falcon_dlms::models::users::entities::{User, UserRole, UserStatus};
use falcon_dlms::models::users::requests::NewUser;
use falcon_dlms::storage::{SeaOrmStorage, Storage};
use falcon_dlms::utils::password::hash_password;

pub const PASSWORD: &str = "Falcon2026";

/// Fresh in-memory database with every migration applied
pub async fn storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect(":memory:", 1, 5)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

fn new_user(email: &str, name: &str, role: UserRole) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: hash_password(PASSWORD).expect("hash"),
        full_name: name.to_string(),
        phone: None,
        role,
        status: UserStatus::Active,
    }
}

pub async fn admin(storage: &Arc<dyn Storage>, email: &str) -> User {
    let (user, _) = storage
        .create_user_with_profile(new_user(email, "School Admin", UserRole::Admin), NewRoleProfile::Admin)
        .await
        .expect("create admin");
    user
}

pub async fn teacher(storage: &Arc<dyn Storage>, email: &str, subject: Subject) -> User {
    let profile = NewRoleProfile::Teacher {
        subject,
        qualification: Some("BSc".to_string()),
    };
    let (user, _) = storage
        .create_user_with_profile(new_user(email, "Meron Alemu", UserRole::Teacher), profile)
        .await
        .expect("create teacher");
    user
}

pub async fn student(
    storage: &Arc<dyn Storage>,
    email: &str,
    grade: i32,
    section: &str,
) -> (User, StudentProfile) {
    let profile = NewRoleProfile::Student {
        grade_level: GradeLevel::try_from(grade).expect("grade"),
        section: Section::try_from(section).expect("section"),
        stream: None,
    };
    let (user, profile) = storage
        .create_user_with_profile(new_user(email, "Dawit Bekele", UserRole::Student), profile)
        .await
        .expect("create student");
    (user, profile.expect("student profile"))
}

pub async fn parent(storage: &Arc<dyn Storage>, email: &str) -> User {
    let profile = NewRoleProfile::Parent {
        occupation: Some("Engineer".to_string()),
        address: None,
    };
    let (user, _) = storage
        .create_user_with_profile(new_user(email, "Selam Girma", UserRole::Parent), profile)
        .await
        .expect("create parent");
    user
}
