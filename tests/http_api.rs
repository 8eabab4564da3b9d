mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use serde_json::{Value, json};

use falcon_dlms::cache::ObjectCache;
use falcon_dlms::cache::object_cache::moka::MokaCacheWrapper;
use falcon_dlms::mail::{LogMailer, Mailer};
use falcon_dlms::models::academics::{GradeLevel, Section, Subject};
use falcon_dlms::models::assignments::requests::CreateAssignmentRequest;
use falcon_dlms::models::auth::entities::{OtpChallenge, OtpPurpose};
use falcon_dlms::models::parents::entities::LinkStatus;
use falcon_dlms::models::quizzes::entities::{Quiz, QuestionType};
use falcon_dlms::models::quizzes::requests::{CreateQuizRequest, NewQuestion};
use falcon_dlms::models::users::entities::{User, UserStatus};
use falcon_dlms::routes;
use falcon_dlms::storage::Storage;

fn new_cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::with_settings(1000, 60))
}

macro_rules! init_app {
    ($storage:expr) => {
        init_app!($storage, new_cache())
    };
    ($storage:expr, $cache:expr) => {{
        let cache: Arc<dyn ObjectCache> = $cache;
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
        let storage: Arc<dyn Storage> = $storage;
        test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(mailer))
                .configure(routes::configure_all),
        )
        .await
    }};
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = user.generate_access_token().expect("access token");
    ("Authorization", format!("Bearer {token}"))
}

// auth presets count per address, so each test signs in from its own
fn peer(n: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, n], 40000))
}

async fn quiz_with_question(
    storage: &Arc<dyn Storage>,
    teacher: &User,
    available_until: Option<chrono::DateTime<Utc>>,
) -> (Quiz, i64) {
    let quiz = storage
        .create_quiz(
            teacher.id,
            CreateQuizRequest {
                title: "Motion basics".to_string(),
                description: None,
                subject: Subject::Physics,
                grade_level: GradeLevel::try_from(9).unwrap(),
                section: None,
                time_limit_minutes: None,
                available_from: None,
                available_until,
            },
        )
        .await
        .unwrap();
    let question = storage
        .add_question(
            quiz.id,
            NewQuestion {
                question_text: "Speed is a vector quantity".to_string(),
                question_type: QuestionType::TrueFalse,
                options: Vec::new(),
                correct_answer: "false".to_string(),
                points: 2,
                position: None,
            },
        )
        .await
        .unwrap();
    let quiz = storage
        .set_quiz_published(quiz.id, true)
        .await
        .unwrap()
        .expect("published quiz");
    (quiz, question.id)
}

#[actix_web::test]
async fn test_taxonomy_is_public() {
    let app = init_app!(common::storage().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/academics/taxonomy")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["grade_levels"].as_array().map(Vec::len), Some(4));
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_protected_routes_need_a_token() {
    let app = init_app!(common::storage().await);

    let req = test::TestRequest::get().uri("/api/v1/quizzes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_login_then_load_own_account() {
    let storage = common::storage().await;
    let (_, profile) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let app = init_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer(1))
        .set_json(json!({ "identifier": profile.fav_id.as_str(), "password": common::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string();
    assert_eq!(body["data"]["user"]["role"], "student");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // students cannot reach the admin user directory
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let storage = common::storage().await;
    common::admin(&storage, "head@falcon.edu.et").await;
    let app = init_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer(2))
        .set_json(json!({ "identifier": "head@falcon.edu.et", "password": "Wrong2026" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_directory_carries_student_placement() {
    let storage = common::storage().await;
    let admin = common::admin(&storage, "head@falcon.edu.et").await;
    let (student, profile) = common::student(&storage, "abel@falcon.edu.et", 10, "B").await;
    let app = init_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/users?role=student")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"][0]["id"].as_i64(), Some(student.id));
    assert_eq!(body["data"]["items"][0]["fav_id"], profile.fav_id.as_str());

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", student.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "full_name": "Abel Tadesse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["full_name"], "Abel Tadesse");
    assert_eq!(body["data"]["profile"]["student"]["grade_level"], 10);
    assert_eq!(body["data"]["profile"]["student"]["section"], "B");
}

#[actix_web::test]
async fn test_register_verify_then_login() {
    let storage = common::storage().await;
    let cache = new_cache();
    let app = init_app!(storage.clone(), cache.clone());
    let email = "hanna@falcon.edu.et";

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .peer_addr(peer(3))
        .set_json(json!({
            "email": email,
            "password": common::PASSWORD,
            "full_name": "Hanna Tesfaye",
            "role": "student",
            "grade_level": 9,
            "section": "A",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["fav_id"].as_str().is_some_and(|id| id.starts_with("FAV-")));

    let login = || {
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .peer_addr(peer(3))
            .set_json(json!({ "identifier": email, "password": common::PASSWORD }))
            .to_request()
    };

    // unverified accounts cannot sign in
    let resp = test::call_service(&app, login()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);

    // the registration mail started the resend cooldown
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/resend-otp")
        .peer_addr(peer(3))
        .set_json(json!({ "email": email, "purpose": "register" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2006);

    let challenge = cache
        .get_json::<OtpChallenge>(&OtpPurpose::Register.cache_key(email))
        .await
        .expect("registration challenge");
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .peer_addr(peer(3))
        .set_json(json!({ "email": email, "code": challenge.code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["access_token"].is_string());

    let user = storage.get_user_by_email(email).await.unwrap().unwrap();
    assert_eq!(user.status, UserStatus::Active);

    let resp = test::call_service(&app, login()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_submission_deadline_and_section_rules() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Biology).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let assignment = |allow_late: bool, section: Option<&str>| CreateAssignmentRequest {
        title: "Cell structure essay".to_string(),
        description: None,
        subject: Subject::Biology,
        grade_level: GradeLevel::try_from(9).unwrap(),
        section: section.map(|s| Section::try_from(s).unwrap()),
        due_date: Some(Utc::now() - chrono::Duration::hours(1)),
        max_score: 20.0,
        allow_late,
        attachment_token: None,
    };
    let closed = storage.create_assignment(teacher.id, assignment(false, None)).await.unwrap();
    let late_ok = storage.create_assignment(teacher.id, assignment(true, None)).await.unwrap();
    let other_section = storage
        .create_assignment(teacher.id, assignment(true, Some("B")))
        .await
        .unwrap();
    let app = init_app!(storage);

    let submit = |id: i64| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/{id}/submissions"))
            .insert_header(bearer(&student))
            .set_json(json!({ "content": "Mitochondria are the powerhouse of the cell" }))
            .to_request()
    };

    let resp = test::call_service(&app, submit(closed.id)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 5102);

    let resp = test::call_service(&app, submit(late_ok.id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_late"], true);

    let resp = test::call_service(&app, submit(other_section.id)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_answers_after_the_deadline_are_refused() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Physics).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let closes_at = Utc::now() + chrono::Duration::seconds(2);
    let (quiz, question_id) = quiz_with_question(&storage, &teacher, Some(closes_at)).await;
    let app = init_app!(storage);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/quizzes/{}/attempts", quiz.id))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let attempt_id = body["data"]["attempt"]["id"].as_i64().expect("attempt id");

    tokio::time::sleep(Duration::from_secs(3)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/quizzes/attempts/{attempt_id}/answers"))
        .insert_header(bearer(&student))
        .set_json(json!({ "question_id": question_id, "answer": "false" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6102);

    // a late submit still closes the attempt
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/quizzes/attempts/{attempt_id}/submit"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_starting_a_submitted_attempt_conflicts() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Physics).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let (quiz, _) = quiz_with_question(&storage, &teacher, None).await;
    let app = init_app!(storage);

    let start = || {
        test::TestRequest::post()
            .uri(&format!("/api/v1/quizzes/{}/attempts", quiz.id))
            .insert_header(bearer(&student))
            .to_request()
    };

    let resp = test::call_service(&app, start()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let attempt_id = body["data"]["attempt"]["id"].as_i64().expect("attempt id");

    // starting again while open resumes the same attempt
    let resp = test::call_service(&app, start()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["attempt"]["id"].as_i64(), Some(attempt_id));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/quizzes/attempts/{attempt_id}/submit"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, start()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6101);
}

#[actix_web::test]
async fn test_parents_need_an_approved_link() {
    let storage = common::storage().await;
    let admin = common::admin(&storage, "head@falcon.edu.et").await;
    let parent = common::parent(&storage, "selam@example.com").await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let link = storage.create_link(parent.id, student.id, None).await.unwrap();
    let app = init_app!(storage.clone());

    let grades = || {
        test::TestRequest::get()
            .uri(&format!("/api/v1/grades/students/{}", student.id))
            .insert_header(bearer(&parent))
            .to_request()
    };

    // a pending link grants nothing
    let resp = test::call_service(&app, grades()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 9003);

    storage
        .review_link(link.id, admin.id, LinkStatus::Approved)
        .await
        .unwrap()
        .expect("approved link");
    let resp = test::call_service(&app, grades()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_students_message_only_staff() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::English).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let (classmate, _) = common::student(&storage, "bethel@falcon.edu.et", 9, "A").await;
    let app = init_app!(storage);

    let send = |recipient_id: i64| {
        test::TestRequest::post()
            .uri("/api/v1/messages")
            .insert_header(bearer(&student))
            .set_json(json!({ "recipient_id": recipient_id, "body": "Is the essay due Friday?" }))
            .to_request()
    };

    let resp = test::call_service(&app, send(classmate.id)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 8001);

    let resp = test::call_service(&app, send(teacher.id)).await;
    assert!(resp.status().is_success());
}
