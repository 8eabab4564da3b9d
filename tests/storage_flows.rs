mod common;

use falcon_dlms::models::academics::{GradeLevel, Subject};
use falcon_dlms::models::assignments::requests::{CreateAssignmentRequest, SubmitAssignmentRequest};
use falcon_dlms::models::grades::requests::{GradeListParams, RecordGradeRequest};
use falcon_dlms::models::parents::entities::LinkStatus;
use falcon_dlms::models::quizzes::entities::{AttemptStatus, QuestionType};
use falcon_dlms::models::quizzes::requests::{CreateQuizRequest, NewQuestion};
use falcon_dlms::models::users::entities::UserRole;
use falcon_dlms::models::users::requests::UserListQuery;

#[tokio::test]
async fn test_students_get_sequential_fav_ids() {
    let storage = common::storage().await;
    let (_, first) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;
    let (second_user, second) = common::student(&storage, "bethel@falcon.edu.et", 10, "B").await;

    assert!(first.fav_id.as_str().starts_with("FAV-"));
    assert_eq!(second.fav_id.sequence(), first.fav_id.sequence() + 1);

    // FAV IDs sign in as well as emails, case-insensitively
    let lowered = second.fav_id.as_str().to_lowercase();
    let found = storage
        .get_user_by_identifier(&lowered)
        .await
        .unwrap()
        .expect("student by FAV ID");
    assert_eq!(found.id, second_user.id);
}

#[tokio::test]
async fn test_user_directory_shows_student_fav_ids() {
    let storage = common::storage().await;
    let admin = common::admin(&storage, "head@falcon.edu.et").await;
    let (student, profile) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let query = |role: Option<UserRole>| UserListQuery {
        page: 1,
        size: 20,
        role,
        status: None,
        search: None,
    };
    let listed = storage.list_users_with_pagination(query(None)).await.unwrap();
    assert_eq!(listed.pagination.total, 2);

    let row = |id: i64| listed.items.iter().find(|item| item.user.id == id).expect("listed user");
    assert_eq!(row(student.id).fav_id.as_ref(), Some(&profile.fav_id));
    assert!(row(admin.id).fav_id.is_none());

    let staff = storage
        .list_users_with_pagination(query(Some(UserRole::Admin)))
        .await
        .unwrap();
    assert_eq!(staff.items.len(), 1);
    assert!(staff.items[0].fav_id.is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let storage = common::storage().await;
    common::admin(&storage, "head@falcon.edu.et").await;

    let profile = falcon_dlms::models::academics::entities::NewRoleProfile::Admin;
    let user = falcon_dlms::models::users::requests::NewUser {
        email: "head@falcon.edu.et".to_string(),
        password_hash: "x".to_string(),
        full_name: "Another Admin".to_string(),
        phone: None,
        role: falcon_dlms::models::users::entities::UserRole::Admin,
        status: falcon_dlms::models::users::entities::UserStatus::Active,
    };
    let err = storage.create_user_with_profile(user, profile).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_one_submission_per_student_and_assignment() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Biology).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let assignment = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Cell structure essay".to_string(),
                description: None,
                subject: Subject::Biology,
                grade_level: GradeLevel::try_from(9).unwrap(),
                section: None,
                due_date: None,
                max_score: 20.0,
                allow_late: false,
                attachment_token: None,
            },
        )
        .await
        .unwrap();

    let submit = || SubmitAssignmentRequest {
        content: Some("Mitochondria are the powerhouse of the cell".to_string()),
        file_token: None,
    };
    let first = storage
        .create_submission(assignment.id, student.id, submit(), false)
        .await
        .unwrap();
    assert!(!first.is_late);

    let err = storage
        .create_submission(assignment.id, student.id, submit(), false)
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let graded = storage
        .grade_submission(first.id, teacher.id, 18.0, Some("Well argued".to_string()))
        .await
        .unwrap()
        .expect("graded submission");
    assert_eq!(graded.score, Some(18.0));
    assert_eq!(graded.graded_by, Some(teacher.id));
}

#[tokio::test]
async fn test_recording_a_mark_twice_overwrites_it() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Mathematics).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let record = |score: f64| RecordGradeRequest {
        student_id: student.id,
        subject: Subject::Mathematics,
        term: 1,
        academic_year: 2026,
        score,
        max_score: 100.0,
        remarks: None,
    };
    let first = storage.upsert_grade(teacher.id, record(71.0)).await.unwrap();
    let second = storage.upsert_grade(teacher.id, record(84.0)).await.unwrap();
    assert_eq!(first.id, second.id);

    let grades = storage
        .list_grades(student.id, GradeListParams::default())
        .await
        .unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].score, 84.0);
}

#[tokio::test]
async fn test_quiz_attempt_is_scored_once() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "meron@falcon.edu.et", Subject::Physics).await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let quiz = storage
        .create_quiz(
            teacher.id,
            CreateQuizRequest {
                title: "Motion basics".to_string(),
                description: None,
                subject: Subject::Physics,
                grade_level: GradeLevel::try_from(9).unwrap(),
                section: None,
                time_limit_minutes: Some(20),
                available_from: None,
                available_until: None,
            },
        )
        .await
        .unwrap();

    let speed = storage
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
    let unit = storage
        .add_question(
            quiz.id,
            NewQuestion {
                question_text: "SI unit of force".to_string(),
                question_type: QuestionType::ShortAnswer,
                options: Vec::new(),
                correct_answer: "newton".to_string(),
                points: 3,
                position: None,
            },
        )
        .await
        .unwrap();

    let attempt = storage.start_attempt(quiz.id, student.id, 5).await.unwrap();
    assert_eq!(attempt.status, AttemptStatus::InProgress);
    assert!(storage.start_attempt(quiz.id, student.id, 5).await.unwrap_err().is_conflict());

    storage.save_answer(attempt.id, speed.id, "False").await.unwrap();
    storage.save_answer(attempt.id, unit.id, "joule").await.unwrap();
    // a later save replaces the earlier answer
    storage.save_answer(attempt.id, unit.id, "  Newton ").await.unwrap();
    assert_eq!(storage.list_answers(attempt.id).await.unwrap().len(), 2);

    let submitted = storage.submit_attempt(attempt.id).await.unwrap();
    assert_eq!(submitted.status, AttemptStatus::Submitted);
    assert_eq!(submitted.score, Some(5));
    assert_eq!(submitted.max_score, 5);
    assert!(submitted.submitted_at.is_some());

    let again = storage.submit_attempt(attempt.id).await.unwrap_err();
    assert!(again.is_conflict());

    // a closed attempt takes no further answers
    let late = storage.save_answer(attempt.id, unit.id, "joule").await.unwrap_err();
    assert!(late.is_conflict());
    let answers = storage.list_answers(attempt.id).await.unwrap();
    assert!(answers.iter().all(|a| a.is_correct.is_some()));
}

#[tokio::test]
async fn test_parent_link_review() {
    let storage = common::storage().await;
    let admin = common::admin(&storage, "head@falcon.edu.et").await;
    let parent = common::parent(&storage, "selam@example.com").await;
    let (student, _) = common::student(&storage, "abel@falcon.edu.et", 9, "A").await;

    let link = storage
        .create_link(parent.id, student.id, Some("mother".to_string()))
        .await
        .unwrap();
    assert_eq!(link.status, LinkStatus::Pending);
    assert!(!storage.is_parent_of(parent.id, student.id).await.unwrap());

    let approved = storage
        .review_link(link.id, admin.id, LinkStatus::Approved)
        .await
        .unwrap()
        .expect("pending link is reviewed");
    assert_eq!(approved.status, LinkStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(admin.id));
    assert!(storage.is_parent_of(parent.id, student.id).await.unwrap());

    // only pending links can be reviewed
    let again = storage
        .review_link(link.id, admin.id, LinkStatus::Rejected)
        .await
        .unwrap();
    assert!(again.is_none());

    let children = storage.list_children(parent.id).await.unwrap();
    assert_eq!(children.len(), 1);
}
