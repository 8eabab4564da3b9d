pub mod academics;
pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod files;
pub mod frontend;
pub mod grades;
pub mod library;
pub mod messages;
pub mod news;
pub mod parents;
pub mod quizzes;
pub mod submissions;
pub mod users;

pub use academics::configure_academics_routes;
pub use analytics::configure_analytics_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use library::configure_library_routes;
pub use messages::configure_message_routes;
pub use news::configure_news_routes;
pub use parents::configure_parent_routes;
pub use quizzes::configure_quiz_routes;
pub use submissions::configure_submission_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// Every API scope followed by the frontend fallback
pub fn configure_all(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_academics_routes)
        .configure(configure_parent_routes)
        .configure(configure_assignment_routes)
        .configure(configure_submission_routes)
        .configure(configure_grade_routes)
        .configure(configure_quiz_routes)
        .configure(configure_library_routes)
        .configure(configure_message_routes)
        .configure(configure_news_routes)
        .configure(configure_analytics_routes)
        .configure(configure_file_routes)
        // must stay last, it matches every path
        .configure(configure_frontend_routes);
}
