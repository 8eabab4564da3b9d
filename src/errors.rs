//! Unified error handling
//!
//! Error variants are generated by a macro, each carrying a stable code and a
//! human readable type name.

use std::fmt;

/// Generates the error enum together with:
/// - `code()` returning the stable error code
/// - `error_type()` returning the type name
/// - `message()` returning the detail message
/// - snake_case convenience constructors
macro_rules! define_dlms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DlmsError {
            $($variant(String),)*
        }

        impl DlmsError {
            /// Stable error code
            pub fn code(&self) -> &'static str {
                match self {
                    $(DlmsError::$variant(_) => $code,)*
                }
            }

            /// Error type name
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DlmsError::$variant(_) => $type_name,)*
                }
            }

            /// Error detail
            pub fn message(&self) -> &str {
                match self {
                    $(DlmsError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl DlmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DlmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dlms_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Mail("E014", "Mail Delivery Error"),
}

impl DlmsError {
    /// Colored output for development consoles
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// Compact output
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// Whether the error was raised by a unique index or an optimistic status guard
    pub fn is_conflict(&self) -> bool {
        matches!(self, DlmsError::Conflict(_))
    }
}

impl fmt::Display for DlmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DlmsError {}

impl From<sea_orm::DbErr> for DlmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                DlmsError::Conflict(detail)
            }
            _ => DlmsError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for DlmsError {
    fn from(err: std::io::Error) -> Self {
        DlmsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DlmsError {
    fn from(err: serde_json::Error) -> Self {
        DlmsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DlmsError {
    fn from(err: chrono::ParseError) -> Self {
        DlmsError::DateParse(err.to_string())
    }
}

impl From<lettre::error::Error> for DlmsError {
    fn from(err: lettre::error::Error) -> Self {
        DlmsError::Mail(err.to_string())
    }
}

impl From<lettre::address::AddressError> for DlmsError {
    fn from(err: lettre::address::AddressError) -> Self {
        DlmsError::Mail(format!("invalid address: {err}"))
    }
}

impl From<lettre::transport::smtp::Error> for DlmsError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        DlmsError::Mail(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DlmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DlmsError::cache_connection("test").code(), "E001");
        assert_eq!(DlmsError::database_config("test").code(), "E003");
        assert_eq!(DlmsError::validation("test").code(), "E007");
        assert_eq!(DlmsError::conflict("test").code(), "E010");
        assert_eq!(DlmsError::authentication("test").code(), "E012");
        assert_eq!(DlmsError::mail("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DlmsError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(DlmsError::validation("test").error_type(), "Validation Error");
        assert_eq!(DlmsError::mail("smtp down").error_type(), "Mail Delivery Error");
    }

    #[test]
    fn test_error_message() {
        let err = DlmsError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = DlmsError::not_found("quiz 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("quiz 7"));
    }

    #[test]
    fn test_conflict_detection() {
        assert!(DlmsError::conflict("already submitted").is_conflict());
        assert!(!DlmsError::database_operation("boom").is_conflict());
    }
}
