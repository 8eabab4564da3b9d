pub mod entities;
pub mod requests;
pub mod responses;
pub mod taxonomy;

pub use taxonomy::{FavId, GradeLevel, Section, Stream, Subject};
