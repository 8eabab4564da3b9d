//! Process lifetime: what runs before the server binds and after it stops

pub mod lifetime;
