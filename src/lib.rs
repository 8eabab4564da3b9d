//! Falcon Academy DLMS - school learning management backend
//!
//! # Layout
//! - `cache`: object cache backends (Moka/Redis)
//! - `config`: layered configuration
//! - `entity`: SeaORM entities
//! - `errors`: crate error type
//! - `mail`: outgoing mail for one-time codes
//! - `middlewares`: authentication, role checks, rate limiting
//! - `models`: domain types, requests and responses
//! - `routes`: HTTP routing
//! - `runtime`: startup and shutdown
//! - `services`: request handling and authorization rules
//! - `storage`: persistence
//! - `utils`: shared helpers

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod mail;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
