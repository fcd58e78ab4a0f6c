//! Core types, validation rules, and services for the Roster person
//! directory.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::RosterStore`]; the HTTP layers talk to the services in
//! [`service`].

#![allow(async_fn_in_trait)]

pub mod dto;
pub mod entity;
pub mod error;
pub mod query;
pub mod service;
pub mod store;

pub use error::{Error, FieldError, Result};
