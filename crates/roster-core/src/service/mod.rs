//! Services: validate requests, map between entities and DTOs, and run the
//! matching store calls.
//!
//! Each service holds an `Arc` of the store so it can be cloned into request
//! handlers freely.

mod countries;
mod persons;

pub use countries::CountriesService;
pub use persons::PersonsService;

#[cfg(test)]
mod tests;
