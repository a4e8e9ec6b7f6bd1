//! Hand-off to the external AI screening service and intake of its verdicts.
//!
//! After an application is stored the API asks the service to screen the
//! candidate. The service later posts its decision to
//! `POST /api/v1/screening/results/:id`, authenticated by a shared key.

pub mod client;
pub mod handlers;
pub mod queries;

pub use client::ScreeningClient;
