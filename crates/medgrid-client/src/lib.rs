//! Async client and state container for the medgrid patient-records API.
//!
//! [`ApiClient`] speaks the hypermedia wire format; [`PatientStore`] holds
//! the table state (one page of patients, one selected patient, pagination
//! and filter state) and exposes the fetch actions the UI layer drives.

pub mod client;
pub mod error;
pub mod store;

pub use client::ApiClient;
pub use error::ClientError;
pub use store::{FetchParams, FilterEvent, PageEvent, PatientStore, SortEvent};
