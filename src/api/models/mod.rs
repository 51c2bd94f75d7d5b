// Models module - donation request record and status lifecycle.
// Users and blogs are schemaless passthrough documents and have no typed model.

pub mod donation_request;

pub use donation_request::{DonationRequest, DonationStatus, UnknownStatus};
