//! HTTP inbound adapter exposing REST endpoints.

pub mod contact;
pub mod error;
pub mod extract;
pub mod health;
pub mod home;
pub mod login;
pub mod people;
pub mod state;
pub mod uploads;

pub use error::ApiResult;
