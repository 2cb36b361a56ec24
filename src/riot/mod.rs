//! Riot module - Client implementation for the Riot match-v5 API

pub mod messages;
pub mod rest;

pub use rest::RiotRestClient;
