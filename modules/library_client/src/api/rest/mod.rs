//! REST API layer - HTTP client for the backend

pub mod client;
pub mod dto;
pub mod endpoints;
pub mod error;
pub mod mapper;
pub mod query;

pub use client::RestClient;
