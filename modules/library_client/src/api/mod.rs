//! API layer

pub mod dev_server;
pub mod rest;
