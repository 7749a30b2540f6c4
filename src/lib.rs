//! Library exports for the short-link service
//!
//! The core is [`service::LinkService`], which owns the in-memory
//! [`store::RecordStore`] and its [`persistence::Persistence`] layer. The HTTP
//! modules (`handler`, `middleware`, `route`) are a thin adapter on top.

pub mod config;
pub mod error;
pub mod handler;
pub mod id;
pub mod middleware;
pub mod model;
pub mod persistence;
pub mod route;
pub mod service;
pub mod store;
pub mod username;
