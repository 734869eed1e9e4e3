//! Request services

pub mod pipeline;
