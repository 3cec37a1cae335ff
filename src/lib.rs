pub mod adapter;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod output;
pub mod query;
pub mod store;
