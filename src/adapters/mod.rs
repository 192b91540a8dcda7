//! Storage adapters for the domain ports.

pub mod kv;
