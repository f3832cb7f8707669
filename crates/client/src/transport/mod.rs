//! Transport layer for the search provider
//!
//! Available transports:
//! - `http` - JSON over HTTP POST (reqwest)

pub mod http;
