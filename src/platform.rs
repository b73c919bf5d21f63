//! Install platforms
//!
//! Only the Steam library-folder layout is supported.

pub mod steam;
