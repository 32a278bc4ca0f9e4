//! Platform glue shared by the browser host and native drivers
//!
//! - `input`: activation key routing
//! - `subscription`: frame-tick handle with exactly-once cancellation

pub mod input;
pub mod subscription;

pub use input::{Command, route_key};
pub use subscription::Subscription;
