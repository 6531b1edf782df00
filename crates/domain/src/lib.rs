#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod exercise;
mod name;
mod plan;
mod service;
mod statistics;
mod workout_session;

pub use catalog::*;
pub use error::*;
pub use exercise::*;
pub use name::*;
pub use plan::*;
pub use service::*;
pub use statistics::*;
pub use workout_session::*;
