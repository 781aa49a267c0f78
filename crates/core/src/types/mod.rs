//! Core types for the shop API.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod date;
pub mod id;
pub mod phone;
pub mod price;
pub mod status;

pub use date::{DATE_FORMATS, DateError, DateOnly};
pub use id::*;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use price::{Price, PriceError};
pub use status::*;
