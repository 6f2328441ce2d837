//! Rusty-Rules-Validation
//!
//! Pure Rust validation functions used by the `rusty-rules` directive engine.
//! Every function here works on plain values and knows nothing about records,
//! tenants or rule maps, so they can be called directly from custom validators.

pub mod collection;
pub mod email;
pub mod numeric;
pub mod phone;
pub mod region;
pub mod string;

// Re-export all validators
pub use collection::*;
pub use email::*;
pub use numeric::*;
pub use phone::*;
pub use region::*;
pub use string::*;
