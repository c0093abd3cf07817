//! # Mustache Model
//!
//! Everything host code hands to the Mustache runtime. This crate knows nothing
//! about stacks or rendering; it defines the objects the runtime resolves keys
//! against and the observers it notifies.
//!
//! ## Core Components
//!
//! - **value**: The `Value` data model and the `ResolveKey` capability
//! - **object**: Host-defined context objects, optionally acting as delegates
//! - **filter**: Named transformation callables and the standard filter library
//! - **tag**: Tag identity passed to delegates
//! - **delegate**: The "will render" / "did render" observer protocol

pub mod delegate;
pub mod filter;
pub mod object;
pub mod tag;
pub mod value;

pub use delegate::*;
pub use filter::*;
pub use object::*;
pub use tag::*;
pub use value::*;
