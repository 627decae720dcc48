//! Identifier generators
//!
//! Implements the `IdGenerator` port for records created without a key.

pub mod object_id;

pub use object_id::ObjectIdGenerator;
