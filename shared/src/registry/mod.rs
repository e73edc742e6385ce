pub mod as_any;
pub mod constructor;
pub mod constructor_cache;
pub mod error;
pub mod modifier;
pub mod outcome;
pub mod type_registry;
pub mod type_ref;
