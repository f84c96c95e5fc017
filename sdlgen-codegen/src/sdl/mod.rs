//! SDL emission modules.

pub mod containers;
pub mod emitter;
pub mod fields;
pub mod filter;
pub mod naming;
pub mod scalars;

pub use containers::{ContainerElement, as_container};
pub use emitter::{EmissionLedger, SchemaEmitter};
pub use fields::FieldTable;
pub use filter::include_accessor;
pub use naming::field_name;
pub use scalars::{BuiltinScalar, map_primitive};
