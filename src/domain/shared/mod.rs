//! Shared Kernel - 各限界上下文共用的标识与校验原语

mod id;
mod record;
mod validation;

pub use id::{EntityId, InvalidIdError};
pub use record::Record;
pub use validation::{validate_each, validate_with_schema, IntegerSchema, Schema, TextSchema};
