//! Feature schema, form inputs and model-ready records
//!
//! Converts control values into the fixed column layout the model expects.

pub mod domain;
pub mod frame;
pub mod inputs;
pub mod record;
pub mod schema;

pub use frame::FeatureFrame;
pub use inputs::PropertyInputs;
pub use record::{FeatureRecord, FeatureValue};
pub use schema::{Column, Field, FieldKind, ScalarType, Section};
