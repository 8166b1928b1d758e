//! Prediction and inference
//!
//! Turn form inputs into a price using the loaded model.

pub mod inference;
pub mod session;

pub use inference::{format_price, PricePrediction, Predictor};
pub use session::{FormState, Session};
