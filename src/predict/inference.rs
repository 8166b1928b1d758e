//! Model inference for price predictions

use serde::Serialize;

use crate::features::{FeatureFrame, FeatureRecord, PropertyInputs};
use crate::model::{Inference, Model};
use crate::{HousePriceError, Result};

/// A successful price prediction and the record it was made from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePrediction {
    /// Raw model output
    pub price: f64,
    pub record: FeatureRecord,
}

/// Predictor for making price predictions
///
/// Borrows the model handle; the model is never modified through it.
pub struct Predictor<'m, M: Inference + ?Sized = Model> {
    model: &'m M,
}

impl<'m, M: Inference + ?Sized> Predictor<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Predictor { model }
    }

    /// Assemble the record from `inputs` and predict its price
    pub fn predict(&self, inputs: &PropertyInputs) -> Result<PricePrediction> {
        self.predict_record(FeatureRecord::from_inputs(inputs))
    }

    /// Predict the price of an already assembled record
    pub fn predict_record(&self, record: FeatureRecord) -> Result<PricePrediction> {
        let frame = FeatureFrame::from_record(&record);
        let output = self.model.predict(&frame)?;

        let price = output
            .first()
            .copied()
            .ok_or(HousePriceError::EmptyPrediction)?;
        if !price.is_finite() {
            return Err(HousePriceError::NonFinitePrediction(price));
        }

        log::debug!("Predicted raw price {}", price);
        Ok(PricePrediction { price, record })
    }
}

/// Round half to even and group thousands with commas: `$987,654`
///
/// Negative values keep the symbol first (`$-1,234`).
pub fn format_price(value: f64, currency_symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", currency_symbol, value);
    }

    let rounded = value.round_ties_even() as i128;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}{}", currency_symbol, sign, grouped)
}

/// Success message shown under the form
pub fn format_message(pred: &PricePrediction, currency_symbol: &str) -> String {
    format!(
        "💰 Predicted House Price: {}",
        format_price(pred.price, currency_symbol)
    )
}

/// Format a prediction for display
pub fn format_prediction(pred: &PricePrediction, currency_symbol: &str) -> String {
    let r = &pred.record;
    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  Predicted price:  {}
├─────────────────────────────────────────────────┤
│  Rooms:            {} bed / {} bath / {} living
│  Land / floor:     {:.0} / {:.0} sqm
│  Capital value:    {}
│  Built / sold:     {} / {}-{:02}
└─────────────────────────────────────────────────┘
"#,
        format_price(pred.price, currency_symbol),
        r.bedrooms,
        r.bathrooms,
        r.living_rooms,
        r.land_area,
        r.floor_area,
        format_price(r.capital_value, currency_symbol),
        r.year_built,
        r.sold_year,
        r.sold_month,
    )
}
