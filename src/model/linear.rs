//! Linear regression estimator

use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::{HousePriceError, Result};

/// `intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Regressor for LinearRegressor {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        if self.coefficients.len() != n_features {
            return Err(HousePriceError::InvalidModel(format!(
                "linear model has {} coefficients for {} features",
                self.coefficients.len(),
                n_features
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(HousePriceError::InvalidModel(
                "linear model has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_row() {
        let model = LinearRegressor {
            intercept: 100.0,
            coefficients: vec![2.0, -1.0, 0.5],
        };
        assert_eq!(model.predict_row(&[10.0, 5.0, 4.0]), 100.0 + 20.0 - 5.0 + 2.0);
    }

    #[test]
    fn test_validate() {
        let model = LinearRegressor {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        };
        assert!(model.validate(2).is_ok());
        assert!(model.validate(3).is_err());

        let bad = LinearRegressor {
            intercept: f64::NAN,
            coefficients: vec![1.0],
        };
        assert!(bad.validate(1).is_err());
    }
}
