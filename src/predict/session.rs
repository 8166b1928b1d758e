//! Form session state
//!
//! `Idle` until the user asks for a prediction; the outcome is shown until
//! the next edit, which drops back to `Idle`.

use super::inference::{format_message, PricePrediction, Predictor};
use crate::features::{Field, PropertyInputs};
use crate::model::Inference;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// No prediction requested for the current inputs
    Idle,
    /// Last request succeeded
    PredictionShown(PricePrediction),
    /// Last request failed; holds the message shown to the user
    Failed(String),
}

/// Control values plus what is currently shown beneath them
#[derive(Debug, Clone)]
pub struct Session {
    inputs: PropertyInputs,
    state: FormState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PropertyInputs::default())
    }
}

impl Session {
    pub fn new(inputs: PropertyInputs) -> Self {
        Session {
            inputs,
            state: FormState::Idle,
        }
    }

    pub fn inputs(&self) -> &PropertyInputs {
        &self.inputs
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Change one control
    ///
    /// A rejected value leaves both the inputs and the state untouched.
    pub fn edit(&mut self, field: Field, raw: &str) -> Result<()> {
        self.inputs.set(field, raw)?;
        self.state = FormState::Idle;
        Ok(())
    }

    /// Run a prediction with the current inputs ("Predict House Price")
    pub fn submit<M: Inference + ?Sized>(&mut self, predictor: &Predictor<'_, M>) -> &FormState {
        self.state = match predictor.predict(&self.inputs) {
            Ok(pred) => FormState::PredictionShown(pred),
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                FormState::Failed(e.to_string())
            }
        };
        &self.state
    }

    /// Message for the current state, if any
    pub fn status_message(&self, currency_symbol: &str) -> Option<String> {
        match &self.state {
            FormState::Idle => None,
            FormState::PredictionShown(pred) => Some(format_message(pred, currency_symbol)),
            FormState::Failed(msg) => Some(format!("❌ Prediction failed: {}", msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureFrame;
    use crate::{HousePriceError, Result};

    struct Fixed(f64);

    impl Inference for Fixed {
        fn predict(&self, _frame: &FeatureFrame) -> Result<Vec<f64>> {
            Ok(vec![self.0])
        }
    }

    struct Broken;

    impl Inference for Broken {
        fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
            Err(HousePriceError::SchemaMismatch {
                expected: vec!["Bedrooms".to_string()],
                actual: frame.columns().to_vec(),
            })
        }
    }

    #[test]
    fn test_idle_to_prediction_shown() {
        let model = Fixed(987654.3);
        let predictor = Predictor::new(&model);
        let mut session = Session::default();

        assert_eq!(session.state(), &FormState::Idle);
        assert_eq!(session.status_message("$"), None);

        session.submit(&predictor);
        assert!(matches!(session.state(), FormState::PredictionShown(_)));
        assert_eq!(
            session.status_message("$").unwrap(),
            "💰 Predicted House Price: $987,654"
        );
    }

    #[test]
    fn test_edit_returns_to_idle() {
        let model = Fixed(1.0);
        let predictor = Predictor::new(&model);
        let mut session = Session::default();

        session.submit(&predictor);
        session.edit(Field::Bedrooms, "4").unwrap();
        assert_eq!(session.state(), &FormState::Idle);
        assert_eq!(session.inputs().bedrooms.get(), 4);

        // resubmitting uses the fresh inputs
        session.submit(&predictor);
        match session.state() {
            FormState::PredictionShown(pred) => assert_eq!(pred.record.bedrooms, 4),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_edit_keeps_record() {
        let model = Fixed(1.0);
        let predictor = Predictor::new(&model);
        let mut session = Session::default();

        session.edit(Field::LandArea, "300.456").unwrap();
        session.edit(Field::DistanceToSchool, "1.234").unwrap();
        session.submit(&predictor);
        let first = match session.state() {
            FormState::PredictionShown(pred) => pred.record.clone(),
            other => panic!("unexpected state: {:?}", other),
        };

        for field in [Field::LandArea, Field::DistanceToSchool] {
            let text = session.inputs().edit_value(field);
            session.edit(field, &text).unwrap();
        }
        session.submit(&predictor);
        match session.state() {
            FormState::PredictionShown(pred) => {
                assert_eq!(pred.record, first);
                assert_eq!(pred.record.land_area, 300.456);
                assert_eq!(pred.record.distance_to_school, 1.234);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_rejected_edit_keeps_state() {
        let model = Fixed(1.0);
        let predictor = Predictor::new(&model);
        let mut session = Session::default();

        session.submit(&predictor);
        assert!(session.edit(Field::YearBuilt, "2026").is_err());
        assert!(matches!(session.state(), FormState::PredictionShown(_)));
        assert_eq!(session.inputs().year_built.get(), 1970);
    }

    #[test]
    fn test_failure_state_and_recovery() {
        let mut session = Session::default();

        let broken = Broken;
        session.submit(&Predictor::new(&broken));
        let msg = session.status_message("$").unwrap();
        assert!(msg.starts_with("❌ Prediction failed: Schema mismatch"));

        let model = Fixed(500_000.0);
        session.submit(&Predictor::new(&model));
        assert_eq!(
            session.status_message("$").unwrap(),
            "💰 Predicted House Price: $500,000"
        );
    }
}
