//! Named-column table passed to the model's predict call

use super::record::FeatureRecord;
use super::schema::Column;

/// Row-major table with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    /// Wrap a single record as a one-row table
    pub fn from_record(record: &FeatureRecord) -> Self {
        FeatureFrame {
            columns: Column::names(),
            rows: vec![record.to_vec()],
        }
    }

    /// Build a table from raw parts; every row must be as wide as `columns`
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Option<Self> {
        if rows.iter().any(|r| r.len() != columns.len()) {
            return None;
        }
        Some(FeatureFrame { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PropertyInputs;

    #[test]
    fn test_from_record() {
        let record = FeatureRecord::from_inputs(&PropertyInputs::default());
        let frame = FeatureFrame::from_record(&record);

        assert_eq!(frame.n_rows(), 1);
        assert_eq!(frame.n_columns(), 24);
        assert_eq!(frame.columns()[16], "Suburb_Mairangi Bay");
        assert_eq!(frame.rows()[0], record.to_vec());
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let columns = vec!["a".to_string(), "b".to_string()];
        assert!(FeatureFrame::new(columns.clone(), vec![vec![1.0, 2.0]]).is_some());
        assert!(FeatureFrame::new(columns, vec![vec![1.0]]).is_none());
    }
}
