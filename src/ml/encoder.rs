//! Fitted column preprocessing: one-hot blocks for the categorical columns
//! followed by (optionally z-scored) numeric columns.

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureRow, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::error::{FaultError, Result};

/// What to do with a category the encoder was not fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Fail the prediction.
    Error,
    /// Encode as an all-zero block.
    Ignore,
}

impl Default for UnknownPolicy {
    fn default() -> Self {
        Self::Error
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub feature: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub handle_unknown: UnknownPolicy,
}

impl CategoricalColumn {
    fn encode_into(&self, value: &str, out: &mut Vec<f64>) -> Result<()> {
        match self.categories.iter().position(|c| c == value) {
            Some(idx) => {
                out.extend((0..self.categories.len()).map(|i| if i == idx { 1.0 } else { 0.0 }));
                Ok(())
            }
            None => match self.handle_unknown {
                UnknownPolicy::Error => Err(FaultError::UnknownCategory {
                    feature: self.feature.clone(),
                    value: value.to_string(),
                }),
                UnknownPolicy::Ignore => {
                    out.extend(std::iter::repeat(0.0).take(self.categories.len()));
                    Ok(())
                }
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumns {
    pub features: Vec<String>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEncoder {
    pub categorical: Vec<CategoricalColumn>,
    pub numeric: NumericColumns,
}

impl ColumnEncoder {
    pub fn validate(&self) -> std::result::Result<(), String> {
        let categorical: Vec<&str> = self.categorical.iter().map(|c| c.feature.as_str()).collect();
        if categorical != CATEGORICAL_FEATURES {
            return Err(format!(
                "categorical features {categorical:?} do not match training order {CATEGORICAL_FEATURES:?}"
            ));
        }
        for col in &self.categorical {
            if col.categories.is_empty() {
                return Err(format!("feature '{}' has no categories", col.feature));
            }
            for (i, cat) in col.categories.iter().enumerate() {
                if col.categories[..i].contains(cat) {
                    return Err(format!(
                        "feature '{}' lists category '{cat}' more than once",
                        col.feature
                    ));
                }
            }
        }

        let numeric: Vec<&str> = self.numeric.features.iter().map(String::as_str).collect();
        if numeric != NUMERIC_FEATURES {
            return Err(format!(
                "numeric features {numeric:?} do not match training order {NUMERIC_FEATURES:?}"
            ));
        }
        if let Some(scaler) = &self.numeric.scaler {
            if scaler.mean.len() != NUMERIC_FEATURES.len() {
                return Err(format!(
                    "scaler mean length {} != {}",
                    scaler.mean.len(),
                    NUMERIC_FEATURES.len()
                ));
            }
            if scaler.scale.len() != NUMERIC_FEATURES.len() {
                return Err(format!(
                    "scaler scale length {} != {}",
                    scaler.scale.len(),
                    NUMERIC_FEATURES.len()
                ));
            }
            if scaler.mean.iter().any(|v| !v.is_finite()) {
                return Err("scaler mean contains non-finite values".to_string());
            }
            if scaler.scale.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err("scaler scale must be finite and > 0".to_string());
            }
        }
        Ok(())
    }

    /// Length of the encoded vector.
    pub fn width(&self) -> usize {
        self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
            + self.numeric.features.len()
    }

    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.width());

        for (col, value) in self.categorical.iter().zip(row.categorical()) {
            col.encode_into(value, &mut out)?;
        }

        for (i, value) in row.numeric().into_iter().enumerate() {
            if !value.is_finite() {
                return Err(FaultError::Inference(format!(
                    "non-finite value for feature '{}'",
                    NUMERIC_FEATURES[i]
                )));
            }
            let x = match &self.numeric.scaler {
                Some(s) => (value - s.mean[i]) / s.scale[i],
                None => value,
            };
            out.push(x);
        }

        Ok(out)
    }
}
