//! Gaussian Naive Bayes over the encoded feature vector.
//!
//! Parameters are the fitted per-class priors, means (`theta`) and
//! variances (`var`, variance smoothing already applied).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Label;
use crate::error::{FaultError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNb {
    pub classes: Vec<Label>,
    pub class_prior: Vec<f64>,
    /// Shape: [n_classes][n_features]
    pub theta: Vec<Vec<f64>>,
    /// Shape: [n_classes][n_features]
    pub var: Vec<Vec<f64>>,
}

impl GaussianNb {
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(format!("need at least 2 classes, got {n_classes}"));
        }
        if self.class_prior.len() != n_classes {
            return Err(format!(
                "class_prior length {} != n_classes {n_classes}",
                self.class_prior.len()
            ));
        }
        if self.theta.len() != n_classes || self.var.len() != n_classes {
            return Err(format!(
                "theta/var must have {n_classes} rows, got {}/{}",
                self.theta.len(),
                self.var.len()
            ));
        }
        if self
            .class_prior
            .iter()
            .any(|p| !p.is_finite() || *p <= 0.0 || *p > 1.0)
        {
            return Err("class_prior entries must be in (0, 1]".to_string());
        }
        let total: f64 = self.class_prior.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(format!("class_prior sums to {total}, expected 1"));
        }
        for (c, (mean, var)) in self.theta.iter().zip(&self.var).enumerate() {
            if mean.len() != n_features {
                return Err(format!(
                    "theta row {c} len {} != encoded width {n_features}",
                    mean.len()
                ));
            }
            if var.len() != n_features {
                return Err(format!(
                    "var row {c} len {} != encoded width {n_features}",
                    var.len()
                ));
            }
            if mean.iter().any(|v| !v.is_finite()) {
                return Err(format!("theta row {c} contains non-finite values"));
            }
            if var.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(format!("var row {c} must be finite and > 0"));
            }
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.theta.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Per-class `log P(c) + log P(x | c)`.
    pub fn joint_log_likelihood(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n_features() {
            return Err(FaultError::ShapeMismatch(format!(
                "GaussianNb expects {} features, got {}",
                self.n_features(),
                x.len()
            )));
        }

        let jll = self
            .class_prior
            .iter()
            .zip(self.theta.iter().zip(&self.var))
            .map(|(prior, (mean, var))| {
                let mut n_ij = 0.0;
                for j in 0..x.len() {
                    let d = x[j] - mean[j];
                    n_ij -= 0.5 * (2.0 * PI * var[j]).ln();
                    n_ij -= 0.5 * d * d / var[j];
                }
                prior.ln() + n_ij
            })
            .collect();

        Ok(jll)
    }

    pub fn predict_encoded(&self, x: &[f64]) -> Result<&Label> {
        let jll = self.joint_log_likelihood(x)?;
        let best = argmax(&jll).ok_or_else(|| {
            FaultError::Inference("joint log likelihood is not a number".to_string())
        })?;
        Ok(&self.classes[best])
    }
}

/// Index of the largest value; ties keep the first. `None` if any value is NaN.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if values[b] >= *v => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> GaussianNb {
        GaussianNb {
            classes: vec![Label::Number(0.0), Label::Number(1.0)],
            class_prior: vec![0.5, 0.5],
            theta: vec![vec![0.0, 0.0], vec![3.0, 3.0]],
            var: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        }
    }

    #[test]
    fn picks_nearest_class_mean() {
        let nb = two_class();
        nb.validate(2).unwrap();

        assert_eq!(nb.predict_encoded(&[0.2, -0.1]).unwrap(), &Label::Number(0.0));
        assert_eq!(nb.predict_encoded(&[2.8, 3.5]).unwrap(), &Label::Number(1.0));
    }

    #[test]
    fn prior_breaks_symmetric_evidence() {
        let mut nb = two_class();
        nb.class_prior = vec![0.1, 0.9];
        // Midpoint: likelihoods are equal, the prior decides.
        assert_eq!(nb.predict_encoded(&[1.5, 1.5]).unwrap(), &Label::Number(1.0));
    }

    #[test]
    fn log_likelihood_matches_closed_form() {
        let nb = two_class();
        let jll = nb.joint_log_likelihood(&[0.0, 0.0]).unwrap();
        let expected0 = 0.5_f64.ln() - (2.0 * PI).ln();
        assert!((jll[0] - expected0).abs() < 1e-12);
        assert!((jll[1] - (expected0 - 9.0)).abs() < 1e-12);
    }

    #[test]
    fn wrong_width_is_shape_mismatch() {
        let nb = two_class();
        let err = nb.predict_encoded(&[1.0]).unwrap_err();
        assert!(matches!(err, FaultError::ShapeMismatch(_)));
    }

    #[test]
    fn validates_parameters() {
        let mut nb = two_class();
        nb.var[1][0] = 0.0;
        assert!(nb.validate(2).is_err());

        let mut nb = two_class();
        nb.class_prior = vec![0.5, 0.4];
        assert!(nb.validate(2).unwrap_err().contains("sums to"));

        assert!(two_class().validate(3).is_err());
    }

    #[test]
    fn argmax_keeps_first_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax(&[f64::NAN, 1.0]), None);
        assert_eq!(argmax(&[]), None);
    }
}
