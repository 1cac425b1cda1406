use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FaultError, Result};

/// Class label as stored in the artifact.
///
/// Training pipelines emit either numeric targets (`0`, `1`) or string
/// targets (`"0"`, `"1"`); both coerce to the response's float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl Label {
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Label::Number(v) => Ok(*v),
            Label::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| FaultError::LabelCoercion(format!("'{s}'"))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(v) => write!(f, "{v}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}
