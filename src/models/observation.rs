// Raw snapshot input and the flat observation rows derived from it

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// One site-sonar test result for a (hostname, ce_name) endpoint, as found
/// on each line of an input file. Identity fields are optional at the parse
/// layer; the flattener rejects records that lack them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub hostname: Option<String>,
    pub ce_name: Option<String>,
    /// test-name -> result-key -> result-value (scalar, sequence, or mapping).
    /// BTreeMap keeps iteration order deterministic within one flatten call.
    #[serde(default)]
    pub test_results_json: BTreeMap<String, BTreeMap<String, Value>>,
}

/// A JSON scalar. Sequences and mappings never reach this type; they are
/// folded into `ParamValue::Composite` at flatten time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// Normalized parameter value, decided once at flatten time and never
/// re-inspected. Composite values carry their canonical JSON string
/// (serde_json's default map keeps keys sorted, so equal structures
/// serialize identically).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(ScalarValue),
    Composite(String),
}

impl ParamValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(_) | Value::Object(_) => ParamValue::Composite(value.to_string()),
            Value::Null => ParamValue::Scalar(ScalarValue::Null),
            Value::Bool(b) => ParamValue::Scalar(ScalarValue::Bool(b)),
            Value::Number(n) => ParamValue::Scalar(ScalarValue::Number(n)),
            Value::String(s) => ParamValue::Scalar(ScalarValue::Text(s)),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(ScalarValue::Null) => Ok(()),
            ParamValue::Scalar(ScalarValue::Bool(b)) => write!(f, "{}", b),
            ParamValue::Scalar(ScalarValue::Number(n)) => write!(f, "{}", n),
            ParamValue::Scalar(ScalarValue::Text(s)) => f.write_str(s),
            ParamValue::Composite(s) => f.write_str(s),
        }
    }
}

/// One (endpoint, parameter, date, value) data point. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatObservation {
    /// `hostname` + "_" + `ce_name`, uniquely identifying an endpoint.
    pub host_ce: String,
    /// Ingestion timestamp truncated to day granularity (UTC).
    pub date: NaiveDate,
    /// test-name + "_" + result-key.
    pub param_name: String,
    pub param_value: ParamValue,
}
