//! Rate envelope types and the reciprocal transform.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Symbol -> rate
pub type RateMap = HashMap<String, f64>;

/// Top-level response from the API.
///
/// The body is kept exactly as received. `rates` is populated only when
/// `data` is an object holding a non-empty `rates` object; every other
/// shape leaves the envelope untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Value,
    rates: Option<RateMap>,
}

impl Envelope {
    /// Wrap a parsed response body.
    ///
    /// Fails only when `data.rates` is a non-empty object with a
    /// non-numeric value.
    pub fn from_value(body: Value) -> Result<Self, serde_json::Error> {
        let rates = match body.get("data").and_then(|d| d.get("rates")) {
            Some(Value::Object(rates)) if !rates.is_empty() => {
                let rates: RateMap = serde_json::from_value(Value::Object(rates.clone()))?;
                Some(rates)
            }
            _ => None,
        };

        Ok(Self { body, rates })
    }

    /// Get the rates, if any
    pub fn rates(&self) -> Option<&RateMap> {
        self.rates.as_ref()
    }

    /// Get a single rate by symbol
    pub fn rate(&self, symbol: &str) -> Option<f64> {
        self.rates().and_then(|r| r.get(symbol)).copied()
    }

    /// Get the full response body
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Serializes as the response body. JSON has no infinity, so infinite rates
/// come out as `null`.
impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// Map every rate to its reciprocal.
///
/// A rate equal to zero (including `-0.0`) maps to `f64::INFINITY`.
pub fn invert_rates(rates: &RateMap) -> RateMap {
    rates
        .iter()
        .map(|(symbol, &rate)| {
            let inverted = if rate != 0.0 { 1.0 / rate } else { f64::INFINITY };
            (symbol.clone(), inverted)
        })
        .collect()
}

/// Replace `data.rates` with its reciprocal when present and non-empty
pub fn invert_envelope(envelope: &mut Envelope) {
    let Some(rates) = envelope.rates.as_mut() else {
        return;
    };
    *rates = invert_rates(rates);

    if let Some(Value::Object(body_rates)) = envelope
        .body
        .get_mut("data")
        .and_then(|d| d.get_mut("rates"))
    {
        for (symbol, rate) in rates.iter() {
            body_rates.insert(symbol.clone(), Value::from(*rate));
        }
    }
}
