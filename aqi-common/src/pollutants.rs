//! Pollutant readings and input coercion
//!
//! The same six concentrations feed the regression model, populate stored
//! observation records, and arrive from three different surfaces (JSON API,
//! HTML form, OpenWeather component map). Each surface names the fields
//! differently; [`Pollutant`] carries all three spellings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{Error, Result};

/// One of the six pollutant measurements, in model feature order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    Co,
    So2,
}

impl Pollutant {
    /// All pollutants in model feature order
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::So2,
    ];

    /// Key used by the JSON records API
    pub fn json_key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }

    /// Field name used by the manual prediction form
    pub fn form_key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO2",
        }
    }

    /// Key in the OpenWeather air pollution `components` map
    pub fn component_key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }
}

/// Coerce a JSON value to a finite float
///
/// Numbers coerce directly. Strings coerce when their trimmed content parses
/// as a float. Everything else (booleans, null, arrays, objects) is rejected,
/// as are NaN and infinities since they cannot round-trip through JSON.
pub fn coerce(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Six pollutant concentrations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
    pub co: f64,
    pub so2: f64,
}

impl Pollutants {
    /// Validate a JSON object carrying all six fields
    ///
    /// Unknown keys are ignored.
    pub fn from_json(map: &Map<String, Value>) -> Result<Self> {
        let mut values = [0.0; 6];
        for (slot, pollutant) in values.iter_mut().zip(Pollutant::ALL) {
            let key = pollutant.json_key();
            let value = map
                .get(key)
                .ok_or_else(|| Error::Validation(format!("missing field '{}'", key)))?;
            *slot = coerce(value)
                .ok_or_else(|| Error::Validation(format!("field '{}' is not numeric", key)))?;
        }
        Ok(Self::from_features(values))
    }

    /// Validate the manual prediction form (`PM2.5`, `PM10`, ...)
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self> {
        let mut values = [0.0; 6];
        for (slot, pollutant) in values.iter_mut().zip(Pollutant::ALL) {
            let key = pollutant.form_key();
            *slot = form
                .get(key)
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::Validation(key.to_string()))?;
        }
        Ok(Self::from_features(values))
    }

    /// Build from a feature vector in model order
    pub fn from_features(features: [f64; 6]) -> Self {
        let [pm25, pm10, o3, no2, co, so2] = features;
        Self { pm25, pm10, o3, no2, co, so2 }
    }

    /// Feature vector in model order (pm25, pm10, o3, no2, co, so2)
    pub fn features(&self) -> [f64; 6] {
        [self.pm25, self.pm10, self.o3, self.no2, self.co, self.so2]
    }

    /// Read a single field
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::O3 => self.o3,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::So2 => self.so2,
        }
    }

    fn slot_mut(&mut self, pollutant: Pollutant) -> &mut f64 {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::O3 => &mut self.o3,
            Pollutant::No2 => &mut self.no2,
            Pollutant::Co => &mut self.co,
            Pollutant::So2 => &mut self.so2,
        }
    }

    /// Overwrite exactly the fields present in `patch`
    pub fn apply(&mut self, patch: &PollutantPatch) {
        for pollutant in Pollutant::ALL {
            if let Some(value) = patch.get(pollutant) {
                *self.slot_mut(pollutant) = value;
            }
        }
    }
}

/// Partial set of pollutant values for record updates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollutantPatch {
    values: [Option<f64>; 6],
}

impl PollutantPatch {
    /// Validate an update body
    ///
    /// Every recognised key that is present must coerce. At least one of the
    /// six fields must be present; unknown keys are ignored.
    pub fn from_json(map: &Map<String, Value>) -> Result<Self> {
        let mut patch = Self::default();
        for (slot, pollutant) in patch.values.iter_mut().zip(Pollutant::ALL) {
            let key = pollutant.json_key();
            if let Some(value) = map.get(key) {
                let coerced = coerce(value)
                    .ok_or_else(|| Error::Validation(format!("field '{}' is not numeric", key)))?;
                *slot = Some(coerced);
            }
        }

        if patch.is_empty() {
            return Err(Error::Validation("no pollutant fields supplied".to_string()));
        }
        Ok(patch)
    }

    /// Value supplied for `pollutant`, if any
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        let index = Pollutant::ALL.iter().position(|p| *p == pollutant)?;
        self.values[index]
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}
