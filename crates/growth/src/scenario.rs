use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use agrolytics_core::{DomainError, DomainResult, ValueObject};

/// Yearly rates applied to the running population.
///
/// Missing keys deserialize to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthRates {
    pub birth_rate: f64,
    pub sale_rate: f64,
    pub mortality_rate: f64,
}

impl ValueObject for GrowthRates {}

impl GrowthRates {
    pub fn new(birth_rate: f64, sale_rate: f64, mortality_rate: f64) -> Self {
        Self {
            birth_rate,
            sale_rate,
            mortality_rate,
        }
    }

    /// Build rates from a loose key/value map (request parameters).
    ///
    /// Unknown keys are ignored; missing ones are `0`.
    pub fn from_map(rates: &HashMap<String, f64>) -> Self {
        let rate = |key: &str| rates.get(key).copied().unwrap_or(0.0);
        Self {
            birth_rate: rate("birth_rate"),
            sale_rate: rate("sale_rate"),
            mortality_rate: rate("mortality_rate"),
        }
    }
}

/// Parameters for one projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthScenario {
    pub start_year: i32,
    pub horizon_years: i32,
    pub initial_population: f64,
    #[serde(default)]
    pub rates: GrowthRates,
}

impl ValueObject for GrowthScenario {}

impl GrowthScenario {
    pub fn new(start_year: i32, horizon_years: i32, initial_population: f64, rates: GrowthRates) -> Self {
        Self {
            start_year,
            horizon_years,
            initial_population,
            rates,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.horizon_years <= 0 {
            return Err(DomainError::invalid_parameter(
                "horizon_years",
                format!("must be a positive integer (got {})", self.horizon_years),
            ));
        }
        if !(self.initial_population.is_finite() && self.initial_population >= 0.0) {
            return Err(DomainError::invalid_parameter(
                "initial_population",
                format!("must be a finite value >= 0 (got {})", self.initial_population),
            ));
        }
        let GrowthRates {
            birth_rate,
            sale_rate,
            mortality_rate,
        } = self.rates;
        for (name, value) in [
            ("birth_rate", birth_rate),
            ("sale_rate", sale_rate),
            ("mortality_rate", mortality_rate),
        ] {
            if !value.is_finite() {
                return Err(DomainError::invalid_parameter(name, "must be finite"));
            }
        }
        if self.start_year.checked_add(self.horizon_years - 1).is_none() {
            return Err(DomainError::invalid_parameter(
                "horizon_years",
                "projection would run past the representable year range",
            ));
        }
        Ok(())
    }
}

/// Ordered `year -> population` mapping.
///
/// Serializes as a JSON object keyed by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthProjection(BTreeMap<i32, f64>);

impl ValueObject for GrowthProjection {}

impl GrowthProjection {
    pub(crate) fn record(&mut self, year: i32, value: f64) {
        self.0.insert(year, value);
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.0.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.0.iter().map(|(y, v)| (*y, *v))
    }

    /// Population at the end of the horizon.
    pub fn final_value(&self) -> Option<f64> {
        self.0.values().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_from_map_default_missing_keys() {
        let mut map = HashMap::new();
        map.insert("birth_rate".to_string(), 0.2);
        map.insert("unrelated".to_string(), 9.0);

        let rates = GrowthRates::from_map(&map);
        assert_eq!(rates, GrowthRates::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn scenario_deserializes_with_partial_rates() {
        let scenario: GrowthScenario = serde_json::from_str(
            r#"{"start_year": 2025, "horizon_years": 3, "initial_population": 100,
                "rates": {"sale_rate": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(scenario.rates, GrowthRates::new(0.0, 0.1, 0.0));

        let bare: GrowthScenario = serde_json::from_str(
            r#"{"start_year": 2025, "horizon_years": 1, "initial_population": 5}"#,
        )
        .unwrap();
        assert_eq!(bare.rates, GrowthRates::default());
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let ok = GrowthScenario::new(2025, 3, 100.0, GrowthRates::default());
        ok.validate().unwrap();

        for bad in [
            GrowthScenario::new(2025, 0, 100.0, GrowthRates::default()),
            GrowthScenario::new(2025, -2, 100.0, GrowthRates::default()),
            GrowthScenario::new(2025, 3, -1.0, GrowthRates::default()),
            GrowthScenario::new(2025, 3, f64::NAN, GrowthRates::default()),
            GrowthScenario::new(2025, 3, 1.0, GrowthRates::new(f64::INFINITY, 0.0, 0.0)),
            GrowthScenario::new(i32::MAX, 2, 1.0, GrowthRates::default()),
        ] {
            let err = bad.validate().unwrap_err();
            assert!(matches!(err, DomainError::InvalidParameter { .. }), "{bad:?}");
        }
    }

    #[test]
    fn projection_serializes_as_year_object() {
        let mut p = GrowthProjection::default();
        p.record(2026, 110.25);
        p.record(2025, 105.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"2025":105.0,"2026":110.25}"#);
        assert_eq!(p.final_value(), Some(110.25));
    }
}
