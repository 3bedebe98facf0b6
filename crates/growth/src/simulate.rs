use agrolytics_core::{DomainResult, round2};

use crate::scenario::{GrowthProjection, GrowthScenario};

/// Run the yearly recurrence.
///
/// For each year: `current += current * (birth - sale - mortality)`, computed
/// as separate births/sales/deaths terms. The population is rounded to 2
/// decimals inside the loop and the rounded value seeds the next year, so the
/// recorded output and the next input are always the same number.
///
/// Fails with [`DomainError::InvalidParameter`](agrolytics_core::DomainError)
/// for a non-positive horizon or a negative initial population.
pub fn simulate(scenario: &GrowthScenario) -> DomainResult<GrowthProjection> {
    scenario.validate()?;

    let rates = scenario.rates;
    let mut projection = GrowthProjection::default();
    let mut current = scenario.initial_population;

    for offset in 0..scenario.horizon_years {
        let births = current * rates.birth_rate;
        let sales = current * rates.sale_rate;
        let deaths = current * rates.mortality_rate;
        current = round2(current + births - sales - deaths);
        projection.record(scenario.start_year + offset, current);
    }

    tracing::debug!(
        start_year = scenario.start_year,
        horizon = scenario.horizon_years,
        initial = scenario.initial_population,
        final_value = ?projection.final_value(),
        "simulated growth projection"
    );

    Ok(projection)
}
