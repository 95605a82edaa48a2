use crate::model::{city::City, result::NewResult, salary::Salary};
use derive_more::{Display, Error};
use std::collections::BTreeMap;

#[derive(Debug, Display, Error, PartialEq)]
pub enum CalcError {
    #[display(fmt = "no salary data, upload employee salaries first")]
    NoSalaryData,

    #[display(fmt = "no city standard data, upload city standards first")]
    NoCityData,

    #[display(fmt = "no city standard found for {}", _0)]
    CityNotFound(#[error(not(source))] String),
}

/// Rounds to 2 decimals, halves going up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Restricts `value` to `[min, max]`. A city whose min exceeds its max
/// yields `min` for low values and `max` for high ones, never panics.
fn clamp_base(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Computes one result per distinct employee name, ordered by name.
pub fn calculate(
    salaries: &[Salary],
    cities: &[City],
    city_name: &str,
) -> Result<Vec<NewResult>, CalcError> {
    if salaries.is_empty() {
        return Err(CalcError::NoSalaryData);
    }
    if cities.is_empty() {
        return Err(CalcError::NoCityData);
    }

    let city = cities
        .iter()
        .find(|c| c.city_name == city_name)
        .ok_or_else(|| CalcError::CityNotFound(city_name.to_string()))?;

    // name -> (sum, count)
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for salary in salaries {
        let entry = groups.entry(salary.employee_name.as_str()).or_insert((0.0, 0));
        entry.0 += salary.salary_amount;
        entry.1 += 1;
    }

    let results = groups
        .into_iter()
        .map(|(name, (sum, count))| {
            let avg_salary = sum / count as f64;
            let contribution_base = clamp_base(avg_salary, city.base_min, city.base_max);
            let company_fee = contribution_base * city.rate;

            NewResult {
                employee_name: name.to_string(),
                avg_salary: round2(avg_salary),
                contribution_base: round2(contribution_base),
                company_fee: round2(company_fee),
            }
        })
        .collect();

    Ok(results)
}
