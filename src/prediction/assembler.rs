use chrono::{Datelike, Timelike};

use super::error::{DashboardError, Result};
use super::inputs::{HiddenDefaults, RawInputs};
use super::schema::{Feature, FeatureSchema};

// ---------------------------------------------------------------------------
// FeatureVector – one row in schema order
// ---------------------------------------------------------------------------

/// A single row of named model inputs.
///
/// Only [`assemble`] builds these, so the column order always equals the
/// schema the row was assembled against.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Value of every producible feature, indexed like [`Feature::ALL`].
fn canonical_row(raw: &RawInputs, defaults: &HiddenDefaults) -> Result<[f64; 14]> {
    let ts = raw.timestamp()?;
    let holiday = raw.holiday.unwrap_or(defaults.holiday);
    let daylight = raw.daylight.unwrap_or(defaults.daylight);

    Ok(Feature::ALL.map(|feature| match feature {
        Feature::GlobalReactivePower => defaults.global_reactive_power,
        Feature::Voltage => raw.voltage,
        Feature::GlobalIntensity => raw.global_intensity,
        Feature::SubMetering1 => raw.sub_metering[0],
        Feature::SubMetering2 => raw.sub_metering[1],
        Feature::SubMetering3 => raw.sub_metering[2],
        Feature::Year => ts.year() as f64,
        Feature::Month => ts.month() as f64,
        Feature::Day => ts.day() as f64,
        Feature::Hour => ts.hour() as f64,
        Feature::Minute => ts.minute() as f64,
        Feature::IsHoliday => holiday.flag(),
        Feature::Light => daylight.flag(),
        Feature::Weekday => ts.weekday().num_days_from_monday() as f64,
    }))
}

/// Build the model input row for `raw`, ordered exactly like `schema`.
///
/// Features missing from the schema are left out. A schema column that no
/// feature can fill is a [`DashboardError::SchemaMismatch`]; nothing is padded.
pub fn assemble(
    raw: &RawInputs,
    schema: &FeatureSchema,
    defaults: &HiddenDefaults,
) -> Result<FeatureVector> {
    let missing = schema.unknown_columns();
    if !missing.is_empty() {
        return Err(DashboardError::SchemaMismatch {
            schema: schema.name().to_string(),
            missing,
        });
    }

    let row = canonical_row(raw, defaults)?;
    let values = schema
        .columns()
        .iter()
        .filter_map(|col| Feature::from_name(col))
        .map(|feature| row[feature as usize])
        .collect();

    Ok(FeatureVector {
        columns: schema.columns().to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::prediction::inputs::{Daylight, Holiday};

    fn scenario() -> RawInputs {
        RawInputs {
            voltage: 240.0,
            global_intensity: 4.63,
            sub_metering: [1.12, 1.30, 6.46],
            date: NaiveDate::from_ymd_opt(2024, 11, 28).unwrap(),
            hour: 12,
            minute: 0,
            holiday: Some("No".parse().unwrap()),
            daylight: Some("Day".parse().unwrap()),
        }
    }

    fn schema_of(columns: &[&str]) -> FeatureSchema {
        FeatureSchema::new("test", 1, columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn end_to_end_scenario_vector() {
        let schema = FeatureSchema::canonical();
        let v = assemble(&scenario(), &schema, &HiddenDefaults::default()).unwrap();
        let (measured, calendar) = v.values().split_at(6);
        assert_eq!(measured, [0.0, 240.0, 4.63, 1.12, 1.30, 6.46]);
        assert_eq!(calendar, [2024.0, 11.0, 28.0, 12.0, 0.0, 0.0, 1.0, 3.0]);
        assert_eq!(v.columns(), schema.columns());
    }

    #[test]
    fn thursday_is_weekday_three() {
        let schema = schema_of(&["Weekday"]);
        let v = assemble(&scenario(), &schema, &HiddenDefaults::default()).unwrap();
        assert_eq!(v.get("Weekday"), Some(3.0));
    }

    #[test]
    fn follows_every_rotation_and_reversal_of_the_schema() {
        let schema = FeatureSchema::canonical();
        let canonical = assemble(&scenario(), &schema, &HiddenDefaults::default()).unwrap();
        let base: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();

        let mut orders = Vec::new();
        for k in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(k);
            orders.push(rotated.clone());
            rotated.reverse();
            orders.push(rotated);
        }

        for order in orders {
            let v = assemble(&scenario(), &schema_of(&order), &HiddenDefaults::default()).unwrap();
            let keys: Vec<&str> = v.columns().iter().map(String::as_str).collect();
            assert_eq!(keys, order);
            for (name, value) in v.iter() {
                assert_eq!(Some(value), canonical.get(name), "column {name}");
            }
        }
    }

    #[test]
    fn all_permutations_of_a_small_schema() {
        let names = ["Voltage", "Hour", "Is_holiday", "Weekday"];
        let mut count = 0;
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let idx = [a, b, c, d];
                        let mut sorted = idx;
                        sorted.sort_unstable();
                        if sorted != [0, 1, 2, 3] {
                            continue;
                        }
                        let order: Vec<&str> = idx.iter().map(|&i| names[i]).collect();
                        let schema = schema_of(&order);
                        let v = assemble(&scenario(), &schema, &HiddenDefaults::default()).unwrap();
                        let keys: Vec<&str> = v.columns().iter().map(String::as_str).collect();
                        assert_eq!(keys, order);
                        count += 1;
                    }
                }
            }
        }
        assert_eq!(count, 24);
    }

    #[test]
    fn assembly_is_deterministic() {
        let schema = FeatureSchema::canonical();
        let defaults = HiddenDefaults::default();
        let first = assemble(&scenario(), &schema, &defaults).unwrap();
        let second = assemble(&scenario(), &schema, &defaults).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_schema_column_is_a_mismatch() {
        let err = assemble(
            &scenario(),
            &schema_of(&["Voltage", "Outdoor_temperature", "Hour"]),
            &HiddenDefaults::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DashboardError::SchemaMismatch {
                schema: "test".to_string(),
                missing: vec!["Outdoor_temperature".to_string()],
            }
        );
    }

    #[test]
    fn hidden_selectors_use_defaults() {
        let mut raw = scenario();
        raw.holiday = None;
        raw.daylight = None;
        let defaults = HiddenDefaults {
            global_reactive_power: 0.25,
            holiday: Holiday::Yes,
            daylight: Daylight::Night,
        };
        let v = assemble(&raw, &FeatureSchema::canonical(), &defaults).unwrap();
        assert_eq!(v.get("Global_reactive_power"), Some(0.25));
        assert_eq!(v.get("Is_holiday"), Some(1.0));
        assert_eq!(v.get("Light"), Some(0.0));
    }

    #[test]
    fn exposed_selectors_override_defaults() {
        let mut raw = scenario();
        raw.holiday = Some(Holiday::Yes);
        raw.daylight = Some(Daylight::Night);
        let schema = FeatureSchema::canonical();
        let v = assemble(&raw, &schema, &HiddenDefaults::default()).unwrap();
        assert_eq!(v.get("Is_holiday"), Some(1.0));
        assert_eq!(v.get("Light"), Some(0.0));
    }

    #[test]
    fn subset_schema_drops_unlisted_features() {
        let schema = schema_of(&["Minute", "Voltage"]);
        let v = assemble(&scenario(), &schema, &HiddenDefaults::default()).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.values(), &[0.0, 240.0]);
    }

    #[test]
    fn invalid_clock_short_circuits() {
        let mut raw = scenario();
        raw.minute = 75;
        let schema = FeatureSchema::canonical();
        let err = assemble(&raw, &schema, &HiddenDefaults::default()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidInput { field: "minute", .. }
        ));
    }
}
