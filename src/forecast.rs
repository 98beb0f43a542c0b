use std::collections::HashMap;
use std::future::Future;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::constants::{
    CELSIUS_TO_KELVIN, FORECAST_DAYS, FORECAST_PATH, LEVEL_DATAPOINTS, MISSING_VALUE,
    PRESSURE_LEVELS, SURFACE_LEVEL_LABEL, SURFACE_TEMPERATURE, SURFACE_WINDDIRECTION,
    SURFACE_WINDSPEED, WINDSPEED_UNIT,
};
use crate::types::{Fix, FixCoords, FixSnapshot, LevelReading};
use crate::utils::format_number;

/// Black-box fetch of one forecast document.
pub trait ForecastTransport: Send + Sync {
    fn get_forecast(&self, url: &str) -> impl Future<Output = Result<ForecastResponse>> + Send;
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub hourly: Option<HashMap<String, Value>>,
}

impl ForecastResponse {
    fn value_at(&self, parameter: &str, hour_index: usize) -> Option<f64> {
        self.hourly
            .as_ref()?
            .get(parameter)?
            .as_array()?
            .get(hour_index)?
            .as_f64()
    }
}

/// Surface parameters first, then one temperature/speed/direction triple per
/// pressure level in table order.
pub fn hourly_parameters() -> &'static [String] {
    static PARAMETERS: OnceLock<Vec<String>> = OnceLock::new();
    PARAMETERS.get_or_init(|| {
        let mut parameters = vec![
            SURFACE_TEMPERATURE.to_string(),
            SURFACE_WINDSPEED.to_string(),
            SURFACE_WINDDIRECTION.to_string(),
        ];
        for (pressure, _) in PRESSURE_LEVELS {
            for datapoint in LEVEL_DATAPOINTS {
                parameters.push(level_parameter(datapoint, pressure));
            }
        }
        parameters
    })
}

fn level_parameter(datapoint: &str, pressure: u16) -> String {
    format!("{datapoint}_{pressure}hPa")
}

pub fn build_forecast_url(base_url: &str, fix: &Fix) -> String {
    format!(
        "{base_url}{FORECAST_PATH}?latitude={}&longitude={}&windspeed_unit={WINDSPEED_UNIT}&forecast_days={FORECAST_DAYS}&hourly={}",
        fix.lat,
        fix.lon,
        hourly_parameters().join(",")
    )
}

pub async fn fetch_fix_snapshot<T: ForecastTransport>(
    transport: &T,
    base_url: &str,
    fix: &Fix,
    hour_index: usize,
) -> Result<FixSnapshot> {
    let url = build_forecast_url(base_url, fix);
    debug!("Fetching forecast for fix {} (hour {hour_index})", fix.name);
    let response = transport
        .get_forecast(&url)
        .await
        .with_context(|| format!("Forecast request failed for fix {}", fix.name))?;
    Ok(extract_fix_snapshot(fix, &response, hour_index))
}

pub fn extract_fix_snapshot(
    fix: &Fix,
    response: &ForecastResponse,
    hour_index: usize,
) -> FixSnapshot {
    let mut levels = IndexMap::with_capacity(PRESSURE_LEVELS.len() + 1);
    levels.insert(
        SURFACE_LEVEL_LABEL.to_string(),
        reading(
            response,
            hour_index,
            SURFACE_TEMPERATURE,
            SURFACE_WINDSPEED,
            SURFACE_WINDDIRECTION,
        ),
    );

    for (pressure, label) in PRESSURE_LEVELS {
        levels.insert(
            label.to_string(),
            reading(
                response,
                hour_index,
                &level_parameter("temperature", pressure),
                &level_parameter("windspeed", pressure),
                &level_parameter("winddirection", pressure),
            ),
        );
    }

    FixSnapshot {
        coords: FixCoords {
            lat: format_number(fix.lat),
            lon: format_number(fix.lon),
        },
        levels,
    }
}

fn reading(
    response: &ForecastResponse,
    hour_index: usize,
    temperature: &str,
    windspeed: &str,
    winddirection: &str,
) -> LevelReading {
    LevelReading {
        temperature_kelvin: render(
            response
                .value_at(temperature, hour_index)
                .map(celsius_to_kelvin),
        ),
        wind_speed_knots: render(response.value_at(windspeed, hour_index)),
        wind_heading_degrees: render(response.value_at(winddirection, hour_index)),
    }
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + CELSIUS_TO_KELVIN
}

fn render(value: Option<f64>) -> String {
    value
        .map(format_number)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}
