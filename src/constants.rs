pub const FORECAST_BASE_URL: &str = "https://api.open-meteo.com";
pub const FORECAST_PATH: &str = "/v1/forecast";
pub const WINDSPEED_UNIT: &str = "kn";
pub const FORECAST_DAYS: u8 = 1;
pub const LEGAL_NOTICE: &str = "Weather data by Open-Meteo.com (https://open-meteo.com)";

/// Pressure level (hPa) to altitude label (hundreds of feet), highest level first.
pub const PRESSURE_LEVELS: [(u16, u16); 11] = [
    (200, 390),
    (250, 340),
    (300, 300),
    (400, 240),
    (500, 180),
    (600, 140),
    (700, 100),
    (800, 64),
    (850, 50),
    (900, 30),
    (925, 25),
];

pub const SURFACE_LEVEL_LABEL: &str = "0";
pub const SURFACE_TEMPERATURE: &str = "temperature_2m";
pub const SURFACE_WINDSPEED: &str = "windspeed_10m";
pub const SURFACE_WINDDIRECTION: &str = "winddirection_10m";
pub const LEVEL_DATAPOINTS: [&str; 3] = ["temperature", "windspeed", "winddirection"];

pub const CELSIUS_TO_KELVIN: f64 = 273.15;
pub const MISSING_VALUE: &str = "undefined";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3030";
pub const DEFAULT_REGIONS_FILE: &str = "config/regions.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 900;
