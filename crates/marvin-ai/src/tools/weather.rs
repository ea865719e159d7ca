//! Mock weather lookup backed by a static city table.

/// One row of the mock weather table.
#[derive(Debug, Clone, Copy)]
pub struct WeatherEntry {
    pub city: &'static str,
    pub temperature_c: f64,
    pub condition: &'static str,
    pub humidity_pct: u8,
    pub wind_kph: f64,
}

const WEATHER_TABLE: &[WeatherEntry] = &[
    WeatherEntry {
        city: "tokyo",
        temperature_c: 22.5,
        condition: "Sunny",
        humidity_pct: 65,
        wind_kph: 13.7,
    },
    WeatherEntry {
        city: "london",
        temperature_c: 14.0,
        condition: "Cloudy",
        humidity_pct: 78,
        wind_kph: 19.8,
    },
    WeatherEntry {
        city: "new york",
        temperature_c: 18.4,
        condition: "Partly Cloudy",
        humidity_pct: 70,
        wind_kph: 16.3,
    },
    WeatherEntry {
        city: "san francisco",
        temperature_c: 20.4,
        condition: "Foggy",
        humidity_pct: 85,
        wind_kph: 10.8,
    },
    WeatherEntry {
        city: "paris",
        temperature_c: 16.1,
        condition: "Light Rain",
        humidity_pct: 82,
        wind_kph: 12.2,
    },
];

/// Fallback for cities not in the table, so the tool never fails on input
/// the model invents.
const DEFAULT_ENTRY: WeatherEntry = WeatherEntry {
    city: "",
    temperature_c: 21.0,
    condition: "Clear",
    humidity_pct: 60,
    wind_kph: 8.0,
};

/// Look up the mock weather for a city (case-insensitive substring match).
pub fn lookup_weather(city: &str) -> WeatherEntry {
    let needle = city.trim().to_lowercase();
    WEATHER_TABLE
        .iter()
        .find(|entry| needle.contains(entry.city))
        .copied()
        .unwrap_or(DEFAULT_ENTRY)
}

/// Tool output: the weather report as a JSON string.
pub(super) fn report(city: &str) -> String {
    let entry = lookup_weather(city);
    serde_json::json!({
        "city": city,
        "temperature_c": entry.temperature_c,
        "condition": entry.condition,
        "humidity_pct": entry.humidity_pct,
        "wind_kph": entry.wind_kph,
    })
    .to_string()
}
