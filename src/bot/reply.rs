// Reply formatting.
// Renders forecasts, verdicts, and errors as Discord markdown.

use chrono::NaiveDate;

use crate::error::{ForecastError, InputError};
use crate::golf::Verdict;
use crate::weather::{FORECAST_HORIZON_DAYS, Forecast};

/// Discord's per-message character limit.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

pub const USAGE: &str = "\
**Golf forecast commands:**
`!weather <city> <date>` - forecast and golf verdict for a day
`!track <city> <date>` - same, and keep it in the tracked list (alias `!forecast`)
`!tracked` - refresh every tracked forecast (alias `!update`)
`!untrack <city> <date>` - stop tracking a forecast (alias `!remove`)
`!clear` - stop tracking everything
Dates: YYYY-MM-DD or MM/DD/YYYY. Quote multi-word cities: `!weather \"New York\" 2025-03-24`";

/// Full forecast with the golf verdict.
pub fn forecast(forecast: &Forecast, verdict: &Verdict) -> String {
    let marker = if verdict.good { "✅" } else { "❌" };
    format!(
        "📅 **Weather Forecast for {} on {}:**\n\
         🔹 **Condition:** {}\n\
         🌡 **Temperature:** High: {}°F | Low: {}°F | Avg: {}°F\n\
         💧 **Humidity:** {}%\n\
         💨 **Wind Speed:** {} mph\n\
         🌧 **Chance of Rain:** {}%\n\n\
         🏌️ **Golf:** {} {}",
        forecast.location,
        forecast.date.format("%Y-%m-%d"),
        forecast.condition,
        forecast.high,
        forecast.low,
        forecast.temperature,
        forecast.humidity,
        forecast.wind_speed,
        forecast.rain_chance,
        marker,
        verdict.reason,
    )
}

pub fn input_error(err: &InputError) -> String {
    match err {
        InputError::MissingArguments { .. } => {
            format!("Please provide both a city and a date.\n\n{}", USAGE)
        }
        InputError::InvalidDate(_) => err.to_string(),
    }
}

pub fn forecast_error(err: &ForecastError, location: &str, date: NaiveDate) -> String {
    match err {
        ForecastError::LocationNotFound(_) => {
            format!("Sorry, I couldn't find a place called **{}**.", location)
        }
        ForecastError::DateOutOfRange { .. } => format!(
            "You can only request forecasts for the next {} days.",
            FORECAST_HORIZON_DAYS
        ),
        ForecastError::ProviderUnavailable(_) => format!(
            "Sorry, I couldn't fetch weather data for **{}** on **{}** right now. Please try again later.",
            location,
            date.format("%Y-%m-%d")
        ),
    }
}

pub fn tracking_started(location: &str, date: NaiveDate) -> String {
    format!(
        "📌 Tracking **{}** on **{}**. Use `!tracked` for updates.",
        location,
        date.format("%Y-%m-%d")
    )
}

pub const SAVE_FAILED: &str = "⚠️ Could not save this forecast for tracking.";

/// Split `text` into chunks of at most `limit` characters, preferring line breaks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut has_line = false;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if has_line { line_len + 1 } else { line_len };

        if has_line && current_len + needed > limit {
            flush(&mut chunks, &mut current);
            current_len = 0;
            has_line = false;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if has_line {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        has_line = true;
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = std::mem::take(current);
    if !chunk.trim().is_empty() {
        chunks.push(chunk);
    }
}
