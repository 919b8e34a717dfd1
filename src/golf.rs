// Golf-suitability rule.
// Maps a forecast onto a good/not-good verdict using fixed thresholds.

use crate::weather::Forecast;

/// Conditions that count as good golfing weather.
pub const GOOD_CONDITIONS: &[&str] = &["Sunny", "Clear", "Partly Cloudy", "Overcast", "Mist"];

/// Conditions that are playable with some discomfort.
pub const DECENT_CONDITIONS: &[&str] = &["Cloudy", "Fog", "Patchy light drizzle", "Light drizzle"];

/// Thresholds used by [`evaluate`]. Temperatures in °F, wind in mph, chances in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GolfThresholds {
    pub ideal_min_temp: f64,
    pub ideal_max_rain: u8,
    pub ideal_max_wind: f64,
    pub ideal_max_humidity: u8,
    pub decent_min_temp: f64,
    pub breezy_wind: f64,
    pub rain_out: u8,
    pub too_cold: f64,
    pub gale_wind: f64,
    pub chilly_below: f64,
    pub hot_above: f64,
    pub humid_from: u8,
}

impl GolfThresholds {
    pub const DEFAULT: GolfThresholds = GolfThresholds {
        ideal_min_temp: 60.0,
        ideal_max_rain: 40,
        ideal_max_wind: 15.0,
        ideal_max_humidity: 85,
        decent_min_temp: 55.0,
        breezy_wind: 10.0,
        rain_out: 50,
        too_cold: 45.0,
        gale_wind: 20.0,
        chilly_below: 65.0,
        hot_above: 80.0,
        humid_from: 85,
    };
}

impl Default for GolfThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of the golf rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub good: bool,
    pub reason: String,
}

impl Verdict {
    fn good(reason: &str) -> Self {
        Self {
            good: true,
            reason: reason.to_string(),
        }
    }

    fn poor(reason: &str) -> Self {
        Self {
            good: false,
            reason: reason.to_string(),
        }
    }
}

fn condition_in(condition: &str, list: &[&str]) -> bool {
    list.iter().any(|c| c.eq_ignore_ascii_case(condition.trim()))
}

/// Judge a forecast with the default thresholds.
pub fn is_good_for_golf(forecast: &Forecast) -> Verdict {
    evaluate(forecast, &GolfThresholds::DEFAULT)
}

/// Judge a forecast. Rules are checked in order and the first match wins.
pub fn evaluate(forecast: &Forecast, t: &GolfThresholds) -> Verdict {
    let temp = forecast.temperature;
    let wind = forecast.wind_speed;
    let good_sky = condition_in(&forecast.condition, GOOD_CONDITIONS);
    let decent_sky = condition_in(&forecast.condition, DECENT_CONDITIONS);

    if temp >= t.ideal_min_temp
        && good_sky
        && forecast.rain_chance < t.ideal_max_rain
        && wind < t.ideal_max_wind
        && forecast.humidity < t.ideal_max_humidity
    {
        Verdict::good("Perfect day for golf!")
    } else if decent_sky && temp >= t.decent_min_temp && wind > t.breezy_wind {
        Verdict::good("Decent golfing weather. A little windy.")
    } else if forecast.rain_chance > t.rain_out {
        Verdict::poor("Expect rain. Poor golfing weather.")
    } else if temp < t.too_cold {
        Verdict::poor("Too cold to golf.")
    } else if wind > t.gale_wind {
        Verdict::poor("Very windy conditions.")
    } else if temp < t.chilly_below && wind > t.breezy_wind {
        Verdict::good("A bit chilly, but playable.")
    } else if temp > t.hot_above && forecast.humidity >= t.humid_from {
        Verdict::good("Hot and humid. Stay hydrated!")
    } else {
        Verdict::good("Playable conditions.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn forecast(temp: f64, condition: &str, humidity: u8, wind: f64, rain: u8) -> Forecast {
        Forecast {
            location: "Boston".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            temperature: temp,
            high: temp + 5.0,
            low: temp - 5.0,
            condition: condition.to_string(),
            humidity,
            wind_speed: wind,
            rain_chance: rain,
        }
    }

    #[test]
    fn test_perfect_day() {
        let verdict = is_good_for_golf(&forecast(75.0, "sunny", 40, 8.0, 5));
        assert!(verdict.good);
        assert_eq!(verdict.reason, "Perfect day for golf!");
    }

    #[test]
    fn test_rain_is_poor() {
        let verdict = is_good_for_golf(&forecast(75.0, "sunny", 40, 8.0, 90));
        assert!(!verdict.good);
        assert!(verdict.reason.contains("rain"));
    }

    #[test]
    fn test_decent_and_windy() {
        let verdict = is_good_for_golf(&forecast(58.0, "Cloudy", 60, 12.0, 10));
        assert!(verdict.good);
        assert!(verdict.reason.starts_with("Decent"));
    }

    #[test]
    fn test_too_cold() {
        let verdict = is_good_for_golf(&forecast(38.0, "Sunny", 40, 5.0, 0));
        assert_eq!(verdict, Verdict::poor("Too cold to golf."));
    }

    #[test]
    fn test_gale_beats_chilly() {
        let verdict = is_good_for_golf(&forecast(55.0, "Partly Cloudy", 40, 25.0, 0));
        assert_eq!(verdict, Verdict::poor("Very windy conditions."));
    }

    #[test]
    fn test_chilly_but_playable() {
        let verdict = is_good_for_golf(&forecast(52.0, "Overcast", 40, 12.0, 0));
        assert_eq!(verdict, Verdict::good("A bit chilly, but playable."));
    }

    #[test]
    fn test_hot_and_humid() {
        let verdict = is_good_for_golf(&forecast(88.0, "Sunny", 90, 5.0, 10));
        assert_eq!(verdict, Verdict::good("Hot and humid. Stay hydrated!"));
    }

    #[test]
    fn test_fallback_is_playable() {
        let verdict = is_good_for_golf(&forecast(70.0, "Patchy rain possible", 60, 5.0, 45));
        assert_eq!(verdict, Verdict::good("Playable conditions."));
    }

    #[test]
    fn test_deterministic() {
        let f = forecast(66.0, "Light drizzle", 70, 11.0, 30);
        assert_eq!(is_good_for_golf(&f), is_good_for_golf(&f));
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = GolfThresholds {
            rain_out: 10,
            ..GolfThresholds::DEFAULT
        };
        let f = forecast(70.0, "Cloudy", 60, 5.0, 20);
        assert!(is_good_for_golf(&f).good);
        assert!(!evaluate(&f, &strict).good);
    }
}
