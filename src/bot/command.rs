// Chat command parsing.
// Turns `!`-prefixed message text into a Command, with quoted multi-word locations.

use chrono::NaiveDate;

use crate::error::InputError;

pub const PREFIX: char = '!';

/// Accepted date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A location and day to forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub location: String,
    pub date: NaiveDate,
}

/// A recognized bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One-off forecast.
    Weather(ForecastRequest),
    /// Forecast and save for later updates.
    Track(ForecastRequest),
    /// Refresh every tracked forecast.
    Tracked,
    /// Stop tracking a location and date.
    Untrack(ForecastRequest),
    /// Forget every tracked forecast.
    Clear,
    Help,
}

impl Command {
    /// Parse message text. Returns `None` when the text is not addressed to this bot.
    pub fn parse(raw: &str) -> Option<Result<Command, InputError>> {
        let body = raw.trim().strip_prefix(PREFIX)?;
        let (name, args) = match body.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (body, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "weather" => request("weather", args).map(Command::Weather),
            "track" | "forecast" => request("track", args).map(Command::Track),
            "untrack" | "remove" => request("untrack", args).map(Command::Untrack),
            "tracked" | "update" => Ok(Command::Tracked),
            "clear" => Ok(Command::Clear),
            "help" => Ok(Command::Help),
            _ => return None,
        };
        Some(command)
    }
}

fn request(command: &'static str, args: &str) -> Result<ForecastRequest, InputError> {
    let mut tokens = tokenize(args);
    if tokens.len() < 2 {
        return Err(InputError::MissingArguments { command });
    }

    let date = tokens.pop().map(|d| parse_date(&d)).transpose()?;
    let location = tokens.join(" ");
    match date {
        Some(date) if !location.trim().is_empty() => Ok(ForecastRequest { location, date }),
        _ => Err(InputError::MissingArguments { command }),
    }
}

/// Parse a date in any of the accepted formats.
pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| InputError::InvalidDate(text.to_string()))
}

/// Split on whitespace, keeping `"..."` and `'...'` groups together.
///
/// A quote opens a group only at the start of a word and closes it only at the
/// end of one, so apostrophes inside names (`O'Fallon`, `St. John's`) are literal.
fn tokenize(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q && chars.peek().is_none_or(|next| next.is_whitespace()) => {
                quote = None;
                push_token(&mut tokens, &mut current);
            }
            Some(_) => current.push(c),
            None if (c == '"' || c == '\'') && current.is_empty() => quote = Some(c),
            None if c.is_whitespace() => push_token(&mut tokens, &mut current),
            None => current.push(c),
        }
    }

    if quote.is_some() {
        // Unterminated group: its last word is still the date.
        if let Some((location, date)) = current.trim().rsplit_once(char::is_whitespace) {
            let (mut location, mut date) = (location.to_string(), date.to_string());
            push_token(&mut tokens, &mut location);
            push_token(&mut tokens, &mut date);
            current.clear();
        }
    }
    push_token(&mut tokens, &mut current);
    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_not_a_command() {
        assert!(Command::parse("hello there").is_none());
        assert!(Command::parse("!dance").is_none());
        assert!(Command::parse("").is_none());
    }

    #[test]
    fn test_weather() {
        let cmd = Command::parse("!weather Boston 2024-07-04").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Weather(ForecastRequest {
                location: "Boston".to_string(),
                date: date(2024, 7, 4),
            })
        );
    }

    #[test]
    fn test_quoted_location() {
        let cmd = Command::parse("!forecast \"New York\" 03/24/2025")
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Track(ForecastRequest {
                location: "New York".to_string(),
                date: date(2025, 3, 24),
            })
        );
    }

    #[test]
    fn test_unquoted_multi_word_location() {
        let cmd = Command::parse("!untrack San Francisco 2025-03-24")
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Untrack(ForecastRequest {
                location: "San Francisco".to_string(),
                date: date(2025, 3, 24),
            })
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            Command::parse("!weather").unwrap(),
            Err(InputError::MissingArguments { command: "weather" })
        );
        assert_eq!(
            Command::parse("!track Boston").unwrap(),
            Err(InputError::MissingArguments { command: "track" })
        );
    }

    #[test]
    fn test_bad_date() {
        assert_eq!(
            Command::parse("!weather Boston tomorrow").unwrap(),
            Err(InputError::InvalidDate("tomorrow".to_string()))
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        assert_eq!(Command::parse("!TRACKED").unwrap(), Ok(Command::Tracked));
        assert_eq!(Command::parse("  !update").unwrap(), Ok(Command::Tracked));
        assert_eq!(Command::parse("!Clear").unwrap(), Ok(Command::Clear));
        assert_eq!(Command::parse("!help me").unwrap(), Ok(Command::Help));
    }

    #[test]
    fn test_apostrophe_in_city() {
        for (raw, city) in [
            ("!weather O'Fallon 2025-03-24", "O'Fallon"),
            ("!weather Coeur d'Alene 2025-03-24", "Coeur d'Alene"),
            ("!weather St. John's 2025-03-24", "St. John's"),
            ("!weather 'St. John's' 2025-03-24", "St. John's"),
        ] {
            assert_eq!(
                Command::parse(raw).unwrap(),
                Ok(Command::Weather(ForecastRequest {
                    location: city.to_string(),
                    date: date(2025, 3, 24),
                })),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            Command::parse("!track \"New York 2025-03-24").unwrap(),
            Ok(Command::Track(ForecastRequest {
                location: "New York".to_string(),
                date: date(2025, 3, 24),
            }))
        );
        assert_eq!(
            Command::parse("!track \"Boston 03/24/2025").unwrap(),
            Ok(Command::Track(ForecastRequest {
                location: "Boston".to_string(),
                date: date(2025, 3, 24),
            }))
        );
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize("'St. Andrews' 2025-06-01"),
            vec!["St. Andrews".to_string(), "2025-06-01".to_string()]
        );
        assert_eq!(tokenize("  a   b "), vec!["a".to_string(), "b".to_string()]);
    }
}
