use super::fetch_json;
use crate::command::{Category, Command, CommandResult};
use crate::context::TerminalContext;
use crate::output::{DeferredOutput, OutputLine};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// weather
/// Current conditions from open-meteo for the configured city.
pub struct WeatherCommand;

#[derive(Debug, Deserialize)]
struct Forecast {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    time: String,
}

impl Command for WeatherCommand {
    fn usage(&self) -> &'static str {
        "weather"
    }

    fn summary(&self) -> &'static str {
        "Current weather for the home city"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let city = ctx.config.apis.weather_city.clone();
        let loading = format!("Fetching weather for {}...", city);
        fetch_json(ctx, &ctx.config.apis.weather, &loading, "weather data", move |f: Forecast| {
            Ok(format_weather(&city, &f.current_weather))
        })
    }
}

/// open-meteo reports local time as `2025-01-06T14:00`.
fn format_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn format_weather(city: &str, now: &CurrentWeather) -> DeferredOutput {
    DeferredOutput::lines(vec![
        OutputLine::blank(),
        OutputLine::success(format!("🌤️  Weather in {}", city)),
        OutputLine::plain(format!("   Temperature: {}°C", now.temperature)),
        OutputLine::plain(format!("   Wind Speed: {} km/h", now.windspeed)),
        OutputLine::plain(format!("   Time: {}", format_time(&now.time))),
        OutputLine::blank(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Outcome;
    use crate::commands::testing::context_with;
    use crate::error::ShellError;
    use futures::executor::block_on;

    const URL: &str =
        "https://api.open-meteo.com/v1/forecast?latitude=31.5204&longitude=74.3587&current_weather=true";

    fn run(body: &str) -> (Vec<OutputLine>, Result<DeferredOutput, ShellError>) {
        let mut ctx = context_with(&[(URL, body)]);
        match WeatherCommand.execute(&[], &mut ctx).unwrap() {
            Outcome::Deferred { lines, pending } => (lines, block_on(pending)),
            _ => panic!("weather is deferred"),
        }
    }

    #[test]
    fn test_weather_report() {
        let body = r#"{"current_weather":{"temperature":24.5,"windspeed":11.0,"time":"2025-01-06T14:00","weathercode":3}}"#;
        let (now, later) = run(body);
        assert_eq!(now, vec![OutputLine::info("Fetching weather for Lahore...")]);
        let texts: Vec<String> = later.unwrap().lines.into_iter().map(|l| l.text).collect();
        assert_eq!(
            texts,
            vec![
                "",
                "🌤️  Weather in Lahore",
                "   Temperature: 24.5°C",
                "   Wind Speed: 11 km/h",
                "   Time: 06/01/2025, 14:00:00",
                "",
            ]
        );
    }

    #[test]
    fn test_weather_malformed_body() {
        let (_, later) = run(r#"{"hourly":{}}"#);
        assert_eq!(later.unwrap_err(), ShellError::NetworkFetchFailure("weather data".into()));
    }

    #[test]
    fn test_unparseable_time_kept_verbatim() {
        assert_eq!(format_time("soon"), "soon");
    }
}
