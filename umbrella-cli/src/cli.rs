use std::path::Path;

use clap::Parser;
use tracing::{info, warn};
use umbrella_core::{
    Config, FilterOutcome, ForecastQuery, UmbrellaService, WeekdayZone,
    format::NO_UMBRELLA_MESSAGE, format_message, model, resolve_api_key, validate,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "umbrella",
    version,
    about = "Tells you on which of the next days to take an umbrella",
    allow_missing_positional = true
)]
pub struct Cli {
    /// API key: https://home.openweathermap.org/api_keys (falls back to the saved one).
    #[arg(env = "APIKEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// City name, e.g. "Ribeirão Preto".
    #[arg(value_parser = parse_non_empty)]
    pub city: String,

    /// Humidity above which a day counts as rainy.
    #[arg(short, long, default_value_t = model::DEFAULT_HUMIDITY_THRESHOLD, value_parser = parse_positive)]
    pub limit: f64,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = model::DEFAULT_TIMEOUT_SECS, value_parser = parse_positive)]
    pub timeout: f64,

    /// Report at most this many days.
    #[arg(short, long, default_value_t = model::DEFAULT_MAX_DAYS, value_parser = parse_days)]
    pub days: usize,

    /// Decide weekdays at this UTC offset (hours) instead of local time.
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Store the API key in the config file for later runs.
    #[arg(long)]
    pub save_key: bool,

    /// Increases log verbosity for each occurrence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = Config::config_file_path();
        match path {
            Ok(path) => self.run_with(&path).await,
            Err(err) if !self.save_key => {
                warn!("Ignoring config file: {err:#}");
                self.run_with_config(Config::default(), None).await
            }
            Err(err) => Err(err),
        }
    }

    /// Runs against the config file at `path`.
    pub async fn run_with(self, path: &Path) -> anyhow::Result<()> {
        let config = if self.save_key {
            // a broken file must not be overwritten with defaults
            Config::load_from(path)?
        } else {
            Config::load_from(path).unwrap_or_else(|err| {
                warn!("Ignoring config file: {err:#}");
                Config::default()
            })
        };

        self.run_with_config(config, Some(path)).await
    }

    async fn run_with_config(self, mut config: Config, path: Option<&Path>) -> anyhow::Result<()> {
        let api_key = resolve_api_key(self.api_key.as_deref(), &config)?;

        let query = ForecastQuery::new(&self.city, &api_key, self.limit, self.timeout, self.days)?;
        let zone = match self.utc_offset {
            Some(hours) => WeekdayZone::from_utc_offset_hours(hours)?,
            None => WeekdayZone::Local,
        };

        let service = UmbrellaService::from_config(&config, zone);
        let outcome = service.umbrella_days(&query).await?;

        if let (true, Some(path)) = (self.save_key, path) {
            config.set_api_key(api_key);
            config.save_to(path)?;
            info!("Saved API key to {}", path.display());
        }

        if let Some(msg) = render(&query.city, &outcome) {
            println!("{msg}");
        }

        Ok(())
    }
}

/// The line for stdout, if any. The other outcomes are only logged.
fn render(city: &str, outcome: &FilterOutcome) -> Option<String> {
    if !outcome.has_data {
        warn!("ops, no data from: {city}");
        None
    } else if outcome.days.is_empty() {
        info!("{NO_UMBRELLA_MESSAGE}");
        None
    } else {
        Some(format_message(&outcome.days.names()))
    }
}

fn parse_non_empty(value: &str) -> Result<String, String> {
    validate::validate_non_empty("city", value).map_err(|e| e.to_string())
}

fn parse_positive(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("{value} is not a number"))?;
    validate::validate_positive("value", parsed).map_err(|e| e.to_string())
}

fn parse_days(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(format!("{value} is not a positive whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::fs;
    use umbrella_core::WeekdaySet;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn parses_key_and_city_with_defaults() {
        let cli = parse(&["umbrella", "KEY", "Ribeirão Preto"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
        assert_eq!(cli.city, "Ribeirão Preto");
        assert_eq!(cli.limit, 70.0);
        assert_eq!(cli.timeout, 10.0);
        assert_eq!(cli.days, 5);
        assert_eq!(cli.utc_offset, None);
        assert!(!cli.save_key);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn single_positional_is_the_city() {
        let cli = parse(&["umbrella", "Lisbon"]).unwrap();
        assert_eq!(cli.city, "Lisbon");
    }

    #[test]
    fn parses_options() {
        let cli = parse(&[
            "umbrella", "KEY", "Lisbon", "-l", "85.5", "--timeout", "2", "-d", "3",
            "--utc-offset", "-3", "--save-key", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.limit, 85.5);
        assert_eq!(cli.timeout, 2.0);
        assert_eq!(cli.days, 3);
        assert_eq!(cli.utc_offset, Some(-3));
        assert!(cli.save_key);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_empty_city() {
        assert!(parse(&["umbrella", "KEY", ""]).is_err());
    }

    #[test]
    fn rejects_non_positive_limit_and_timeout() {
        assert!(parse(&["umbrella", "KEY", "Lisbon", "-l", "0"]).is_err());
        assert!(parse(&["umbrella", "KEY", "Lisbon", "--limit=-1"]).is_err());
        assert!(parse(&["umbrella", "KEY", "Lisbon", "-t", "abc"]).is_err());
    }

    #[test]
    fn rejects_zero_days() {
        assert!(parse(&["umbrella", "KEY", "Lisbon", "-d", "0"]).is_err());
    }

    fn outcome(has_data: bool, days: &[Weekday]) -> FilterOutcome {
        let mut set = WeekdaySet::with_cap(5);
        for day in days {
            set.insert(*day);
        }
        FilterOutcome {
            days: set,
            skipped: 0,
            has_data,
        }
    }

    #[test]
    fn render_without_data_prints_nothing() {
        assert_eq!(render("Lisbon", &outcome(false, &[])), None);
    }

    #[test]
    fn render_without_umbrella_days_prints_nothing() {
        assert_eq!(render("Lisbon", &outcome(true, &[])), None);
    }

    #[test]
    fn render_umbrella_days() {
        assert_eq!(
            render("Lisbon", &outcome(true, &[Weekday::Mon, Weekday::Wed])).as_deref(),
            Some("You should take an umbrella in these days: Monday and Wednesday.")
        );
    }

    const BROKEN_CONFIG: &str = "api_key = \"OLD\"\n[api]\napi_version = \"3.0\"\nbogus = [";

    #[tokio::test]
    async fn save_key_leaves_broken_config_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, BROKEN_CONFIG).unwrap();

        let cli = parse(&["umbrella", "NEWKEY", "Lisbon", "--save-key", "-t", "0.01"]).unwrap();
        let err = cli.run_with(&path).await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
        assert_eq!(fs::read_to_string(&path).unwrap(), BROKEN_CONFIG);
    }

    fn config_for(mock_server: &MockServer) -> String {
        format!(
            "api_key = \"OLD\"\n[api]\nbase_url = \"{}\"\napi_version = \"3.0\"\n",
            mock_server.uri()
        )
    }

    #[tokio::test]
    async fn rejected_key_is_not_saved() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/forecast"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let original = config_for(&mock_server);
        fs::write(&config_path, &original).unwrap();

        let cli = parse(&["umbrella", "NEWKEY", "Lisbon", "--save-key"]).unwrap();
        assert!(cli.run_with(&config_path).await.is_err());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), original);
    }

    #[tokio::test]
    async fn working_key_is_saved_with_existing_settings() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/forecast"))
            .and(query_param("appid", "NEWKEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"list":[{"dt":1596283200,"main":{"humidity":90}}]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, config_for(&mock_server)).unwrap();

        let cli = parse(&["umbrella", "NEWKEY", "Lisbon", "--save-key", "--utc-offset", "0"])
            .unwrap();
        cli.run_with(&config_path).await.unwrap();

        let saved = Config::load_from(&config_path).unwrap();
        assert_eq!(saved.api_key(), Some("NEWKEY"));
        assert_eq!(saved.api.api_version, "3.0");
        assert_eq!(saved.api.base_url, mock_server.uri());
    }

    #[test]
    fn value_parsers() {
        assert_eq!(parse_non_empty("iclinic").unwrap(), "iclinic");
        assert!(parse_non_empty("").is_err());
        assert_eq!(parse_positive("1").unwrap(), 1.0);
        assert!(parse_positive("-1").is_err());
        assert_eq!(parse_days("7").unwrap(), 7);
        assert!(parse_days("-2").is_err());
    }
}
