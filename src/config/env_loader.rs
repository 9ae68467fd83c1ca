use crate::config::model::{CancelConfig, Config};
use crate::festivales::model::Mes;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_FESTIVALES_FILE: &str = "festivales.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config '{name}'. Expected either 'true' or 'false', got '{value}'")]
    InvalidBool { name: &'static str, value: String },
    #[error("Invalid config '{name}'. '{value}' is not a month name")]
    InvalidMonth { name: &'static str, value: String },
    #[error("Invalid config '{0}'. Expected at least one venue")]
    NoVenues(&'static str),
    #[error("CANCEL_VENUES and CANCEL_MONTH must be set together")]
    IncompleteCancel,
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

/// Builds the config reading each variable through `lookup`
pub fn load_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let festivales_file = lookup("FESTIVALES_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FESTIVALES_FILE));
    let output_json = load_bool_config(&lookup, "OUTPUT_JSON", false)?;

    let cancel_config = match (lookup("CANCEL_VENUES"), lookup("CANCEL_MONTH")) {
        (None, None) => None,
        (Some(venues), Some(month)) => Some(CancelConfig {
            venues: parse_venues("CANCEL_VENUES", &venues)?,
            month: parse_month("CANCEL_MONTH", &month)?,
        }),
        _ => return Err(ConfigError::IncompleteCancel),
    };

    Ok(Config {
        festivales_file,
        cancel_config,
        output_json,
    })
}

fn load_bool_config(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBool { name, value }),
    }
}

fn parse_venues(name: &'static str, value: &str) -> Result<HashSet<String>, ConfigError> {
    let venues: HashSet<String> = value
        .split(',')
        .map(str::trim)
        .filter(|venue| !venue.is_empty())
        .map(str::to_uppercase)
        .collect();

    if venues.is_empty() {
        return Err(ConfigError::NoVenues(name));
    }

    Ok(venues)
}

fn parse_month(name: &'static str, value: &str) -> Result<Mes, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidMonth {
            name,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        load_config_from(|name| vars.get(name).cloned())
    }

    #[test_log::test]
    fn when_nothing_is_set_should_use_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.festivales_file, PathBuf::from("festivales.csv"));
        assert!(config.cancel_config.is_none());
        assert!(!config.output_json);
    }

    #[test_log::test]
    fn should_load_a_cancellation() {
        let config = load(&[
            ("FESTIVALES_FILE", "data/festivales.csv"),
            ("CANCEL_VENUES", "badajoz, Valencia ,"),
            ("CANCEL_MONTH", "febrero"),
            ("OUTPUT_JSON", "true"),
        ])
        .unwrap();

        assert_eq!(config.festivales_file, PathBuf::from("data/festivales.csv"));
        assert!(config.output_json);
        assert_eq!(
            config.cancel_config,
            Some(CancelConfig {
                venues: HashSet::from(["BADAJOZ".to_string(), "VALENCIA".to_string()]),
                month: Mes::Febrero,
            })
        );
    }

    #[test_log::test]
    fn when_only_one_cancel_variable_is_set_should_fail() {
        let result = load(&[("CANCEL_MONTH", "febrero")]);

        assert_eq!(result.unwrap_err(), ConfigError::IncompleteCancel);
    }

    #[test_log::test]
    fn when_the_month_is_unknown_should_fail() {
        let result = load(&[("CANCEL_VENUES", "badajoz"), ("CANCEL_MONTH", "febrary")]);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidMonth {
                name: "CANCEL_MONTH",
                value: "febrary".to_string()
            }
        );
    }

    #[test_log::test]
    fn when_no_venue_is_given_should_fail() {
        let result = load(&[("CANCEL_VENUES", " , "), ("CANCEL_MONTH", "junio")]);

        assert_eq!(result.unwrap_err(), ConfigError::NoVenues("CANCEL_VENUES"));
    }

    #[test_log::test]
    fn when_a_flag_is_not_a_bool_should_fail() {
        let result = load(&[("OUTPUT_JSON", "yes")]);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidBool {
                name: "OUTPUT_JSON",
                ..
            })
        ));
    }
}
