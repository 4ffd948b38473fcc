use crate::errors::ConfigError;
use chrono::NaiveDate;
use std::{collections::HashMap, env, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    /// One query for every record tagged with the week; missing days stay absent.
    Enumeration,
    /// One count query per day; always yields 7 entries.
    RangeAggregate,
}

impl QueryStyle {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "enumeration" | "enum" => Ok(Self::Enumeration),
            "range" | "range-aggregate" | "aggregate" => Ok(Self::RangeAggregate),
            other => Err(ConfigError::invalid(
                "QUERY_STYLE",
                format!("expected 'enumeration' or 'range', got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub anchor_date: NaiveDate,
    pub display_year: i32,
    pub max_week: u32,
    pub query_style: QueryStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/contacts.json"),
            anchor_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default(),
            display_year: 2024,
            max_week: 52,
            query_style: QueryStyle::RangeAggregate,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = vars.get("PORT") {
            config.port = value
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{value}' is not a port")))?;
        }
        if let Some(value) = vars.get("APP_DATA_PATH") {
            config.data_path = PathBuf::from(value);
        }
        if let Some(value) = vars.get("ANCHOR_DATE") {
            config.anchor_date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|err| ConfigError::invalid("ANCHOR_DATE", err.to_string()))?;
        }
        if let Some(value) = vars.get("DISPLAY_YEAR") {
            config.display_year = value.parse().map_err(|_| {
                ConfigError::invalid("DISPLAY_YEAR", format!("'{value}' is not a year"))
            })?;
        }
        if let Some(value) = vars.get("MAX_WEEK") {
            config.max_week = match value.parse::<u32>() {
                Ok(week) if week >= 1 => week,
                _ => {
                    return Err(ConfigError::invalid(
                        "MAX_WEEK",
                        format!("'{value}' is not a week number >= 1"),
                    ));
                }
            };
        }
        if let Some(value) = vars.get("QUERY_STYLE") {
            config.query_style = QueryStyle::parse(value)?;
        }

        Ok(config)
    }
}
