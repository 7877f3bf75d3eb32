use std::str::FromStr;
use std::time::Duration;

use crate::quiz::settings::{
    DEFAULT_QUESTION_COUNT, DEFAULT_TIME_PER_QUESTION, MAX_QUESTIONS, MIN_QUESTIONS, TIME_CHOICES,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}='{value}' is not a valid {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Defaults for the terminal quiz, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed seed for reproducible quizzes, random when unset.
    pub seed: Option<u64>,
    pub question_count: usize,
    pub time_per_question: u64,
    /// Pause after showing whether an answer was right.
    pub feedback_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            question_count: DEFAULT_QUESTION_COUNT,
            time_per_question: DEFAULT_TIME_PER_QUESTION,
            feedback_delay: Duration::from_millis(2000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();

        const COUNT_EXPECTED: &str = "question count between 3 and 100";
        let question_count = parse_var(&lookup, "QUIZ_QUESTION_COUNT", COUNT_EXPECTED)?
            .unwrap_or(default.question_count);
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&question_count) {
            return Err(ConfigError::InvalidValue {
                name: "QUIZ_QUESTION_COUNT",
                value: question_count.to_string(),
                expected: COUNT_EXPECTED,
            });
        }

        const TIME_EXPECTED: &str = "time per question of 5, 10, 15, 20 or 30 seconds";
        let time_per_question = parse_var(&lookup, "QUIZ_TIME_PER_QUESTION", TIME_EXPECTED)?
            .unwrap_or(default.time_per_question);
        if !TIME_CHOICES.contains(&time_per_question) {
            return Err(ConfigError::InvalidValue {
                name: "QUIZ_TIME_PER_QUESTION",
                value: time_per_question.to_string(),
                expected: TIME_EXPECTED,
            });
        }

        Ok(Self {
            seed: parse_var(&lookup, "QUIZ_SEED", "u64")?,
            question_count,
            time_per_question,
            feedback_delay: parse_var(&lookup, "QUIZ_FEEDBACK_DELAY_MS", "number of milliseconds")?
                .map(Duration::from_millis)
                .unwrap_or(default.feedback_delay),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name,
                value,
                expected,
            }),
    }
}
