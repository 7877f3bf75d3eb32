use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::presets::DifficultyPreset;

pub const ALLOWED_TABLES: RangeInclusive<u8> = 2..=12;
pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 100;
pub const QUESTION_COUNT_CHOICES: [usize; 3] = [5, 10, 15];
pub const TIME_CHOICES: [u64; 5] = [5, 10, 15, 20, 30];
pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_TIME_PER_QUESTION: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("please select at least one times table to start the quiz")]
    NoTablesSelected,
    #[error("'{0}' is not a times table or a preset")]
    InvalidTable(String),
    #[error("the {0} times table is not available, pick tables from 2 to 12")]
    TableOutOfRange(u8),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{0} questions is not allowed, pick between 3 and 100")]
    QuestionCountOutOfRange(usize),
    #[error("{0} seconds per question is not offered, pick one of 5, 10, 15, 20 or 30")]
    UnsupportedTime(u64),
}

/// What the player chose on the setup screen.
///
/// The generator only reads `selected_tables` and `question_count`. The timer
/// fields are there for whoever runs the quiz.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    pub selected_tables: BTreeSet<u8>,
    pub question_count: usize,
    pub timer_enabled: bool,
    pub time_per_question: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_tables: BTreeSet::new(),
            question_count: DEFAULT_QUESTION_COUNT,
            timer_enabled: false,
            time_per_question: DEFAULT_TIME_PER_QUESTION,
        }
    }
}

impl Settings {
    pub fn new(tables: impl IntoIterator<Item = u8>, question_count: usize) -> Self {
        Self {
            selected_tables: tables.into_iter().collect(),
            question_count,
            ..Self::default()
        }
    }

    pub fn with_timer(mut self, seconds: u64) -> Self {
        self.timer_enabled = true;
        self.time_per_question = seconds;
        self
    }

    /// Checks done before a quiz is started. Generation itself never fails.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.selected_tables.is_empty() {
            return Err(SettingsError::NoTablesSelected);
        }
        if let Some(table) = self
            .selected_tables
            .iter()
            .find(|t| !ALLOWED_TABLES.contains(*t))
        {
            return Err(SettingsError::TableOutOfRange(*table));
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.question_count) {
            return Err(SettingsError::QuestionCountOutOfRange(self.question_count));
        }
        if self.timer_enabled && !TIME_CHOICES.contains(&self.time_per_question) {
            return Err(SettingsError::UnsupportedTime(self.time_per_question));
        }
        Ok(())
    }
}

/// Reads a table selection such as `2 3 7`, `4,6,8` or a preset name.
pub fn parse_tables(input: &str) -> Result<BTreeSet<u8>, SettingsError> {
    if let Ok(preset) = input.parse::<DifficultyPreset>() {
        return Ok(preset.tables());
    }

    let mut tables = BTreeSet::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let table: u8 = token
            .parse()
            .map_err(|_| SettingsError::InvalidTable(token.to_string()))?;
        if !ALLOWED_TABLES.contains(&table) {
            return Err(SettingsError::TableOutOfRange(table));
        }
        tables.insert(table);
    }

    if tables.is_empty() {
        return Err(SettingsError::NoTablesSelected);
    }
    Ok(tables)
}

pub fn parse_question_count(input: &str) -> Result<usize, SettingsError> {
    let input = input.trim();
    let count: usize = input
        .parse()
        .map_err(|_| SettingsError::NotANumber(input.to_string()))?;
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        return Err(SettingsError::QuestionCountOutOfRange(count));
    }
    Ok(count)
}

pub fn parse_time_per_question(input: &str) -> Result<u64, SettingsError> {
    let input = input.trim();
    match input.parse::<u64>() {
        Ok(seconds) if TIME_CHOICES.contains(&seconds) => Ok(seconds),
        Ok(seconds) => Err(SettingsError::UnsupportedTime(seconds)),
        Err(_) => Err(SettingsError::NotANumber(input.to_string())),
    }
}
