pub mod config;
pub mod quiz;
pub mod terminal;

pub use config::Config;
pub use quiz::{
    achievement::{achievement_label, Achievement},
    generator::{GenerationMode, QuizGenerator},
    presets::DifficultyPreset,
    settings::{Settings, SettingsError},
    Question, Quiz,
};
