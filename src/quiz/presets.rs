use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DifficultyPreset {
    Easy,
    Medium,
    Hard,
    Extreme,
    Special,
}

impl DifficultyPreset {
    pub const ALL: [DifficultyPreset; 5] = [
        DifficultyPreset::Easy,
        DifficultyPreset::Medium,
        DifficultyPreset::Hard,
        DifficultyPreset::Extreme,
        DifficultyPreset::Special,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "easy",
            DifficultyPreset::Medium => "medium",
            DifficultyPreset::Hard => "hard",
            DifficultyPreset::Extreme => "extreme",
            DifficultyPreset::Special => "special",
        }
    }

    pub fn tables(&self) -> BTreeSet<u8> {
        let tables: &[u8] = match self {
            DifficultyPreset::Easy => &[2, 3, 4],
            DifficultyPreset::Medium => &[5, 6, 7],
            DifficultyPreset::Hard => &[8, 9, 12],
            DifficultyPreset::Extreme => &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
            DifficultyPreset::Special => &super::generator::SPECIAL_TABLES,
        };
        tables.iter().copied().collect()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

impl FromStr for DifficultyPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DifficultyPreset::ALL
            .iter()
            .find(|preset| preset.name() == wanted)
            .copied()
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
