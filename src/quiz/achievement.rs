#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Achievement {
    DontGiveUp,
    KeepPracticing,
    GoodEffort,
    GreatJob,
    ExcellentWork,
    MathChampion,
    PerfectScore,
}

// Lowest percentage needed for each tier below perfect, best first.
const THRESHOLDS: [(u64, Achievement); 5] = [
    (90, Achievement::MathChampion),
    (80, Achievement::ExcellentWork),
    (70, Achievement::GreatJob),
    (60, Achievement::GoodEffort),
    (50, Achievement::KeepPracticing),
];

impl Achievement {
    /// Tier for `score` correct answers out of `total`.
    ///
    /// Integer comparison, so exactly 90% lands in the 90% tier. A `total` of
    /// zero is the lowest tier.
    pub fn from_score(score: usize, total: usize) -> Self {
        if total == 0 {
            return Achievement::DontGiveUp;
        }
        if score >= total {
            return Achievement::PerfectScore;
        }
        let (score, total) = (score as u64, total as u64);
        THRESHOLDS
            .iter()
            .find(|(percent, _)| score * 100 >= percent * total)
            .map(|(_, tier)| *tier)
            .unwrap_or(Achievement::DontGiveUp)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "Perfect Score! 🏆",
            Achievement::MathChampion => "Math Champion! 🎉",
            Achievement::ExcellentWork => "Excellent Work! ⭐",
            Achievement::GreatJob => "Great Job! 👍",
            Achievement::GoodEffort => "Good Effort! 💪",
            Achievement::KeepPracticing => "Keep Practicing! 📚",
            Achievement::DontGiveUp => "Don't Give Up! 🌟",
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn achievement_label(score: usize, total: usize) -> &'static str {
    Achievement::from_score(score, total).label()
}
