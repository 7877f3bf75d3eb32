use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::achievement::achievement_label;
use super::fact::Fact;
use super::history::RecentFacts;
use super::settings::Settings;
use super::Question;

/// Selecting exactly these tables switches to special mode.
pub const SPECIAL_TABLES: [u8; 8] = [3, 4, 5, 6, 7, 8, 9, 12];
/// Never used on either side of a special mode question.
pub const EASY_NUMBERS: [u8; 3] = [2, 10, 11];
/// Special mode also skips anything smaller, so `1..=12` adds no `× 1` facts.
pub const SPECIAL_MIN_FACTOR: u8 = 3;
pub const DEFAULT_MULTIPLIERS: RangeInclusive<u8> = 2..=12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GenerationMode {
    /// Exactly `question_count` questions, no fact repeated within the last few.
    Standard,
    /// Every fact at most once and no easy factors. May come up short.
    Special,
}

impl GenerationMode {
    pub fn detect(tables: &BTreeSet<u8>) -> Self {
        if tables.len() == SPECIAL_TABLES.len() && SPECIAL_TABLES.iter().all(|t| tables.contains(t)) {
            GenerationMode::Special
        } else {
            GenerationMode::Standard
        }
    }
}

/// Turns [`Settings`] into a list of questions.
///
/// Owns its random source, so a seeded generator always produces the same
/// quiz for the same settings. The recent-facts window is reset on every
/// call, nothing carries over between quizzes.
pub struct QuizGenerator<R> {
    rng: R,
    multipliers: RangeInclusive<u8>,
    recent: RecentFacts,
}

impl QuizGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> QuizGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            multipliers: DEFAULT_MULTIPLIERS,
            recent: RecentFacts::default(),
        }
    }

    /// Second factors to draw from. Defaults to 2..=12, use 1..=12 to include
    /// the one times answers.
    pub fn with_multipliers(mut self, multipliers: RangeInclusive<u8>) -> Self {
        self.multipliers = multipliers;
        self
    }

    pub fn generate(&mut self, settings: &Settings) -> Vec<Question> {
        let mode = GenerationMode::detect(&settings.selected_tables);
        self.generate_with_mode(settings, mode)
    }

    pub fn generate_with_mode(&mut self, settings: &Settings, mode: GenerationMode) -> Vec<Question> {
        self.recent.clear();

        let tables = &settings.selected_tables;
        let count = settings.question_count;
        if tables.is_empty() || count == 0 {
            debug!("Nothing to generate: {} tables, {} questions", tables.len(), count);
            return Vec::new();
        }

        debug!("Generating {} questions in {:?} mode for tables {:?}", count, mode, tables);
        let facts = match mode {
            GenerationMode::Standard => self.standard_facts(tables, count),
            GenerationMode::Special => self.special_facts(tables, count),
        };

        facts
            .into_iter()
            .enumerate()
            .map(|(i, fact)| Question::from_fact(i + 1, fact))
            .collect()
    }

    pub fn achievement_label(&self, score: usize, total: usize) -> &'static str {
        achievement_label(score, total)
    }

    fn standard_facts(&mut self, tables: &BTreeSet<u8>, count: usize) -> Vec<Fact> {
        let mut candidates: Vec<Fact> = tables
            .iter()
            .flat_map(|&table| self.multipliers.clone().map(move |m| Fact::new(table, m)))
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }
        candidates.shuffle(&mut self.rng);

        let mut facts = Vec::with_capacity(count);
        let mut relaxed = 0;
        for _ in 0..count {
            let fresh: Vec<&Fact> = candidates
                .iter()
                .filter(|fact| !self.recent.contains(fact))
                .collect();
            let fact = match fresh.choose(&mut self.rng) {
                Some(fact) => **fact,
                // Pool too small to avoid the window, take anything.
                None => {
                    relaxed += 1;
                    candidates[self.rng.gen_range(0..candidates.len())]
                }
            };
            self.recent.push(fact);
            facts.push(fact);
        }

        if relaxed > 0 {
            debug!("Repeated a recent fact {} times, only {} candidates", relaxed, candidates.len());
        }
        facts
    }

    fn special_facts(&mut self, tables: &BTreeSet<u8>, count: usize) -> Vec<Fact> {
        let table_side: Vec<u8> = tables
            .iter()
            .copied()
            .filter(|&t| !is_easy(t))
            .collect();
        let multiplier_side: Vec<u8> = self.multipliers.clone().filter(|&m| !is_easy(m)).collect();

        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for &table in &table_side {
            for &multiplier in &multiplier_side {
                let mut fact = Fact::new(table, multiplier);
                if !seen.insert(fact.key()) {
                    continue;
                }
                // Either factor can be the table, otherwise small tables hog the first slot.
                if table_side.contains(&multiplier) && self.rng.gen_bool(0.5) {
                    fact = Fact::new(multiplier, table);
                }
                pairs.push(fact);
            }
        }
        pairs.shuffle(&mut self.rng);
        let available = pairs.len();

        let mut facts: Vec<Fact> = Vec::with_capacity(count.min(available));
        let mut last_table = None;
        while facts.len() < count && !pairs.is_empty() {
            let index = match pairs.iter().position(|f| Some(f.table) != last_table) {
                Some(index) => index,
                None => {
                    debug!("Only {:?} table facts left, allowing a repeat table", last_table);
                    0
                }
            };
            let fact = pairs.remove(index);
            last_table = Some(fact.table);
            facts.push(fact);
        }

        if facts.len() < count {
            debug!("Ran out of unique facts: {} of {} questions", facts.len(), count);
        }
        facts
    }
}

fn is_easy(factor: u8) -> bool {
    factor < SPECIAL_MIN_FACTOR || EASY_NUMBERS.contains(&factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn special_settings(count: usize) -> Settings {
        Settings::new(SPECIAL_TABLES, count)
    }

    #[test]
    fn detects_special_mode_only_on_exact_set() {
        let special: BTreeSet<u8> = SPECIAL_TABLES.into_iter().collect();
        assert_eq!(GenerationMode::detect(&special), GenerationMode::Special);

        let mut more = special.clone();
        more.insert(2);
        assert_eq!(GenerationMode::detect(&more), GenerationMode::Standard);

        let mut fewer = special;
        fewer.remove(&12);
        assert_eq!(GenerationMode::detect(&fewer), GenerationMode::Standard);
    }

    #[test]
    fn two_and_three_times_tables() {
        let mut generator = QuizGenerator::seeded(1);
        let questions = generator.generate(&Settings::new([2, 3], 10));

        assert_eq!(questions.len(), 10);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q.id, i + 1);
            assert!(q.multiplicand == 2 || q.multiplicand == 3);
            assert!(DEFAULT_MULTIPLIERS.contains(&q.multiplier));
            assert_eq!(q.answer, q.multiplicand as u32 * q.multiplier as u32);
            assert_eq!(q.user_answer, None);
        }
    }

    #[test]
    fn standard_mode_always_fills_the_count() {
        for seed in 0..20 {
            let mut generator = QuizGenerator::seeded(seed);
            for tables in [vec![2], vec![7, 8], vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]] {
                let questions = generator.generate(&Settings::new(tables, 37));
                assert_eq!(questions.len(), 37);
            }
        }
    }

    #[test]
    fn no_repeat_inside_window() {
        for seed in 0..20 {
            let mut generator = QuizGenerator::seeded(seed);
            // 2 × 3 and 3 × 2 are both candidates here
            let questions = generator.generate(&Settings::new([2, 3], 100));
            for (i, q) in questions.iter().enumerate() {
                for later in questions.iter().skip(i + 1).take(5) {
                    assert!(
                        !q.fact().same_fact(&later.fact()),
                        "{} and {} repeat within the window",
                        q,
                        later
                    );
                }
            }
        }
    }

    #[test]
    fn tiny_pool_relaxes_instead_of_stalling() {
        let mut generator = QuizGenerator::seeded(3).with_multipliers(2..=3);
        let questions = generator.generate(&Settings::new([2], 20));

        assert_eq!(questions.len(), 20);
        assert!(questions
            .iter()
            .all(|q| q.multiplicand == 2 && (q.multiplier == 2 || q.multiplier == 3)));
    }

    #[test]
    fn one_to_twelve_variant() {
        let mut generator = QuizGenerator::seeded(9).with_multipliers(1..=12);
        let questions = generator.generate(&Settings::new([4], 60));
        assert_eq!(questions.len(), 60);
        assert!(questions.iter().all(|q| (1..=12).contains(&q.multiplier)));
        assert!(questions.iter().any(|q| q.multiplier == 1));
    }

    #[test]
    fn empty_input_gives_empty_list() {
        let mut generator = QuizGenerator::seeded(0);
        assert!(generator.generate(&Settings::new(Vec::<u8>::new(), 10)).is_empty());
        assert!(generator.generate(&Settings::new([5], 0)).is_empty());
        assert!(generator
            .generate_with_mode(&Settings::new(Vec::<u8>::new(), 10), GenerationMode::Special)
            .is_empty());
    }

    #[test]
    fn same_seed_same_quiz() {
        let settings = Settings::new([4, 6, 9], 25);
        let a = QuizGenerator::seeded(42).generate(&settings);
        let b = QuizGenerator::seeded(42).generate(&settings);
        assert_eq!(a, b);

        let special = special_settings(30);
        let a = QuizGenerator::seeded(7).generate(&special);
        let b = QuizGenerator::seeded(7).generate(&special);
        assert_eq!(a, b);
    }

    #[test]
    fn history_does_not_leak_between_calls() {
        let settings = Settings::new([5, 6], 12);
        let mut reused = QuizGenerator::seeded(11);
        let mut fresh = QuizGenerator::seeded(11);
        reused.recent.push(Fact::new(5, 5));
        assert_eq!(reused.generate(&settings), fresh.generate(&settings));
    }

    #[test]
    fn special_mode_runs_out_of_unique_facts() {
        let mut generator = QuizGenerator::seeded(5);
        let questions = generator.generate(&special_settings(50));

        // 8 operands, unordered with squares: 8 * 9 / 2
        assert_eq!(questions.len(), 36);
        let keys: HashSet<(u8, u8)> = questions.iter().map(|q| q.fact().key()).collect();
        assert_eq!(keys.len(), questions.len());
    }

    #[test]
    fn special_mode_skips_ones_with_wider_multipliers() {
        let mut generator = QuizGenerator::seeded(5).with_multipliers(1..=12);
        let questions = generator.generate(&special_settings(50));

        assert_eq!(questions.len(), 36);
        assert!(questions.iter().all(|q| q.multiplicand != 1 && q.multiplier != 1));
        assert!(questions
            .iter()
            .all(|q| SPECIAL_TABLES.contains(&q.multiplicand) && SPECIAL_TABLES.contains(&q.multiplier)));
    }

    #[test]
    fn special_mode_respects_count_when_enough_facts() {
        let mut generator = QuizGenerator::seeded(8);
        assert_eq!(generator.generate(&special_settings(20)).len(), 20);
    }

    #[test]
    fn special_mode_avoids_easy_numbers_and_repeats() {
        for seed in 0..30 {
            let mut generator = QuizGenerator::seeded(seed);
            let questions = generator.generate(&special_settings(36));

            let mut keys = HashSet::new();
            for q in &questions {
                assert!(!is_easy(q.multiplicand) && !is_easy(q.multiplier), "{} uses an easy number", q);
                assert!(SPECIAL_TABLES.contains(&q.multiplicand));
                assert!(keys.insert(q.fact().key()), "{} repeated", q);
                assert_eq!(q.answer, q.multiplicand as u32 * q.multiplier as u32);
            }
        }
    }

    #[test]
    fn special_mode_consecutive_tables_only_after_exhaustion() {
        for seed in 0..30 {
            let mut generator = QuizGenerator::seeded(seed);
            let questions = generator.generate(&special_settings(50));

            for i in 1..questions.len() {
                let table = questions[i].multiplicand;
                if table == questions[i - 1].multiplicand {
                    // Only allowed once every remaining fact is on that table.
                    assert!(
                        questions[i..].iter().all(|q| q.multiplicand == table),
                        "seed {}: table {} repeated at {} with other tables still left",
                        seed,
                        table,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn forced_special_mode_on_other_tables() {
        let mut generator = QuizGenerator::seeded(2);
        let questions =
            generator.generate_with_mode(&Settings::new([2, 6, 7], 100), GenerationMode::Special);

        // 2 is dropped, 6 and 7 against {3..9, 12} less the shared 6 × 7
        assert_eq!(questions.len(), 15);
        assert!(questions.iter().all(|q| q.multiplicand == 6 || q.multiplicand == 7));
    }

    #[test]
    fn generator_exposes_achievement_label() {
        let generator = QuizGenerator::seeded(0);
        assert_eq!(generator.achievement_label(10, 10), "Perfect Score! 🏆");
    }
}
