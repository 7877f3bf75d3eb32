pub mod achievement;
pub mod fact;
pub mod generator;
pub mod history;
pub mod presets;
pub mod settings;

use std::fmt;
use std::time::Duration;

use rand::Rng;

use achievement::Achievement;
use fact::Fact;
use generator::QuizGenerator;
use settings::Settings;

/// One quiz run: the generated questions and how far the player got.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    pub settings: Settings,
    pub questions: Vec<Question>,
    pub current_question: usize,
    pub score: usize,
}

impl Quiz {
    pub fn new(settings: Settings, questions: Vec<Question>) -> Self {
        Self {
            settings,
            questions,
            current_question: 0,
            score: 0,
        }
    }

    pub fn start<R: Rng>(settings: Settings, generator: &mut QuizGenerator<R>) -> Self {
        let questions = generator.generate(&settings);
        Self::new(settings, questions)
    }

    /// Same settings, fresh questions, score back to zero.
    pub fn restart<R: Rng>(&mut self, generator: &mut QuizGenerator<R>) {
        self.questions = generator.generate(&self.settings);
        self.current_question = 0;
        self.score = 0;
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// Records the answer to the current question and moves on.
    ///
    /// `None` means time ran out. Returns whether the answer was correct,
    /// `false` once the quiz is already over.
    pub fn submit_answer(&mut self, answer: Option<u32>, time_spent: Duration) -> bool {
        let Some(question) = self.questions.get_mut(self.current_question) else {
            return false;
        };
        let correct = question.record(answer, time_spent);
        if correct {
            self.score += 1;
        }
        self.current_question += 1;
        correct
    }

    pub fn is_complete(&self) -> bool {
        self.current_question >= self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Whole percent, rounded half up.
    pub fn percentage(&self) -> usize {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.score * 200 + total) / (total * 2)
    }

    pub fn achievement(&self) -> Achievement {
        Achievement::from_score(self.score, self.total())
    }

    pub fn total_time(&self) -> Duration {
        self.questions.iter().filter_map(|q| q.time_spent).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    /// 1-based position in the quiz.
    pub id: usize,
    pub multiplicand: u8,
    pub multiplier: u8,
    pub answer: u32,
    pub user_answer: Option<u32>,
    pub is_correct: Option<bool>,
    pub time_spent: Option<Duration>,
}

impl Question {
    pub fn new(id: usize, multiplicand: u8, multiplier: u8) -> Self {
        Self::from_fact(id, Fact::new(multiplicand, multiplier))
    }

    pub fn from_fact(id: usize, fact: Fact) -> Self {
        Self {
            id,
            multiplicand: fact.table,
            multiplier: fact.multiplier,
            answer: fact.product(),
            user_answer: None,
            is_correct: None,
            time_spent: None,
        }
    }

    pub fn fact(&self) -> Fact {
        Fact::new(self.multiplicand, self.multiplier)
    }

    pub fn label(&self) -> String {
        format!("q{}", self.id)
    }

    pub fn is_answered(&self) -> bool {
        self.is_correct.is_some()
    }

    fn record(&mut self, answer: Option<u32>, time_spent: Duration) -> bool {
        let correct = answer == Some(self.answer);
        self.user_answer = answer;
        self.is_correct = Some(correct);
        self.time_spent = Some(time_spent);
        correct
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.multiplicand, self.multiplier)
    }
}
