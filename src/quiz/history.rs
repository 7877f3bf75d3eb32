use std::collections::VecDeque;

use super::fact::Fact;

pub const RECENT_WINDOW: usize = 5;

/// The last few accepted facts. Oldest entries fall out first.
#[derive(Debug, Clone)]
pub struct RecentFacts {
    window: usize,
    facts: VecDeque<Fact>,
}

impl Default for RecentFacts {
    fn default() -> Self {
        Self::new(RECENT_WINDOW)
    }
}

impl RecentFacts {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            facts: VecDeque::with_capacity(window + 1),
        }
    }

    pub fn push(&mut self, fact: Fact) {
        self.facts.push_back(fact);
        if self.facts.len() > self.window {
            self.facts.pop_front();
        }
    }

    /// True if `fact`, in either order, is still inside the window.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.iter().any(|recent| recent.same_fact(fact))
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_window() {
        let mut recent = RecentFacts::default();
        for m in 2..=7 {
            recent.push(Fact::new(2, m));
        }
        assert_eq!(recent.len(), RECENT_WINDOW);
        assert!(!recent.contains(&Fact::new(2, 2)));
        assert!(recent.contains(&Fact::new(2, 3)));
        assert!(recent.contains(&Fact::new(7, 2)));
    }

    #[test]
    fn clear_empties_the_window() {
        let mut recent = RecentFacts::new(2);
        recent.push(Fact::new(4, 5));
        recent.clear();
        assert!(recent.is_empty());
        assert!(!recent.contains(&Fact::new(5, 4)));
    }
}
