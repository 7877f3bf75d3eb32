/// Two factors in the order they will be shown.
///
/// `3 × 7` and `7 × 3` are different facts for display but the same fact for
/// repetition checks, see [`Fact::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fact {
    pub table: u8,
    pub multiplier: u8,
}

impl Fact {
    pub fn new(table: u8, multiplier: u8) -> Self {
        Self { table, multiplier }
    }

    /// Order-independent identity of the fact.
    pub fn key(&self) -> (u8, u8) {
        if self.table <= self.multiplier {
            (self.table, self.multiplier)
        } else {
            (self.multiplier, self.table)
        }
    }

    pub fn same_fact(&self, other: &Fact) -> bool {
        self.key() == other.key()
    }

    pub fn product(&self) -> u32 {
        self.table as u32 * self.multiplier as u32
    }
}
