use crate::dice::Comparator;

/// One condition of a [`NumberRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Equals(i64),
    GreaterThan(i64),
    LessThan(i64),
}

impl Clause {
    fn matches(&self, value: i64) -> bool {
        match *self {
            Clause::Equals(n) => value == n,
            Clause::GreaterThan(n) => value > n,
            Clause::LessThan(n) => value < n,
        }
    }
}

/// Numeric predicate made of clauses joined by OR.
/// An empty range matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberRange {
    clauses: Vec<Clause>,
}

impl NumberRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_equality(&mut self, n: i64) {
        self.clauses.push(Clause::Equals(n));
    }

    pub fn add_greater_than(&mut self, n: i64) {
        self.clauses.push(Clause::GreaterThan(n));
    }

    pub fn add_less_than(&mut self, n: i64) {
        self.clauses.push(Clause::LessThan(n));
    }

    /// Add the clause a modifier comparator stands for
    pub fn add(&mut self, comparator: Comparator, n: i64) {
        match comparator {
            Comparator::Greater => self.add_greater_than(n),
            Comparator::Less => self.add_less_than(n),
            Comparator::Equal => self.add_equality(n),
        }
    }

    /// Reset to the single clause `> n`
    pub fn set_greater_than(&mut self, n: i64) {
        self.clauses.clear();
        self.add_greater_than(n);
    }

    /// Reset to the single clause `< n`
    pub fn set_less_than(&mut self, n: i64) {
        self.clauses.clear();
        self.add_less_than(n);
    }

    pub fn is_in_range(&self, value: i64) -> bool {
        self.clauses.iter().any(|clause| clause.matches(value))
    }

    pub fn get_clauses(&self) -> &[Clause] {
        &self.clauses
    }
}
