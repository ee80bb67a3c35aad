pub mod kind;

use crate::dice;
use crate::dice::Die;
use crate::dice::Modifier;
use crate::error::Error;
use crate::error::Result;
use crate::parser::Parser;
use crate::range::NumberRange;
use crate::solver::Options;
use crate::solver::RandomSource;
use itertools::Itertools;
use kind::Kind;
use kind::Total;
use rand::Rng;
use tracing::debug;
use tracing::trace;

/// Interface for rolling dices
pub trait Source {
    /// Return a value in `1..=sides`
    fn throw(&mut self, sides: u64) -> u64;
}

/// Success and failure predicates of a success roll, always created together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub success: NumberRange,
    pub failure: NumberRange,
}

impl Tally {
    /// +1 on success, -1 on failure, both can apply
    fn score(&self, face: i64) -> i64 {
        let mut score = 0;
        if self.success.is_in_range(face) {
            score += 1;
        }
        if self.failure.is_in_range(face) {
            score -= 1;
        }
        score
    }
}

/// A single parsed dice term, ready to be thrown
#[derive(Debug, Clone)]
pub struct Roll {
    count: u64,
    die: Die,
    tally: Option<Tally>,
    crit_success: NumberRange,
    crit_failure: NumberRange,
    modifiers: Vec<Modifier>,
}

impl Roll {
    /// Parse a term like `5d10s>7cs=10`
    pub fn new(input: &str, options: &Options) -> Result<Self> {
        let term = Parser::parse_term(input).map_err(|error| {
            debug!("Rejected term `{}`", input);
            error
        })?;
        let count = match term.count {
            Some(count) if count <= options.max_count => count,
            count => {
                debug!("Term `{}` exceeds `{}` dices", input, options.max_count);
                return Err(Error::LimitExceeded {
                    count: count.unwrap_or(u64::MAX),
                    max: options.max_count,
                });
            }
        };
        let die = term.die.ok_or(Error::InvalidSyntax(None))?;
        let mut crit_success = NumberRange::new();
        crit_success.set_greater_than(die.sides() as i64);
        let mut crit_failure = NumberRange::new();
        crit_failure.set_less_than(1);
        let mut roll = Roll {
            count,
            die,
            tally: None,
            crit_success,
            crit_failure,
            modifiers: Vec::new(),
        };
        for modifier in term.modifiers.iter() {
            roll.apply_modifier(modifier);
        }
        roll.modifiers = term.modifiers;
        Ok(roll)
    }

    fn apply_modifier(&mut self, modifier: &Modifier) {
        match *modifier {
            Modifier::Threshold(c) | Modifier::Success(c) => {
                if let Some(value) = c.value {
                    self.tally_mut().success.add(c.comparator, value);
                }
            }
            Modifier::Failure(c) => {
                if let Some(value) = c.value {
                    self.tally_mut().failure.add(c.comparator, value);
                }
            }
            Modifier::CritSuccess(c) => {
                if let Some(value) = c.value {
                    self.crit_success.add(c.comparator, value);
                }
            }
            Modifier::CritFailure(c) => {
                if let Some(value) = c.value {
                    self.crit_failure.add(c.comparator, value);
                }
            }
            Modifier::Explode(_)
            | Modifier::Compound(_)
            | Modifier::Penetrate(_)
            | Modifier::Keep(_)
            | Modifier::KeepHigh(_)
            | Modifier::KeepLow(_)
            | Modifier::Drop(_)
            | Modifier::DropHigh(_)
            | Modifier::DropLow(_)
            | Modifier::Reroll(_)
            | Modifier::RerollOnce(_)
            | Modifier::SortAscending(_)
            | Modifier::SortDescending(_) => trace!("Modifier `{}` has no effect", modifier),
        }
    }

    /// First success or failure modifier switches the term to a success roll
    fn tally_mut(&mut self) -> &mut Tally {
        self.tally.get_or_insert_with(Tally::default)
    }

    pub fn get_count(&self) -> u64 {
        self.count
    }

    pub fn get_die(&self) -> Die {
        self.die
    }

    pub fn get_modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn get_tally(&self) -> Option<&Tally> {
        self.tally.as_ref()
    }

    pub fn get_crit_success(&self) -> &NumberRange {
        &self.crit_success
    }

    pub fn get_crit_failure(&self) -> &NumberRange {
        &self.crit_failure
    }

    pub fn get_kind(&self) -> Kind {
        if self.tally.is_some() {
            Kind::Success
        } else {
            Kind::Sum
        }
    }

    pub fn is_type_success(&self) -> bool {
        self.get_kind() == Kind::Success
    }

    /// Throw the dices using the default Rng source
    pub fn execute(self) -> Rolled {
        self.execute_with(&mut rand::thread_rng())
    }

    /// Throw the dices using the provided Rng source
    pub fn execute_with<R: Rng>(self, generator: &mut R) -> Rolled {
        self.execute_with_source(&mut RandomSource { generator })
    }

    /// Throw the dices using the provided source
    pub fn execute_with_source<S: Source>(self, source: &mut S) -> Rolled {
        let sides = self.die.sides() as u64;
        let results: Vec<i64> = (0..self.count)
            .map(|_| self.die.face(source.throw(sides)))
            .collect();
        let total = match &self.tally {
            Some(tally) => Total::Successes(results.iter().map(|&face| tally.score(face)).sum()),
            None => Total::Sum(results.iter().sum()),
        };
        Rolled {
            roll: self,
            results,
            total,
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        self.modifiers.iter().try_for_each(|m| write!(f, "{m}"))
    }
}

/// A thrown term: faces in throw order and their total
#[derive(Debug, Clone)]
pub struct Rolled {
    roll: Roll,
    results: Vec<i64>,
    total: Total,
}

impl Rolled {
    pub fn get_roll(&self) -> &Roll {
        &self.roll
    }

    /// Raw faces, `-1..=1` for fate dices
    pub fn results(&self) -> &[i64] {
        &self.results
    }

    pub fn get_total(&self) -> Total {
        self.total
    }

    pub fn get_kind(&self) -> Kind {
        self.total.get_kind()
    }

    pub fn is_type_success(&self) -> bool {
        self.get_kind() == Kind::Success
    }

    pub fn get_sum(&self) -> Option<i64> {
        self.total.get_sum()
    }

    pub fn get_successes(&self) -> Option<i64> {
        self.total.get_successes()
    }

    fn format_face(&self, face: i64) -> String {
        if self.roll.die.is_fate() {
            return dice::fate_symbol(face).to_owned();
        }
        let mut value = face.to_string();
        if self.roll.crit_success.is_in_range(face) {
            value = dice::format_crit_success(&value);
        }
        if self.roll.crit_failure.is_in_range(face) {
            value = dice::format_crit_failure(&value);
        }
        value
    }
}

impl std::fmt::Display for Rolled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if self.roll.die.is_fate() { " " } else { "+" };
        write!(
            f,
            "({})",
            self.results
                .iter()
                .map(|&face| self.format_face(face))
                .format(separator)
        )
    }
}
