use crate::error::Result;
use crate::roll;
use crate::sum::RollSum;
use crate::sum::RolledSum;
use rand::Rng;

/// Default random dice roller
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> roll::Source for RandomSource<'_, T> {
    fn throw(&mut self, sides: u64) -> u64 {
        self.generator.gen_range(1..=sides)
    }
}

const REASON_SIGIL: char = ':';

/// Dices allowed in a single term unless configured otherwise
pub const DEFAULT_MAX_COUNT: u64 = 100;

/// Parsing options supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum amount of dices in a single term
    pub max_count: u64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

/// A solved expression with its optional reason
#[derive(Debug, Clone)]
pub struct Outcome {
    result: RolledSum,
    reason: Option<String>,
}

impl Outcome {
    pub fn get_result(&self) -> &RolledSum {
        &self.result
    }

    pub fn get_reason(&self) -> Option<&String> {
        self.reason.as_ref()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = **{}**", self.result, self.result.get_total())?;
        if let Some(reason) = &self.reason {
            write!(f, " *reason* `{}`", reason)?;
        }
        Ok(())
    }
}

/// Represent a solver and holds the query string
#[derive(Clone, Debug)]
pub struct Solver {
    query: String,
    options: Options,
}

impl Solver {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, Options::default())
    }

    pub fn with_options(input: &str, options: Options) -> Self {
        Solver {
            query: input.to_owned(),
            options,
        }
    }

    /// Parse and validate the expression, reason excluded
    pub fn parse(&self) -> Result<RollSum> {
        RollSum::new(self.get_expr(), &self.options)
    }

    /// Solve the roll expression using the default Rng source
    pub fn solve(&self) -> Result<Outcome> {
        self.solve_with(&mut rand::thread_rng())
    }

    /// Solve the roll expression using the provided Rng source
    pub fn solve_with<S: Rng>(&self, generator: &mut S) -> Result<Outcome> {
        self.solve_with_source(&mut RandomSource { generator })
    }

    /// Solve the roll expression using the provided source
    pub fn solve_with_source<S: roll::Source>(&self, source: &mut S) -> Result<Outcome> {
        let result = self.parse()?.execute_with_source(source);
        Ok(Outcome {
            result,
            reason: self.get_reason().map(str::to_owned),
        })
    }

    /// Return the query string
    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn get_options(&self) -> &Options {
        &self.options
    }

    /// Expression part of the query
    pub fn get_expr(&self) -> &str {
        match self.query.split_once(REASON_SIGIL) {
            Some((expr, _)) => expr.trim(),
            None => self.query.trim(),
        }
    }

    /// Text following the reason sigil, if not blank
    pub fn get_reason(&self) -> Option<&str> {
        self.query
            .split_once(REASON_SIGIL)
            .map(|(_, reason)| reason.trim())
            .filter(|reason| !reason.is_empty())
    }

    /// Removes the reason from the query
    pub fn trim_reason(&mut self) {
        if let Some(index) = self.query.find(REASON_SIGIL) {
            self.query = self.query[..index].to_owned()
        }
    }
}
