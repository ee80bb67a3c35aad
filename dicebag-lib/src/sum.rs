use crate::error::Error;
use crate::error::Result;
use crate::group::RollGroup;
use crate::group::RolledGroup;
use crate::roll;
use crate::roll::kind::Kind;
use crate::roll::kind::Total;
use crate::roll::Roll;
use crate::roll::Rolled;
use crate::solver::Options;
use crate::solver::RandomSource;
use itertools::Itertools;
use rand::Rng;

/// Split on `separator` wherever the brace depth is zero
pub(crate) fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut depth = 0i64;
    let mut last = 0;
    let mut chunks = Vec::new();
    for (index, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            c if c == separator && depth == 0 => {
                chunks.push(&input[last..index]);
                last = index + c.len_utf8();
            }
            _ => (),
        }
    }
    chunks.push(&input[last..]);
    chunks
}

/// Parse every chunk in order, the first one declares the kind all others must share.
/// The first error met is returned as is.
pub(crate) fn collect_members<'i, T, P, K>(
    chunks: impl IntoIterator<Item = &'i str>,
    mut parse: P,
    kind_of: K,
) -> Result<(Vec<T>, Kind)>
where
    P: FnMut(&'i str) -> Result<T>,
    K: Fn(&T) -> Kind,
{
    let mut members = Vec::new();
    let mut declared = None;
    for chunk in chunks {
        let member = parse(chunk)?;
        let kind = kind_of(&member);
        if *declared.get_or_insert(kind) != kind {
            return Err(Error::MixedResultTypes);
        }
        members.push(member);
    }
    Ok((members, declared.unwrap_or(Kind::Sum)))
}

/// One term of a sum
#[derive(Debug, Clone)]
pub enum Member {
    Roll(Roll),
    Group(RollGroup),
}

impl Member {
    fn new(input: &str, options: &Options) -> Result<Self> {
        if input.starts_with('{') {
            RollGroup::new(input, options).map(Member::Group)
        } else {
            Roll::new(input, options).map(Member::Roll)
        }
    }

    pub fn get_kind(&self) -> Kind {
        match self {
            Member::Roll(roll) => roll.get_kind(),
            Member::Group(group) => group.get_kind(),
        }
    }

    fn execute_with_source<S: roll::Source>(self, source: &mut S) -> RolledMember {
        match self {
            Member::Roll(roll) => RolledMember::Roll(roll.execute_with_source(source)),
            Member::Group(group) => RolledMember::Group(group.execute_with_source(source)),
        }
    }
}

/// One thrown term of a sum
#[derive(Debug, Clone)]
pub enum RolledMember {
    Roll(Rolled),
    Group(RolledGroup),
}

impl RolledMember {
    pub fn get_total(&self) -> Total {
        match self {
            RolledMember::Roll(rolled) => rolled.get_total(),
            RolledMember::Group(rolled) => rolled.get_total(),
        }
    }
}

impl std::fmt::Display for RolledMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RolledMember::Roll(rolled) => write!(f, "{rolled}"),
            RolledMember::Group(rolled) => write!(f, "{rolled}"),
        }
    }
}

/// Terms joined by `+`, all of the same kind
#[derive(Debug, Clone)]
pub struct RollSum {
    members: Vec<Member>,
    kind: Kind,
}

impl RollSum {
    /// Parse and validate a whole expression like `2d6+1d8` without throwing anything
    pub fn new(input: &str, options: &Options) -> Result<Self> {
        let (members, kind) = collect_members(
            split_top_level(input, '+'),
            |chunk| Member::new(chunk, options),
            Member::get_kind,
        )?;
        Ok(RollSum { members, kind })
    }

    pub fn terms(&self) -> &[Member] {
        &self.members
    }

    pub fn get_kind(&self) -> Kind {
        self.kind
    }

    pub fn is_type_success(&self) -> bool {
        self.kind == Kind::Success
    }

    /// Throw every term using the default Rng source
    pub fn execute(self) -> RolledSum {
        self.execute_with(&mut rand::thread_rng())
    }

    /// Throw every term using the provided Rng source
    pub fn execute_with<R: Rng>(self, generator: &mut R) -> RolledSum {
        self.execute_with_source(&mut RandomSource { generator })
    }

    /// Throw every term, in order, using the provided source
    pub fn execute_with_source<S: roll::Source>(self, source: &mut S) -> RolledSum {
        let members: Vec<_> = self
            .members
            .into_iter()
            .map(|member| member.execute_with_source(source))
            .collect();
        // members share `self.kind`, checked while parsing
        let total = Total::new(
            self.kind,
            members.iter().map(|member| member.get_total().get_value()).sum(),
        );
        RolledSum { members, total }
    }
}

/// A thrown expression
#[derive(Debug, Clone)]
pub struct RolledSum {
    members: Vec<RolledMember>,
    total: Total,
}

impl RolledSum {
    pub fn members(&self) -> &[RolledMember] {
        &self.members
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
}

impl std::fmt::Display for RolledSum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.members.iter().format("+"))
    }
}
