use crate::error::Error;
use crate::error::Result;
use crate::roll;
use crate::roll::kind::Kind;
use crate::roll::kind::Total;
use crate::solver::Options;
use crate::sum::collect_members;
use crate::sum::split_top_level;
use crate::sum::RollSum;
use crate::sum::RolledSum;
use itertools::Itertools;
use tracing::debug;

/// Grouped rolls are only parsed when built with the `grouped-rolls` feature
const GROUPS_ENABLED: bool = cfg!(feature = "grouped-rolls");

/// Deepest brace nesting accepted in a grouped roll
pub const MAX_GROUP_DEPTH: usize = 16;

/// Deepest level of open braces reached while scanning `input`
fn nesting_depth(input: &str) -> usize {
    input
        .chars()
        .fold((0usize, 0usize), |(depth, deepest), c| match c {
            '{' => (depth + 1, deepest.max(depth + 1)),
            '}' => (depth.saturating_sub(1), deepest),
            _ => (depth, deepest),
        })
        .1
}

/// Split `{a,b,...}opts` into its member expressions and trailing options.
/// A missing closing brace leaves the options empty.
fn split_group(input: &str) -> (Vec<&str>, &str) {
    let body = input.strip_prefix('{').unwrap_or(input);
    let mut depth = 0i64;
    let mut close = None;
    for (index, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => {
                close = Some(index);
                break;
            }
            '}' => depth -= 1,
            _ => (),
        }
    }
    match close {
        Some(index) => (split_top_level(&body[..index], ','), &body[index + 1..]),
        None => (split_top_level(body, ','), ""),
    }
}

/// Expressions between braces, separated by commas, of a single kind
#[derive(Debug, Clone)]
pub struct RollGroup {
    members: Vec<RollSum>,
    kind: Kind,
    options: String,
}

impl RollGroup {
    pub fn new(input: &str, options: &Options) -> Result<Self> {
        if !GROUPS_ENABLED {
            debug!("Grouped roll `{}` while groups are disabled", input);
            return Err(Error::UnsupportedFeature);
        }
        // nested groups parse recursively, bound the stack before descending
        if nesting_depth(input) > MAX_GROUP_DEPTH {
            debug!("Grouped roll nested deeper than `{}`", MAX_GROUP_DEPTH);
            return Err(Error::InvalidSyntax(None));
        }
        let (chunks, trailing) = split_group(input);
        let (members, kind) = collect_members(
            chunks,
            |chunk| RollSum::new(chunk, options),
            RollSum::get_kind,
        )?;
        Ok(RollGroup {
            members,
            kind,
            options: trailing.to_owned(),
        })
    }

    pub fn terms(&self) -> &[RollSum] {
        &self.members
    }

    pub fn get_kind(&self) -> Kind {
        self.kind
    }

    /// Text after the closing brace, kept but without effect
    pub fn get_options(&self) -> &str {
        &self.options
    }

    pub fn execute_with_source<S: roll::Source>(self, source: &mut S) -> RolledGroup {
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
        RolledGroup {
            members,
            total,
            options: self.options,
        }
    }
}

/// A thrown group
#[derive(Debug, Clone)]
pub struct RolledGroup {
    members: Vec<RolledSum>,
    total: Total,
    options: String,
}

impl RolledGroup {
    pub fn members(&self) -> &[RolledSum] {
        &self.members
    }

    pub fn get_total(&self) -> Total {
        self.total
    }

    pub fn get_options(&self) -> &str {
        &self.options
    }
}

impl std::fmt::Display for RolledGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.members.iter().format("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_group_test() {
        assert_eq!((vec!["1d6", "2d6"], ""), split_group("{1d6,2d6}"));
        assert_eq!((vec!["1d6", "2d6"], "kh1"), split_group("{1d6,2d6}kh1"));
        assert_eq!((vec!["1d6+{1d4,1d8}", "2d6"], ""), split_group("{1d6+{1d4,1d8},2d6}"));
        assert_eq!((vec!["1d6", "2d6"], ""), split_group("{1d6,2d6"));
        assert_eq!((vec![""], ""), split_group("{}"));
    }

    #[test]
    fn nesting_depth_test() {
        assert_eq!(0, nesting_depth("1d6"));
        assert_eq!(1, nesting_depth("{1d6,2d6}"));
        assert_eq!(2, nesting_depth("{1d6+{1d4,1d8},{2d6}}"));
        assert_eq!(3, nesting_depth("{{{1d6"));
        assert_eq!(1, nesting_depth("}}{1d6}"));
    }

    #[cfg(not(feature = "grouped-rolls"))]
    #[test]
    fn always_unsupported_test() {
        let options = Options::default();
        for input in ["{1d6}", "{1d6,2d6}", "{}", "{garbage", "{1d6}+1d4"] {
            assert!(
                matches!(RollGroup::new(input, &options), Err(Error::UnsupportedFeature)),
                "{input:?} should be unsupported"
            );
            assert!(matches!(
                RollSum::new(input, &options),
                Err(Error::UnsupportedFeature)
            ));
        }
    }

    #[cfg(feature = "grouped-rolls")]
    mod enabled {
        use super::super::*;
        use crate::tests::MockIter;

        #[test]
        fn nested_group_test() {
            let sum = RollSum::new("{{1d6},1d4}", &Options::default()).unwrap();
            let rolled = sum.execute_with_source(&mut MockIter {
                iter: &mut vec![6, 2].into_iter(),
            });
            assert_eq!(Some(8), rolled.get_sum());
        }

        #[test]
        fn deep_nesting_rejected_test() {
            let depth = MAX_GROUP_DEPTH + 1;
            let input = format!("{}1d6{}", "{".repeat(depth), "}".repeat(depth));
            assert!(matches!(
                RollSum::new(&input, &Options::default()),
                Err(Error::InvalidSyntax(None))
            ));
            let input = format!("{}1d6", "{".repeat(10_000));
            assert!(matches!(
                RollSum::new(&input, &Options::default()),
                Err(Error::InvalidSyntax(None))
            ));
            let input = format!(
                "{}1d6{}",
                "{".repeat(MAX_GROUP_DEPTH),
                "}".repeat(MAX_GROUP_DEPTH)
            );
            assert!(RollSum::new(&input, &Options::default()).is_ok());
        }

        #[test]
        fn group_sum_test() {
            let group = RollGroup::new("{1d6,2d4}kh1", &Options::default()).unwrap();
            assert_eq!(2, group.terms().len());
            assert_eq!("kh1", group.get_options());
            let rolled = group.execute_with_source(&mut MockIter {
                iter: &mut vec![5, 1, 3].into_iter(),
            });
            assert_eq!(Total::Sum(9), rolled.get_total());
            assert_eq!("(5)+(1+3)", rolled.to_string());
        }

        #[test]
        fn group_mixed_kinds_test() {
            assert!(matches!(
                RollGroup::new("{1d6,1d6>3}", &Options::default()),
                Err(Error::MixedResultTypes)
            ));
        }

        #[test]
        fn group_member_error_test() {
            assert!(matches!(
                RollGroup::new("{1d6,oops}", &Options::default()),
                Err(Error::InvalidSyntax(_))
            ));
        }

        #[test]
        fn group_in_sum_test() {
            let sum = RollSum::new("{2d6>4,1d8>4}+3d6>4", &Options::default()).unwrap();
            assert!(sum.is_type_success());
            let rolled = sum.execute_with_source(&mut MockIter {
                iter: &mut vec![5, 2, 8, 6, 6, 1].into_iter(),
            });
            assert_eq!(Some(4), rolled.get_successes());
        }
    }
}
