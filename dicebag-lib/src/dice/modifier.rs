use crate::parser::Rule;
use pest::iterators::Pair;

/// Comparison applied between a die face and a modifier number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Comparator {
    Greater,
    Less,
    #[default]
    Equal,
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparator::Greater => write!(f, ">"),
            Comparator::Less => write!(f, "<"),
            Comparator::Equal => write!(f, "="),
        }
    }
}

/// Comparator and optional number following a modifier keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub comparator: Comparator,
    pub value: Option<i64>,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.comparator)?;
        if let Some(value) = self.value {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Every keyword the modifier tokenizer recognizes.
///
/// Only the success, failure and crit variants change how a roll is
/// evaluated; the others are accepted syntax with no effect yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// bare `<cond>`, same as `s<cond>`
    Threshold(Condition),
    Success(Condition),
    Failure(Condition),
    CritSuccess(Condition),
    CritFailure(Condition),
    /// `!`
    Explode(Condition),
    /// `!!`
    Compound(Condition),
    /// `!p`
    Penetrate(Condition),
    Keep(Condition),
    KeepHigh(Condition),
    KeepLow(Condition),
    Drop(Condition),
    DropHigh(Condition),
    DropLow(Condition),
    Reroll(Condition),
    RerollOnce(Condition),
    SortAscending(Condition),
    SortDescending(Condition),
}

impl Modifier {
    /// Build a modifier from a `modifier` pair of the grammar
    pub(crate) fn from_pair(pair: Pair<Rule>) -> Self {
        let mut keyword = None;
        let mut condition = Condition {
            comparator: Comparator::default(),
            value: None,
        };
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::greater => condition.comparator = Comparator::Greater,
                Rule::less => condition.comparator = Comparator::Less,
                Rule::equal => condition.comparator = Comparator::Equal,
                // digits only, so parsing fails on overflow alone
                Rule::number => {
                    condition.value = Some(inner.as_str().parse::<i64>().unwrap_or(i64::MAX))
                }
                rule => keyword = Some(rule),
            }
        }
        match keyword {
            None => Modifier::Threshold(condition),
            Some(Rule::success) => Modifier::Success(condition),
            Some(Rule::failure) => Modifier::Failure(condition),
            Some(Rule::crit_success) => Modifier::CritSuccess(condition),
            Some(Rule::crit_failure) => Modifier::CritFailure(condition),
            Some(Rule::explode) => Modifier::Explode(condition),
            Some(Rule::compound) => Modifier::Compound(condition),
            Some(Rule::penetrate) => Modifier::Penetrate(condition),
            Some(Rule::keep_n) => Modifier::Keep(condition),
            Some(Rule::keep_hi) => Modifier::KeepHigh(condition),
            Some(Rule::keep_lo) => Modifier::KeepLow(condition),
            Some(Rule::drop_n) => Modifier::Drop(condition),
            Some(Rule::drop_hi) => Modifier::DropHigh(condition),
            Some(Rule::drop_lo) => Modifier::DropLow(condition),
            Some(Rule::reroll) => Modifier::Reroll(condition),
            Some(Rule::reroll_once) => Modifier::RerollOnce(condition),
            Some(Rule::sort_asc) => Modifier::SortAscending(condition),
            Some(Rule::sort_desc) => Modifier::SortDescending(condition),
            Some(rule) => unreachable!("{:?}", rule),
        }
    }

    pub fn get_condition(&self) -> &Condition {
        match self {
            Modifier::Threshold(c)
            | Modifier::Success(c)
            | Modifier::Failure(c)
            | Modifier::CritSuccess(c)
            | Modifier::CritFailure(c)
            | Modifier::Explode(c)
            | Modifier::Compound(c)
            | Modifier::Penetrate(c)
            | Modifier::Keep(c)
            | Modifier::KeepHigh(c)
            | Modifier::KeepLow(c)
            | Modifier::Drop(c)
            | Modifier::DropHigh(c)
            | Modifier::DropLow(c)
            | Modifier::Reroll(c)
            | Modifier::RerollOnce(c)
            | Modifier::SortAscending(c)
            | Modifier::SortDescending(c) => c,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Modifier::Threshold(_) => "",
            Modifier::Success(_) => "s",
            Modifier::Failure(_) => "f",
            Modifier::CritSuccess(_) => "cs",
            Modifier::CritFailure(_) => "cf",
            Modifier::Explode(_) => "!",
            Modifier::Compound(_) => "!!",
            Modifier::Penetrate(_) => "!p",
            Modifier::Keep(_) => "k",
            Modifier::KeepHigh(_) => "kh",
            Modifier::KeepLow(_) => "kl",
            Modifier::Drop(_) => "d",
            Modifier::DropHigh(_) => "dh",
            Modifier::DropLow(_) => "dl",
            Modifier::Reroll(_) => "r",
            Modifier::RerollOnce(_) => "ro",
            Modifier::SortAscending(_) => "sa",
            Modifier::SortDescending(_) => "sd",
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.keyword(), self.get_condition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pest::Parser as _;

    fn modifiers(input: &str) -> Vec<Modifier> {
        Parser::parse(Rule::modifiers, input)
            .unwrap()
            .next()
            .unwrap()
            .into_inner()
            .filter(|p| p.as_rule() == Rule::modifier)
            .map(Modifier::from_pair)
            .collect()
    }

    fn cond(comparator: Comparator, value: Option<i64>) -> Condition {
        Condition { comparator, value }
    }

    #[test]
    fn success_and_crit_test() {
        assert_eq!(
            vec![
                Modifier::Success(cond(Comparator::Greater, Some(7))),
                Modifier::CritSuccess(cond(Comparator::Equal, Some(10))),
            ],
            modifiers("s>7cs=10")
        );
    }

    #[test]
    fn default_comparator_test() {
        assert_eq!(
            vec![Modifier::Failure(cond(Comparator::Equal, Some(1)))],
            modifiers("f1")
        );
        assert_eq!(
            vec![Modifier::Threshold(cond(Comparator::Equal, Some(6)))],
            modifiers("6")
        );
    }

    #[test]
    fn longest_keyword_test() {
        let parsed = modifiers("!!!p!khkldhdlrosasdkdr");
        let keywords: Vec<_> = parsed.iter().map(|m| m.keyword()).collect();
        assert_eq!(
            vec!["!!", "!p", "!", "kh", "kl", "dh", "dl", "ro", "sa", "sd", "k", "d", "r"],
            keywords
        );
    }

    #[test]
    fn missing_number_test() {
        assert_eq!(
            vec![Modifier::Threshold(cond(Comparator::Greater, None))],
            modifiers(">")
        );
    }

    #[test]
    fn huge_number_saturates_test() {
        assert_eq!(
            vec![Modifier::Success(cond(Comparator::Less, Some(i64::MAX)))],
            modifiers("s<99999999999999999999")
        );
    }

    #[test]
    fn stops_at_unknown_text_test() {
        let pairs = Parser::parse(Rule::modifiers, "s>3x<2")
            .unwrap()
            .next()
            .unwrap()
            .into_inner();
        let (mods, rest): (Vec<_>, Vec<_>) = pairs.partition(|p| p.as_rule() == Rule::modifier);
        assert_eq!(1, mods.len());
        assert_eq!("x<2", rest[0].as_str());
    }

    #[test]
    fn display_test() {
        let rendered: Vec<_> = modifiers("s>7cs=10!k3")
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(vec!["s>7", "cs=10", "!=", "k=3"], rendered);
    }
}
