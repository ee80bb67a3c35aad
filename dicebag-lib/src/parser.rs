use crate::dice::Die;
use crate::dice::Modifier;
use crate::error::Error;
use crate::error::Result;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

/// Pest parser
#[derive(Parser)]
#[grammar = "dicebag.pest"]
pub struct Parser;

/// Pieces of a single dice term, before any validation against options
#[derive(Debug)]
pub(crate) struct Term {
    /// `None` when the count does not fit in a u64
    pub(crate) count: Option<u64>,
    /// `None` when the size is zero or does not fit in a u32
    pub(crate) die: Option<Die>,
    pub(crate) modifiers: Vec<Modifier>,
}

impl Parser {
    /// Parse `<count>d<size|F><modifiers>`
    pub(crate) fn parse_term(input: &str) -> Result<Term> {
        use pest::Parser as _;
        let term = Self::parse(Rule::term, input)?
            .next()
            .ok_or(Error::InvalidSyntax(None))?;
        let mut count = None;
        let mut die = None;
        let mut modifiers = Vec::new();
        for pair in term.into_inner() {
            match pair.as_rule() {
                Rule::count => count = pair.as_str().parse::<u64>().ok(),
                Rule::size => {
                    die = pair
                        .as_str()
                        .parse::<u32>()
                        .ok()
                        .filter(|&n| n > 0)
                        .map(Die::Sides)
                }
                Rule::fate => die = Some(Die::Fate),
                Rule::modifiers => modifiers = Self::extract_modifiers(pair),
                Rule::EOI => (),
                _ => unreachable!("{:?}", pair),
            }
        }
        Ok(Term {
            count,
            die,
            modifiers,
        })
    }

    fn extract_modifiers(pair: Pair<Rule>) -> Vec<Modifier> {
        pair.into_inner()
            .filter_map(|inner| match inner.as_rule() {
                Rule::modifier => Some(Modifier::from_pair(inner)),
                Rule::trailing => {
                    if !inner.as_str().is_empty() {
                        debug!("Ignoring trailing modifier text `{}`", inner.as_str());
                    }
                    None
                }
                _ => unreachable!("{:?}", inner),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Comparator;
    use crate::dice::Condition;

    #[test]
    fn plain_term_test() {
        let term = Parser::parse_term("3d6").unwrap();
        assert_eq!(Some(3), term.count);
        assert_eq!(Some(Die::Sides(6)), term.die);
        assert!(term.modifiers.is_empty());
    }

    #[test]
    fn fate_term_test() {
        let term = Parser::parse_term("4dF").unwrap();
        assert_eq!(Some(Die::Fate), term.die);
    }

    #[test]
    fn modifiers_term_test() {
        let term = Parser::parse_term("5d10s>7cs=10").unwrap();
        assert_eq!(Some(Die::Sides(10)), term.die);
        assert_eq!(
            vec![
                Modifier::Success(Condition {
                    comparator: Comparator::Greater,
                    value: Some(7)
                }),
                Modifier::CritSuccess(Condition {
                    comparator: Comparator::Equal,
                    value: Some(10)
                }),
            ],
            term.modifiers
        );
    }

    #[test]
    fn invalid_terms_test() {
        for input in ["", "d6", "3d", "3x6", "3dG", "3d+6", "hello", " d6 "] {
            assert!(
                matches!(Parser::parse_term(input), Err(Error::InvalidSyntax(_))),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn leading_text_is_skipped_test() {
        for input in [" 3d6", "+3d6", "x3d6", "roll 3d6"] {
            let term = Parser::parse_term(input).unwrap();
            assert_eq!(Some(3), term.count, "{input:?}");
            assert_eq!(Some(Die::Sides(6)), term.die, "{input:?}");
        }
    }

    #[test]
    fn first_complete_term_wins_test() {
        let term = Parser::parse_term("3dx2d6").unwrap();
        assert_eq!(Some(2), term.count);
        assert_eq!(Some(Die::Sides(6)), term.die);
        let term = Parser::parse_term("x12d6").unwrap();
        assert_eq!(Some(12), term.count);
        let term = Parser::parse_term("-4dF").unwrap();
        assert_eq!(Some(Die::Fate), term.die);
    }

    #[test]
    fn unusable_size_test() {
        assert_eq!(None, Parser::parse_term("3d0").unwrap().die);
        assert_eq!(None, Parser::parse_term("3d99999999999").unwrap().die);
    }

    #[test]
    fn huge_count_test() {
        let term = Parser::parse_term("99999999999999999999999d6").unwrap();
        assert_eq!(None, term.count);
    }

    #[test]
    fn malformed_tail_is_kept_out_test() {
        let term = Parser::parse_term("2d8>4 junk").unwrap();
        assert_eq!(1, term.modifiers.len());
    }
}
