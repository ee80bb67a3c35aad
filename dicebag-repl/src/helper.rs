use colored::Colorize;
use dicebag_lib::solver::Options;
use dicebag_lib::solver::Solver;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::Hinter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::Context;
use rustyline::Result;
use rustyline_derive::Helper;
use std::borrow::Cow;
use std::borrow::Cow::Borrowed;
use std::borrow::Cow::Owned;

/// Modifier keywords offered on completion, longest first
const KEYWORDS: [&str; 17] = [
    "!!", "!p", "kh", "kl", "dh", "dl", "ro", "sa", "sd", "cs", "cf", "!", "k", "d", "r", "s",
    "f",
];

/// State of an edited line before it is submitted
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineState {
    Blank,
    /// A group brace is still open
    Open,
    Ready,
    Rejected(String),
}

#[derive(Helper)]
pub(crate) struct ReplHelper {
    pub(crate) highlighter: MatchingBracketHighlighter,
    pub(crate) hinter: HistoryHinter,
    pub(crate) colored: String,
    pub(crate) options: Options,
}

impl ReplHelper {
    /// Parse the line without rolling so errors show up before submission
    pub(crate) fn check(&self, line: &str) -> LineState {
        if line.trim().is_empty() {
            return LineState::Blank;
        }
        if line.matches('{').count() > line.matches('}').count() {
            return LineState::Open;
        }
        match Solver::with_options(line, self.options).parse() {
            Ok(_) => LineState::Ready,
            Err(error) => LineState::Rejected(error.to_string()),
        }
    }

    /// Keywords completing the modifier being typed right after a term
    pub(crate) fn candidates(line: &str) -> (usize, Vec<String>) {
        let start = line
            .rfind(|c: char| c.is_ascii_digit() || "F<>=+ ".contains(c))
            .map_or(0, |index| index + 1);
        let partial = &line[start..];
        if start == 0 || !line[..start].contains('d') {
            return (start, Vec::new());
        }
        let words = KEYWORDS
            .iter()
            .filter(|keyword| keyword.starts_with(partial) && **keyword != partial)
            .map(|keyword| keyword.to_string())
            .collect();
        (start, words)
    }
}

impl Completer for ReplHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>)> {
        Ok(Self::candidates(&line[..pos]))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> Result<ValidationResult> {
        Ok(match self.check(ctx.input()) {
            LineState::Blank | LineState::Ready => ValidationResult::Valid(None),
            LineState::Open => ValidationResult::Incomplete,
            LineState::Rejected(error) => {
                ValidationResult::Invalid(Some(format!("  {}", error.bold().red())))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper(max_count: u64) -> ReplHelper {
        ReplHelper {
            highlighter: MatchingBracketHighlighter::new(),
            hinter: HistoryHinter {},
            colored: String::new(),
            options: Options { max_count },
        }
    }

    #[test]
    fn check_test() {
        let helper = helper(10);
        assert_eq!(LineState::Blank, helper.check("   "));
        assert_eq!(LineState::Ready, helper.check("3d6 + 1d4 : damage"));
        assert_eq!(LineState::Open, helper.check("{1d6,"));
        assert_eq!(
            LineState::Rejected("Error: max number of dice exceeded.".to_owned()),
            helper.check("11d6")
        );
        assert_eq!(
            LineState::Rejected("Error: mixed sum and success roll types.".to_owned()),
            helper.check("1d6+1d6>3")
        );
        assert_eq!(
            LineState::Rejected("Error: invalid roll command.".to_owned()),
            helper.check("hello")
        );
    }

    #[test]
    fn candidates_test() {
        let (start, words) = ReplHelper::candidates("4d6k");
        assert_eq!(3, start);
        assert_eq!(vec!["kh", "kl"], words);
        let (start, words) = ReplHelper::candidates("5d10s>7c");
        assert_eq!(7, start);
        assert_eq!(vec!["cs", "cf"], words);
        assert_eq!(KEYWORDS.len(), ReplHelper::candidates("2d8").1.len());
    }

    #[test]
    fn no_candidates_before_term_test() {
        assert!(ReplHelper::candidates("").1.is_empty());
        assert!(ReplHelper::candidates("k").1.is_empty());
        assert!(ReplHelper::candidates("12").1.is_empty());
    }
}
