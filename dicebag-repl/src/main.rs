mod cli;
mod config;
mod helper;

use cli::Parser;
use colored::Colorize;
use config::Config;
use dicebag_lib::solver::Options;
use dicebag_lib::solver::Solver;
use helper::ReplHelper;
use rustyline::error::ReadlineError;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::HistoryHinter;
use rustyline::CompletionType;
use rustyline::EditMode;
use rustyline::Editor;
use rustyline::Result;
use termimad::crossterm::style::Color;
use termimad::MadSkin;
use tracing::debug;
use tracing::Level;
use tracing_unwrap::OptionExt;
use tracing_unwrap::ResultExt;

/// Roll one submitted line, `None` when there is nothing to roll
fn solve_line(line: &str, options: Options) -> Option<std::result::Result<String, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let outcome = Solver::with_options(line, options).solve();
    debug!("Rolled `{}`: {:?}", line, outcome);
    Some(outcome.map(|outcome| outcome.to_string()).map_err(|error| error.to_string()))
}

fn main() -> Result<()> {
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path).expect_or_log("Error loading config"),
        None => Config::default(),
    };
    if let Some(max_count) = args.max_count {
        config.max_count = max_count;
    }
    debug!("Using `{:?}`", config);
    let options = config.options();

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();
    let helper = ReplHelper {
        highlighter: MatchingBracketHighlighter::new(),
        hinter: HistoryHinter {},
        colored: "".to_owned(),
        options,
    };
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Magenta);
    let mut rline = Editor::with_config(editor_config)?;
    rline.set_helper(Some(helper));
    if rline.load_history(&config.history_file).is_err() {
        eprintln!("{}", "repl: warn: no previous history".bold().yellow());
    }
    let mut count = 1u64;
    loop {
        let prompt = format!("dicebag: {}> ", count);
        rline.helper_mut().expect_or_log("repl: panic: no helper").colored =
            prompt.bold().green().to_string();
        let readline = rline.readline(&prompt);
        match readline {
            Ok(line) => {
                rline.add_history_entry(line.as_str())?;
                match solve_line(&line, options) {
                    Some(Ok(outcome)) => println!("{}", skin.inline(&outcome)),
                    Some(Err(error)) => eprintln!("{}", error.bold().red()),
                    None => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("{}", "repl: signal: CTRL-C".bold().yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                eprintln!("{}", "repl: signal: CTRL-D".bold().yellow());
                break;
            }
            Err(error) => {
                eprintln!("{}", format!("repl: error: `{:?}`", error).bold().red());
                break;
            }
        }
        count += 1;
    }
    rline.append_history(&config.history_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: Options = Options { max_count: 20 };

    #[test]
    fn blank_line_test() {
        assert_eq!(None, solve_line("", OPTIONS));
        assert_eq!(None, solve_line("  \t ", OPTIONS));
    }

    #[test]
    fn rejected_line_test() {
        assert_eq!(
            Some(Err("Error: max number of dice exceeded.".to_owned())),
            solve_line("21d6", OPTIONS)
        );
        assert_eq!(
            Some(Err("Error: invalid roll command.".to_owned())),
            solve_line(" what ", OPTIONS)
        );
    }

    #[test]
    fn rolled_line_test() {
        let rendered = solve_line(" 2d6 : attack ", OPTIONS);
        assert!(matches!(rendered, Some(Ok(ref text)) if text.contains("attack")));
    }
}
