use clap::crate_authors;
use clap::crate_description;
use clap::crate_version;
pub use clap::Parser;
use std::path::PathBuf;

const DICEBAG_AUTHOR: &str = crate_authors!();
const DICEBAG_VERSION: &str = crate_version!();
const DICEBAG_ABOUT: &str = crate_description!();
const DICEBAG_FLAG_D_SHORT: char = 'd';
const DICEBAG_FLAG_D_HELP: &str = "Enable Debug logging";
const DICEBAG_FLAG_M_SHORT: char = 'm';
const DICEBAG_FLAG_M_HELP: &str = "Maximum amount of dices in a single term";
const DICEBAG_FLAG_C_SHORT: char = 'c';
const DICEBAG_FLAG_C_HELP: &str = "Path to a RON configuration file";

#[derive(Parser, Debug)]
#[command(author = DICEBAG_AUTHOR, version = DICEBAG_VERSION, about = DICEBAG_ABOUT)]
pub struct Args {
    #[arg(short = DICEBAG_FLAG_D_SHORT, long, help = DICEBAG_FLAG_D_HELP, action)]
    pub debug: bool,
    #[arg(short = DICEBAG_FLAG_M_SHORT, long, help = DICEBAG_FLAG_M_HELP)]
    pub max_count: Option<u64>,
    #[arg(short = DICEBAG_FLAG_C_SHORT, long, help = DICEBAG_FLAG_C_HELP)]
    pub config: Option<PathBuf>,
}
