use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

use crate::huffman_coding::tree::Frequencies;
use crate::huffman_coding::HuffError;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Encode text with a Huffman code built from the given symbol weights",
    long_about = "
    Builds a prefix-free Huffman code from the symbol weights given with -w, then prints the
    text encoded as a string of 0s and 1s. Ties between equal weights are broken on the symbols
    themselves, so the same weights always give the same code.

    Weights are written as <symbol>:<count> pairs separated by commas, e.g. -w 'a:5,b:2, :1'.
    A symbol is a single character and may itself be ',' or ':'."
)]
pub struct Args {
    /// Text to encode
    #[clap()]
    text: String,

    /// Symbol weights, e.g. 'h:1,e:1,l:3,o:2'
    #[clap(short = 'w', long = "weights")]
    weights: String,

    /// Print the code table before the encoded text
    #[clap(short = 's', long = "show-table")]
    show_table: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Count for every symbol that may appear in the text
    pub weights: Frequencies,
    /// Text to encode
    pub text: String,
    /// Print the code table as well as the bits
    pub show_table: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            weights: Frequencies::default(),
            text: String::new(),
            show_table: false,
            verbose: Verbosity::Warnings,
        }
    }

    /// Put command line information from CLAP into our internal structure.
    pub fn from_args(args: Args) -> Result<Self, HuffError> {
        Ok(Self {
            weights: parse_weights(&args.weights)?,
            text: args.text,
            show_table: args.show_table,
            verbose: Verbosity::from(args.v),
        })
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the process arguments, set the log level and return the options.
pub fn huffopts_init() -> Result<HuffOpts, HuffError> {
    let opts = HuffOpts::from_args(Args::parse())?;

    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- Huffcode Initialization Start ----");
    info!("Verbosity set to {}", opts.verbose);
    info!("{} symbols weighted", opts.weights.len());
    if opts.text.is_empty() {
        warn!("Nothing to encode")
    };
    if opts.show_table {
        info!("Showing the code table")
    };
    info!("---- Huffcode Initialization End ----\n");
    Ok(opts)
}

/// Parse a weight list such as `a:5,b:2, :1` into a frequency map.
///
/// Each entry is one character, a colon and a decimal count. Entries are separated by commas.
/// Because the symbol is always exactly one character, ',' and ':' can be used as symbols too
/// (`,:3` or `::3`). A symbol listed twice has its counts added together.
pub fn parse_weights(list: &str) -> Result<Frequencies, HuffError> {
    let bad = |position: usize, reason: String| HuffError::BadWeights { position, reason };
    let end = list.chars().count();

    let mut weights = Frequencies::default();
    let mut chars = list.chars().enumerate().peekable();

    while let Some((_, symbol)) = chars.next() {
        match chars.next() {
            Some((_, ':')) => {}
            Some((pos, other)) => {
                return Err(bad(
                    pos,
                    format!("expected ':' after {:?}, found {:?}", symbol, other),
                ))
            }
            None => return Err(bad(end, format!("missing count for {:?}", symbol))),
        }

        // Gather the digits of the count
        let mut count: Option<u64> = None;
        while let Some(&(pos, c)) = chars.peek() {
            let digit = match c.to_digit(10) {
                Some(digit) => digit as u64,
                None => break,
            };
            count = Some(
                count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(|| bad(pos, format!("count for {:?} is too large", symbol)))?,
            );
            chars.next();
        }
        let count = match count {
            Some(count) => count,
            None => {
                let pos = chars.peek().map_or(end, |&(pos, _)| pos);
                return Err(bad(pos, format!("missing count for {:?}", symbol)));
            }
        };

        let total = weights.entry(symbol).or_insert(0);
        *total = total.saturating_add(count);

        match chars.next() {
            None | Some((_, ',')) => {}
            Some((pos, other)) => {
                return Err(bad(pos, format!("expected ',' but found {:?}", other)))
            }
        }
    }
    Ok(weights)
}
