//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::exit;

use huffcode::huffman_coding::code_table::CodeTable;
use huffcode::huffman_coding::tree::build;
use huffcode::huffman_coding::HuffError;
use huffcode::tools::cli::{huffopts_init, HuffOpts};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli narrows this down.
    // Logs go to stderr so stdout only carries the table and the bits.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let result = huffopts_init().and_then(|opts| encode(&opts));

    match result {
        Ok(bits) => {
            println!("{}", bits);
            info!("Done.\n");
        }
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}

/// Build the code from the weights in opts and return the encoded text.
fn encode(opts: &HuffOpts) -> Result<String, HuffError> {
    let root = build(&opts.weights)?;
    let table = CodeTable::from_tree(&root);

    if opts.show_table {
        print!("{}", table);
    }

    table.encode(&opts.text)
}
