use thiserror::Error;

/// Everything that can go wrong while building codes or encoding text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffError {
    /// The frequency map had no symbols in it.
    #[error("no symbols to encode: the frequency map is empty")]
    EmptyFrequencies,

    /// The text holds a character the code table has no entry for.
    #[error("can't encode symbol {symbol:?} as it isn't in the encoding table:\n{table}")]
    UnencodableSymbol { symbol: char, table: String },

    /// A weight list given on the command line could not be read.
    #[error("bad weight list at character {position}: {reason}")]
    BadWeights { position: usize, reason: String },
}
