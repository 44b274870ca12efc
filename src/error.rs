//! The error taxonomy for field parsing, instance validation, and the CLI.

use thiserror::Error;

use crate::hex_field::CellValue;
use crate::location::Location;

/// Every way a field, instance, or command-line argument can fail validation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HexlinkError {
    /// The field's rows are not a ziggurat of odd side `>= 3`.
    #[error("field is not a valid hexagonal ziggurat: {reason}")]
    ShapeError {
        /// A human-readable description of which row or dimension failed.
        reason: String,
    },

    /// A cell held text that does not parse as a non-negative integer.
    #[error("cell at {location} is not a non-negative integer: {symbol:?}")]
    BadCellSymbol {
        /// Where the bad cell was found.
        location: Location,
        /// The text that failed to parse.
        symbol: String,
    },

    /// Some non-zero number did not appear exactly twice, or no numbers were used at all.
    #[error("numbers are not all paired (offending values: {offenders:?})")]
    NotPaired {
        /// The numbers that did not appear exactly twice; empty if no non-zero number
        /// appeared at all.
        offenders: Vec<CellValue>,
    },

    /// Some number exceeded the configured maximum.
    #[error("number {number} exceeds the maximum of {max}")]
    OutOfRange {
        /// The offending value.
        number: CellValue,
        /// The maximum allowed value.
        max: CellValue,
    },

    /// The non-zero numbers used are not a dense run starting at 1.
    #[error("numbers used do not form a dense run: missing {missing:?}")]
    BrokenOrder {
        /// The values missing from the dense run.
        missing: Vec<CellValue>,
    },

    /// No field was supplied at all.
    #[error("no field was given")]
    NullOrEmpty,

    /// A command-line argument was out of its valid range.
    #[error("argument must be non-negative, got {0}")]
    ArgError(i64),

    /// A coordinate does not name a cell on the field.
    #[error("location {0} is out of bounds")]
    OutOfBounds(Location),
}
