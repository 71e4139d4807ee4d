//! Pure document transforms.
//!
//! Every operation takes a serialized notebook (plus parameters), parses
//! it, mutates an in-memory copy, and reserializes. Nothing is retained
//! between calls, so independent invocations are safe to run concurrently.

pub mod cells;
pub mod convert;

use std::str::FromStr;

use crate::error::NotebookError;
use crate::notebook::CellType;

/// Parse a user-supplied cell type string against the closed set.
pub(crate) fn parse_cell_type(value: &str) -> Result<CellType, NotebookError> {
    CellType::from_str(value).map_err(|_| NotebookError::InvalidCellType(value.to_string()))
}
