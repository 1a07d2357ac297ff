use crate::refs::{row_name, MAX_HOLES, MAX_ROWS};

/// Distance between neighbouring holes, in inches
pub const PITCH: f64 = 0.1;

/// Number of whole pitch units in a board length, tolerating float noise
/// in the dimensions (0.3 / 0.1 is just under 3).
///
/// Lengths that are not finite and positive have no units.
pub fn pitch_units(length: f64) -> usize {
    if !length.is_finite() || length <= 0.0 {
        return 0;
    }
    (length / PITCH + PITCH / 2.0).floor() as usize
}

/// One horizontal line of holes
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub name: String,
    /// Top edge of the row in board units
    pub y: f64,
}

/// Rows for a board of the given height
pub fn build(height: f64) -> Vec<Row> {
    with_count(pitch_units(height))
}

/// Holes per row, capped at the widest board a ref can address
pub(crate) fn hole_count(count: usize) -> usize {
    if count > MAX_HOLES {
        log::warn!("Board has {count} holes per row, keeping the first {MAX_HOLES}");
        MAX_HOLES
    } else {
        count
    }
}

pub(crate) fn with_count(count: usize) -> Vec<Row> {
    let count = if count > MAX_ROWS {
        log::warn!("Board has {count} rows, keeping the first {MAX_ROWS}");
        MAX_ROWS
    } else {
        count
    };
    (0..count)
        .map(|index| Row {
            index,
            name: row_name(index),
            y: index as f64 * PITCH,
        })
        .collect()
}
