//! Operator-facing rendering.
//!
//! Addresses are coloured per character so two similar-looking addresses
//! can be compared at a glance. The colour of a character depends only on
//! the character, never on its position.

pub mod color;

pub use color::{color_address, diff_addresses, AddressDiff, DisplayError};

use crate::units::{Denominations, Unit};

/// A titled block of `label: value` rows.
pub fn boxed(title: &str, rows: &[(String, String)]) -> Vec<String> {
    let header = format!("╔══[ {} ]══╗", title);
    let width = header.chars().count();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header);
    for (label, value) in rows {
        lines.push(format!("  {:<10}: {}", label, value));
    }
    lines.push(format!("╚{}╝", "═".repeat(width.saturating_sub(2))));
    lines
}

/// Rows for the given units out of a conversion table.
pub fn unit_rows(table: &Denominations, units: &[Unit]) -> Vec<(String, String)> {
    units
        .iter()
        .map(|unit| (unit.name().to_string(), format!("{} {}", table.get(*unit), unit)))
        .collect()
}
