//! Per-character truecolour rendering of addresses.

use thiserror::Error;

/// `0x` plus forty hex digits.
pub const ADDRESS_TEXT_LEN: usize = 42;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("please enter a valid address")]
    InvalidAddress,
}

/// Both sides of a comparison, with differing characters coloured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDiff {
    pub left: String,
    pub right: String,
    pub differs: bool,
}

/// ANSI truecolour escape derived from FNV-1a 64 of the character.
fn char_color(c: char) -> String {
    let mut buf = [0u8; 4];
    let hash = c.encode_utf8(&mut buf).bytes().fold(FNV_OFFSET_BASIS, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    });
    let r = (hash >> 16) & 0xff;
    let g = (hash >> 8) & 0xff;
    let b = hash & 0xff;
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

fn paint(c: char) -> String {
    format!("{}{}{}", char_color(c), c, RESET)
}

fn check(address: &str) -> Result<(), DisplayError> {
    if address.chars().count() != ADDRESS_TEXT_LEN {
        return Err(DisplayError::InvalidAddress);
    }
    Ok(())
}

/// Colour every character of a 42-character address.
pub fn color_address(address: &str) -> Result<String, DisplayError> {
    check(address)?;
    Ok(address.chars().map(paint).collect())
}

/// Colour only the positions where `left` and `right` differ.
pub fn diff_addresses(left: &str, right: &str) -> Result<AddressDiff, DisplayError> {
    check(left)?;
    check(right)?;

    let mut diff = AddressDiff {
        left: String::new(),
        right: String::new(),
        differs: false,
    };
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            diff.left.push(l);
            diff.right.push(r);
        } else {
            diff.left.push_str(&paint(l));
            diff.right.push_str(&paint(r));
            diff.differs = true;
        }
    }
    Ok(diff)
}
