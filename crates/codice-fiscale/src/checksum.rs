// Check character calculation over the first 15 characters of a code

use codice_core::error::{CodiceError, Result};

/// Length of the code without its check character.
pub const PREFIX_LEN: usize = 15;

/// Length of a complete fiscal code.
pub const CODE_LEN: usize = 16;

/// Weights for characters at odd 1-based positions, indexed by
/// `0..=9` then `A..=Z`. Digits share the weight of the letter at the same
/// index (`0` = `A`, `1` = `B`, ...).
const ODD_WEIGHTS: [u32; 36] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // 0-9
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // A-J
    2, 4, 18, 20, 11, 3, 6, 8, 12, 14, // K-T
    16, 10, 22, 25, 24, 23, // U-Z
];

/// Weights for characters at even 1-based positions: digits are their
/// value, letters their alphabet index.
const EVEN_WEIGHTS: [u32; 36] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // 0-9
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // A-J
    10, 11, 12, 13, 14, 15, 16, 17, 18, 19, // K-T
    20, 21, 22, 23, 24, 25, // U-Z
];

/// Remainder (mod 26) to check letter.
const CHECK_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Index of a character in the `0-9A-Z` weight tables.
fn weight_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'A'..='Z' => Some(10 + c as usize - 'A' as usize),
        _ => None,
    }
}

/// Weight of `c` at the given 1-based position.
///
/// Position `0` and characters outside `0-9A-Z` fail with `InvalidInput`.
pub fn weight(c: char, position: usize) -> Result<u32> {
    if position == 0 {
        return Err(CodiceError::InvalidInput(
            "character positions are 1-based".to_string(),
        ));
    }
    let index = weight_index(c).ok_or_else(|| {
        CodiceError::InvalidInput(format!("character {c:?} at position {position}"))
    })?;
    let table = if position % 2 == 0 {
        &EVEN_WEIGHTS
    } else {
        &ODD_WEIGHTS
    };
    Ok(table[index])
}

/// Compute the check character for a code prefix.
///
/// Each character is weighted by the odd or even table according to its
/// 1-based position; the sum modulo 26 selects the letter. Characters
/// outside `0-9A-Z` fail with `InvalidInput`.
pub fn check_character(prefix: &str) -> Result<char> {
    let mut sum = 0u32;
    for (i, c) in prefix.chars().enumerate() {
        sum += weight(c, i + 1)?;
    }
    Ok(CHECK_LETTERS[(sum % 26) as usize] as char)
}

/// Whether the last character of a 16-character code matches the check
/// character of its first 15. Fields are not decoded.
pub fn verify(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != CODE_LEN {
        return false;
    }
    let prefix: String = chars[..PREFIX_LEN].iter().collect();
    matches!(check_character(&prefix), Ok(c) if c == chars[PREFIX_LEN])
}
