// Character classification for name encoding
//
// Fiscal code name fields are built from the 26-letter Latin alphabet only.
// Accented letters common in Italian names are folded to their base letter
// before classification; everything else is discarded.

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// Vowels (uppercase): A E I O U
const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U'];

/// Consonants (uppercase): every other letter of the Latin alphabet,
/// including the foreign letters J K W X Y.
const CONSONANTS: &[char] = &[
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'X',
    'Y', 'Z',
];

/// Letter class used by the name field encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterClass {
    Vowel,
    Consonant,
}

/// Check whether a character is a vowel (case-insensitive, accents folded).
pub fn is_vowel(c: char) -> bool {
    classify(c) == Some(LetterClass::Vowel)
}

/// Check whether a character is a consonant (case-insensitive, accents folded).
pub fn is_consonant(c: char) -> bool {
    classify(c) == Some(LetterClass::Consonant)
}

/// Classify a character, returning `None` for anything that is not a letter
/// of the encoding alphabet (digits, whitespace, punctuation, non-Latin
/// letters).
pub fn classify(c: char) -> Option<LetterClass> {
    let upper = normalize_letter(c)?;
    if VOWELS.contains(&upper) {
        Some(LetterClass::Vowel)
    } else if CONSONANTS.contains(&upper) {
        Some(LetterClass::Consonant)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a character to its uppercase ASCII base letter.
///
/// Returns `None` when the character has no base letter in `A..=Z`.
pub fn normalize_letter(c: char) -> Option<char> {
    if c.is_ascii_alphabetic() {
        return Some(c.to_ascii_uppercase());
    }
    fold_accent(c)
}

/// Fold an accented Latin letter to its uppercase base letter.
fn fold_accent(c: char) -> Option<char> {
    let base = match c {
        '\u{00C0}'..='\u{00C5}' | '\u{00E0}'..='\u{00E5}' => 'A', // À-Å à-å
        '\u{00C7}' | '\u{00E7}' => 'C',                           // Ç ç
        '\u{00C8}'..='\u{00CB}' | '\u{00E8}'..='\u{00EB}' => 'E', // È-Ë è-ë
        '\u{00CC}'..='\u{00CF}' | '\u{00EC}'..='\u{00EF}' => 'I', // Ì-Ï ì-ï
        '\u{00D1}' | '\u{00F1}' => 'N',                           // Ñ ñ
        '\u{00D2}'..='\u{00D6}' | '\u{00F2}'..='\u{00F6}' => 'O', // Ò-Ö ò-ö
        '\u{00D9}'..='\u{00DC}' | '\u{00F9}'..='\u{00FC}' => 'U', // Ù-Ü ù-ü
        '\u{00DD}' | '\u{00FD}' | '\u{00FF}' => 'Y',              // Ý ý ÿ
        _ => return None,
    };
    Some(base)
}

/// Uppercase a name into the encoding alphabet, dropping every character
/// that has no base letter.
///
/// Returns a new string; the input is never modified.
pub fn normalize_name(text: &str) -> String {
    text.chars().filter_map(normalize_letter).collect()
}

/// Ordered consonants of `text` after normalization.
pub fn consonants(text: &str) -> Vec<char> {
    letters_of_class(text, LetterClass::Consonant)
}

/// Ordered vowels of `text` after normalization.
pub fn vowels(text: &str) -> Vec<char> {
    letters_of_class(text, LetterClass::Vowel)
}

fn letters_of_class(text: &str, class: LetterClass) -> Vec<char> {
    text.chars()
        .filter(|&c| classify(c) == Some(class))
        .filter_map(normalize_letter)
        .collect()
}
