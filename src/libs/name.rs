//! Name validation and canonical formatting for users and labels.
//!
//! User names are restricted to the Cyrillic alphabet and stored title-cased
//! (`"алексей   сидОРов "` becomes `"Алексей Сидоров"`). Label names accept
//! any characters; only surrounding whitespace is trimmed and inner runs of
//! whitespace are collapsed.

use super::error::NameError;

fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Rejects empty names and names with characters outside the alphabet.
pub fn validate_user_name(name: &str) -> Result<(), NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !name.chars().all(|c| c == ' ' || is_cyrillic_letter(c)) {
        return Err(NameError::InvalidAlphabet(name.to_string()));
    }
    Ok(())
}

/// Lowercases the name and capitalizes each whitespace-separated word.
pub fn canonicalize(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize_user_name(name: &str) -> Result<String, NameError> {
    validate_user_name(name)?;
    Ok(canonicalize(name))
}

pub fn normalize_label_name(name: &str) -> Result<String, NameError> {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    Ok(collapsed)
}
