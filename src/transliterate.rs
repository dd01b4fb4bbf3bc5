//! Filename normalization with Cyrillic-to-Latin transliteration.
//!
//! Destination names must be filesystem-safe and Latin-only. `normalize`
//! replaces every non-alphanumeric character with an underscore and
//! transliterates Cyrillic letters to their phonetic Latin equivalents.
//!
//! # Examples
//!
//! ```
//! use unclutter::transliterate::Transliterator;
//!
//! let tr = Transliterator::default();
//! assert_eq!(tr.normalize("привіт"), "privit");
//! assert_eq!(tr.normalize("my report (final)"), "my_report__final_");
//! ```

use std::collections::HashMap;

/// Lowercase Cyrillic letters and their Latin phonetic equivalents.
/// Uppercase variants are derived (the replacement string is uppercased too,
/// so 'Щ' becomes "SCH"). Hard and soft signs map to nothing.
const TRANSLITERATION: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "e"),
    ('ж', "j"),
    ('з', "z"),
    ('и', "i"),
    ('й', "j"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
    ('є', "je"),
    ('і', "i"),
    ('ї', "ji"),
    ('ґ', "g"),
];

/// Maps Cyrillic characters to Latin replacement strings.
///
/// Built once at startup and shared read-only by every walker task.
#[derive(Debug, Clone)]
pub struct Transliterator {
    table: HashMap<char, String>,
}

impl Transliterator {
    /// Creates a transliterator with the full Cyrillic table, both cases.
    pub fn new() -> Self {
        let mut table = HashMap::new();
        for &(letter, replacement) in TRANSLITERATION {
            table.insert(letter, replacement.to_string());
            for upper in letter.to_uppercase() {
                table.insert(upper, replacement.to_uppercase());
            }
        }
        Self { table }
    }

    /// Normalizes a name into a filesystem-safe, Latin-only form.
    ///
    /// Non-alphanumeric characters become underscores; Cyrillic letters are
    /// transliterated; everything else passes through with its case kept.
    /// Total function: never fails, never touches the filesystem.
    pub fn normalize(&self, name: &str) -> String {
        let mut normalized = String::with_capacity(name.len());
        for ch in name.chars() {
            if !ch.is_alphanumeric() {
                normalized.push('_');
            } else if let Some(replacement) = self.table.get(&ch) {
                normalized.push_str(replacement);
            } else {
                normalized.push(ch);
            }
        }
        normalized
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_passes_through() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("Report2024"), "Report2024");
    }

    #[test]
    fn test_punctuation_becomes_underscore() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("my file-1!"), "my_file_1_");
        assert_eq!(tr.normalize("a b.c"), "a_b_c");
    }

    #[test]
    fn test_lowercase_cyrillic() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("привіт"), "privit");
        assert_eq!(tr.normalize("щука"), "schuka");
    }

    #[test]
    fn test_uppercase_cyrillic_uppercases_replacement() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("Цех"), "TSeh");
        assert_eq!(tr.normalize("ЩИТ"), "SCHIT");
    }

    #[test]
    fn test_signs_are_elided() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("объём"), "obem");
        assert_eq!(tr.normalize("день"), "den");
    }

    #[test]
    fn test_result_is_ascii_safe() {
        let tr = Transliterator::default();
        let normalized = tr.normalize("звіт за рік (копія)");
        assert!(
            normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "unexpected character in {normalized:?}"
        );
    }

    #[test]
    fn test_ukrainian_letters() {
        let tr = Transliterator::default();
        assert_eq!(tr.normalize("їжак"), "jijak");
        assert_eq!(tr.normalize("ґанок"), "ganok");
        assert_eq!(tr.normalize("єнот"), "jenot");
    }
}
