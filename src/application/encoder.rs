use crate::domain::errors::ForecastError;
use crate::domain::schema::VocabularySet;

/// Maps raw categorical request fields to the integer codes the model was
/// trained on.
///
/// The trained vocabulary is casing-sensitive while end users are not, so
/// encoding is two-staged: a normalization pass first rewrites the raw value
/// into the casing the vocabulary uses, then a strict lookup rejects anything
/// still unknown, carrying the full valid-value list for diagnostics.
pub struct CategoricalEncoder {
    vocabularies: VocabularySet,
}

impl CategoricalEncoder {
    pub fn new(vocabularies: VocabularySet) -> Self {
        Self { vocabularies }
    }

    /// Strict lookup of a normalized value in `field`'s trained vocabulary.
    ///
    /// Encoding is total over the vocabulary and fails, never silently
    /// defaults, for values outside it.
    pub fn encode(&self, field: &str, value: &str) -> Result<usize, ForecastError> {
        let classes = self.vocabularies.classes(field).unwrap_or(&[]);
        classes
            .iter()
            .position(|class| class == value)
            .ok_or_else(|| ForecastError::UnknownCategoryValue {
                field: field.to_string(),
                value: value.to_string(),
                valid_values: classes.to_vec(),
            })
    }

    /// Trim, then case-insensitively match `raw` against `field`'s
    /// vocabulary, substituting the canonical casing on a hit.
    ///
    /// Unknown values fall through verbatim (trimmed) so the strict encode
    /// step can reject them with the valid-value list.
    pub fn canonicalize(&self, field: &str, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(classes) = self.vocabularies.classes(field)
            && let Some(hit) = classes.iter().find(|c| c.eq_ignore_ascii_case(trimmed))
        {
            return hit.clone();
        }
        trimmed.to_string()
    }
}

/// First letter of each whitespace-separated word uppercased, the rest
/// lowercased. Matches the casing the commodity vocabulary was trained with.
pub fn title_case(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{COL_ADMIN1, COL_MARKET};

    fn encoder() -> CategoricalEncoder {
        let mut vocab = VocabularySet::default();
        vocab.insert(
            COL_MARKET,
            vec![
                "Gikomba".to_string(),
                "Kongowea".to_string(),
                "Wakulima (Nairobi)".to_string(),
            ],
        );
        vocab.insert(COL_ADMIN1, vec!["Mombasa".to_string(), "Nairobi".to_string()]);
        CategoricalEncoder::new(vocab)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tomatoes"), "Tomatoes");
        assert_eq!(title_case("  irish potato "), "Irish Potato");
        assert_eq!(title_case("CABBAGE"), "Cabbage");
    }

    #[test]
    fn test_canonicalize_substitutes_vocabulary_casing() {
        let enc = encoder();
        assert_eq!(enc.canonicalize(COL_MARKET, "gikomba"), "Gikomba");
        assert_eq!(enc.canonicalize(COL_MARKET, "  KONGOWEA "), "Kongowea");
    }

    #[test]
    fn test_canonicalize_passes_unknown_values_through() {
        let enc = encoder();
        // Deferred failure: the strict encode step rejects this later.
        assert_eq!(enc.canonicalize(COL_MARKET, " Busia Soko "), "Busia Soko");
    }

    #[test]
    fn test_encode_is_class_index() {
        let enc = encoder();
        assert_eq!(enc.encode(COL_MARKET, "Gikomba").unwrap(), 0);
        assert_eq!(enc.encode(COL_MARKET, "Wakulima (Nairobi)").unwrap(), 2);
        assert_eq!(enc.encode(COL_ADMIN1, "Nairobi").unwrap(), 1);
    }

    #[test]
    fn test_encode_unknown_value_carries_valid_list() {
        let enc = encoder();
        let err = enc.encode(COL_MARKET, "Busia Soko").unwrap_err();
        match err {
            ForecastError::UnknownCategoryValue {
                field,
                value,
                valid_values,
            } => {
                assert_eq!(field, COL_MARKET);
                assert_eq!(value, "Busia Soko");
                assert_eq!(valid_values.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_encode_never_defaults_case_mismatch() {
        // Normalization is the caller's job; strict encode stays strict.
        let enc = encoder();
        assert!(enc.encode(COL_MARKET, "gikomba").is_err());
    }
}
