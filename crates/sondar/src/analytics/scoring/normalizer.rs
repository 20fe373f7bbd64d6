/// Normalization seam for answer-text matching.
///
/// The scorer only compares normalized text, so alternate questionnaires or
/// languages can swap in their own rules without touching the scoring math.
pub trait AnswerNormalizer: Send + Sync {
    /// Trim, collapse whitespace, lowercase, and strip accents.
    fn normalize(&self, raw: &str) -> String;

    /// Map a normalized free-text variant to its canonical option label.
    /// Returns the input untouched when no synonym applies.
    fn canonical<'a>(&'a self, normalized: &'a str) -> &'a str;
}

/// Portuguese questionnaire normalizer with the stock synonym table.
pub struct PortugueseNormalizer {
    synonyms: Vec<(&'static str, &'static str)>,
}

impl Default for PortugueseNormalizer {
    fn default() -> Self {
        // Left side must already be in normalized form (lowercase, accentless).
        Self {
            synonyms: vec![
                ("quase sempre", "frequentemente"),
                ("muitas vezes", "frequentemente"),
                ("quase nunca", "raramente"),
                ("jamais", "nunca"),
                ("constantemente", "sempre"),
                ("de vez em quando", "as vezes"),
            ],
        }
    }
}

impl AnswerNormalizer for PortugueseNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed
            .to_lowercase()
            .chars()
            .map(strip_accent)
            .collect()
    }

    fn canonical<'a>(&'a self, normalized: &'a str) -> &'a str {
        self.synonyms
            .iter()
            .find(|(variant, _)| *variant == normalized)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(normalized)
    }
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
