use deunicode::deunicode;
use strsim::jaro_winkler;

/// Tokens pair up when their Jaro-Winkler score reaches this value.
const TOKEN_PAIR_THRESHOLD: f64 = 0.90;

/// Normalize a string for fuzzy comparison.
///
/// Separators ("/", "\\", "|", "-") become spaces, accents fold to
/// ASCII, everything lowercases, punctuation drops out and whitespace
/// runs collapse to single spaces.
pub fn normalize(text: &str) -> String {
    let separated = text
        .replace('/', " ")
        .replace('\\', " ")
        .replace('|', " ")
        .replace('-', " ");

    deunicode(&separated)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Tokens of a normalized string.
///
/// Single-character tokens are dropped; they pair with almost anything
/// and skew the overlap ratio.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.len() > 1)
        .map(|s| s.to_string())
        .collect()
}

/// Jaro-Winkler similarity over normalized strings (0.0 to 1.0).
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(&normalize(a), &normalize(b))
}

/// Share of tokens that pair up across the two strings, independent of
/// word order ("Acme / Widgets" against "Widgets Acme" scores 1.0).
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let matched = a_tokens
        .iter()
        .filter(|at| {
            b_tokens
                .iter()
                .any(|bt| jaro_winkler(at, bt) >= TOKEN_PAIR_THRESHOLD)
        })
        .count();

    matched as f64 / a_tokens.len().max(b_tokens.len()) as f64
}

/// Best similarity between two strings: whole-string Jaro-Winkler or
/// token overlap, whichever scores higher. Token overlap rescues
/// reordered names that whole-string comparison penalizes hard.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler_similarity(a, b).max(token_similarity(a, b))
}
