//! Skill tagging against a fixed vocabulary.
//!
//! This is a lexical membership test, not inference: a skill is found when a
//! single token or a whole phrase chunk equals a vocabulary entry exactly.
//! Multi-word skills ("machine learning") can only match as a whole chunk.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

static TECH_SKILLS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "python",
        "java",
        "c++",
        "c#",
        "javascript",
        "html",
        "css",
        "sql",
        "mongodb",
        "mysql",
        "postgresql",
        "tensorflow",
        "keras",
        "pytorch",
        "machine learning",
        "deep learning",
        "nlp",
        "flask",
        "django",
        "fastapi",
        "react",
        "angular",
        "node.js",
        "git",
        "github",
        "linux",
        "aws",
        "azure",
        "gcp",
        "docker",
        "kubernetes",
        "pandas",
        "numpy",
        "matplotlib",
        "seaborn",
        "scikit-learn",
        "power bi",
        "tableau",
        "rest api",
        "graphql",
        "excel",
        "powerpoint",
        "snowflake",
        "airflow",
    ]
    .into_iter()
    .collect()
});

/// Words that end a phrase chunk without belonging to it.
static FUNCTION_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "nor", "but", "with", "without", "in", "into", "of",
        "for", "to", "on", "at", "by", "from", "via", "using", "as", "including", "is", "are",
        "was", "were", "be", "been", "i", "we", "my", "our", "also",
    ]
    .into_iter()
    .collect()
});

/// Tokens and phrase chunks of lower-cased text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tagged {
    pub tokens: Vec<String>,
    pub chunks: Vec<String>,
}

pub fn is_known_skill(term: &str) -> bool {
    TECH_SKILLS.contains(term)
}

/// Skills mentioned in `text`, sorted and deduplicated.
pub fn find_skills(text: &str) -> Vec<String> {
    let tagged = tag(&text.to_lowercase());
    let found: BTreeSet<String> = tagged
        .tokens
        .into_iter()
        .chain(tagged.chunks)
        .filter(|term| is_known_skill(term))
        .collect();
    found.into_iter().collect()
}

/// Splits already lower-cased text into tokens and phrase chunks.
///
/// Chunks break at list punctuation, at sentence-ending periods and at
/// function words, which approximates noun-phrase boundaries in resume prose
/// ("experienced in machine learning and docker" -> "experienced",
/// "machine learning", "docker").
pub fn tag(lowered: &str) -> Tagged {
    let mut tagged = Tagged::default();
    let mut current: Vec<String> = Vec::new();

    for raw in lowered.split_whitespace() {
        for (i, piece) in raw.split(is_hard_break).enumerate() {
            if i > 0 {
                flush(&mut current, &mut tagged.chunks);
            }
            let ends_sentence = piece.ends_with(['.', '!', '?']);
            let word = clean_token(piece);
            if !word.is_empty() {
                tagged.tokens.push(word.to_string());
                if FUNCTION_WORDS.contains(word) {
                    flush(&mut current, &mut tagged.chunks);
                } else {
                    current.push(word.to_string());
                }
            }
            if ends_sentence {
                flush(&mut current, &mut tagged.chunks);
            }
        }
    }
    flush(&mut current, &mut tagged.chunks);
    tagged
}

fn flush(current: &mut Vec<String>, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(current.join(" "));
        current.clear();
    }
}

fn is_hard_break(c: char) -> bool {
    matches!(
        c,
        ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '/' | '•' | '·'
    )
}

/// Strips wrapping punctuation but keeps `+`, `#` and inner dots, so `c++`,
/// `c#` and `node.js` survive intact.
fn clean_token(piece: &str) -> &str {
    piece
        .trim_start_matches(['"', '\'', '`', '*', '-', '<'])
        .trim_end_matches(['.', '!', '?', '"', '\'', '`', '*', '-', '>'])
}
