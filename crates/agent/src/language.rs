//! Pattern-based language detection for inbound messages.
//!
//! Only French needs to be told apart from everything else (protocol
//! selection is binary), so this is regex scoring rather than an ML model.

use std::sync::LazyLock;

use regex::Regex;

// Compile patterns once at startup
static FRENCH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"[àâçéèêëîïôùûü]").unwrap(),
        Regex::new(r"(?i)\b(le|la|les|un|une|des|du|de|et|ou|est|sont|je|tu|il|elle|nous|vous)\b")
            .unwrap(),
        Regex::new(r"(?i)\b(bonjour|merci|combien|pourquoi|comment|quand|quel|quelle|produit|commande|livraison|retour|boutique|prix|stock|taille|couleur)\b")
            .unwrap(),
        Regex::new(r"(?i)\b(est-ce que|s'il vous plaît|s'il te plaît|qu'est-ce)\b").unwrap(),
    ]
});

static ENGLISH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(the|a|an|and|or|is|are|do|does|can|could|would|i|you|my|your)\b")
            .unwrap(),
        Regex::new(r"(?i)\b(hello|hi|thanks|please|how|what|when|where|much|many|product|order|delivery|return|shop|price|stock|size|color)\b")
            .unwrap(),
    ]
});

/// Map free text to a language code. Only `fr` is ever distinguished; short
/// or ambiguous text falls back to `en`.
pub fn detect_language(text: &str) -> &'static str {
    let french_score = score(&FRENCH_PATTERNS, text);
    let english_score = score(&ENGLISH_PATTERNS, text);

    if french_score >= 2 && french_score > english_score {
        "fr"
    } else {
        "en"
    }
}

fn score(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|pattern| pattern.find_iter(text).count()).sum()
}
