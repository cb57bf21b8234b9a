//! Per-language system instructions for reply generation.

const ENGLISH_PROTOCOL: &str = "You are a Shopify assistant. \
    Only use the product data provided. \
    If the user asks about a variant (like color or size), look for it in the context. \
    Do NOT say you can't find it if it's there. Respond in English.";

const FRENCH_PROTOCOL: &str = "Tu es un assistant pour une boutique Shopify. \
    Utilise uniquement les informations fournies. \
    Si une variante est demandée (comme la couleur ou la taille), cherche cette information dans les données du produit. \
    Ne devine pas et ne dis pas que l'information manque si elle est présente. Réponds en français.";

/// Lookup table keyed by language code. Adding a language means adding a row
/// here; call sites stay untouched.
const PROTOCOLS: &[(&str, &str)] = &[("en", ENGLISH_PROTOCOL), ("fr", FRENCH_PROTOCOL)];

const DEFAULT_PROTOCOL: &str = ENGLISH_PROTOCOL;

pub fn get_protocol(language: &str) -> &'static str {
    PROTOCOLS
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, instruction)| *instruction)
        .unwrap_or(DEFAULT_PROTOCOL)
}

#[cfg(test)]
mod tests {
    use super::get_protocol;

    #[test]
    fn french_gets_the_french_instruction() {
        assert!(get_protocol("fr").starts_with("Tu es un assistant"));
    }

    #[test]
    fn everything_else_collapses_to_english() {
        for language in ["en", "de", "es", "fr-CA", ""] {
            assert!(get_protocol(language).starts_with("You are a Shopify assistant"));
        }
    }
}
