use botify_core::{Intent, IntentAnalysis, RequestedInfo};

use crate::llm::{LlmClient, LlmError};

/// Fixed instruction for the single-shot extraction call. The utterance goes
/// out as the bare user message with no prior context.
const EXTRACTION_INSTRUCTION: &str = "Extract structured entities from customer messages.";

/// Sends the utterance to the completion API and parses the semi-structured
/// answer into a typed record.
pub struct IntentClassifier<L> {
    llm: L,
}

impl<L> IntentClassifier<L>
where
    L: LlmClient,
{
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    pub async fn classify(&self, user_message: &str) -> Result<IntentAnalysis, LlmError> {
        let content = self.llm.complete(EXTRACTION_INSTRUCTION, &[], Some(user_message)).await?;
        Ok(parse_analysis(&content))
    }
}

/// Best-effort line parser for the extraction response. Each recognized
/// `key: value` line overwrites the matching field of the default record;
/// everything else is ignored. Malformed prose therefore degrades to the
/// all-default analysis instead of failing. Kept as the single entry point
/// so a structured-output contract can replace it without touching callers.
pub fn parse_analysis(content: &str) -> IntentAnalysis {
    let mut analysis = IntentAnalysis::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim() {
            "intent" => {
                if let Some(intent) = Intent::parse(value) {
                    analysis.intent = intent;
                }
            }
            "product_name" => analysis.product_name = Some(value.to_string()),
            "order_id" => analysis.order_id = Some(value.to_string()),
            "email" => analysis.email = Some(value.to_string()),
            "info" => analysis.info = RequestedInfo::parse(value),
            _ => {}
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use botify_core::{Intent, IntentAnalysis, RequestedInfo};

    use super::parse_analysis;

    #[test]
    fn parses_a_fully_populated_response() {
        let analysis = parse_analysis(
            "intent: product_info\n\
             product_name: Chaise Rouge\n\
             order_id: #1042\n\
             email: client@example.com\n\
             info: price",
        );

        assert_eq!(analysis.intent, Intent::ProductInfo);
        assert_eq!(analysis.product_name.as_deref(), Some("Chaise Rouge"));
        assert_eq!(analysis.order_id.as_deref(), Some("#1042"));
        assert_eq!(analysis.email.as_deref(), Some("client@example.com"));
        assert_eq!(analysis.info, Some(RequestedInfo::Price));
    }

    #[test]
    fn prose_without_recognizable_lines_yields_the_default_record() {
        let analysis = parse_analysis(
            "The customer seems to be asking about something, \
             but I could not tell what exactly.",
        );

        assert_eq!(analysis, IntentAnalysis::default());
    }

    #[test]
    fn unknown_intent_tokens_keep_the_generic_default() {
        let analysis = parse_analysis("intent: refund_request\nproduct_name: Chaise Rouge");

        assert_eq!(analysis.intent, Intent::Generic);
        assert_eq!(analysis.product_name.as_deref(), Some("Chaise Rouge"));
    }

    #[test]
    fn unrecognized_keys_and_empty_values_are_ignored() {
        let analysis = parse_analysis(
            "intent: order_status\n\
             confidence: high\n\
             order_id:\n\
             email: client@example.com",
        );

        assert_eq!(analysis.intent, Intent::OrderStatus);
        assert!(analysis.order_id.is_none());
        assert_eq!(analysis.email.as_deref(), Some("client@example.com"));
    }

    #[test]
    fn surrounding_chatter_does_not_leak_into_fields() {
        let analysis = parse_analysis(
            "Here is what I extracted:\n\
             intent: delivery_policy\n\
             Hope that helps!",
        );

        assert_eq!(analysis.intent, Intent::DeliveryPolicy);
        assert!(analysis.product_name.is_none());
    }
}
