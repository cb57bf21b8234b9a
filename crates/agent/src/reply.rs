use tracing::debug;

use crate::context::ContextAssembler;
use crate::language::detect_language;
use crate::llm::LlmClient;
use crate::protocol::get_protocol;
use crate::runtime::AgentError;

/// Turns one utterance into reply text: detect language, select the matching
/// protocol, assemble context, issue a single completion call.
pub struct ReplyGenerator<L> {
    llm: L,
    assembler: ContextAssembler,
}

impl<L> ReplyGenerator<L>
where
    L: LlmClient,
{
    pub fn new(llm: L, assembler: ContextAssembler) -> Self {
        Self { llm, assembler }
    }

    pub async fn generate(
        &self,
        user_id: &str,
        product_data: Option<&str>,
        user_input: &str,
    ) -> Result<String, AgentError> {
        let language = detect_language(user_input);
        let instruction = get_protocol(language);
        let context = self.assembler.assemble(user_id, product_data).await?;

        debug!(
            event_name = "agent.reply.generate",
            language,
            context_messages = context.len(),
            grounded = product_data.is_some(),
            "generating reply"
        );

        let reply = self.llm.complete(instruction, &context, Some(user_input)).await?;
        Ok(reply)
    }
}
