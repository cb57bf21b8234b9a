use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use botify_catalog::{product_summary, CatalogClient, CatalogError, Order, Product};
use botify_core::{ChatRole, Intent};
use botify_db::repositories::{ConversationRepository, RepositoryError};

use crate::classifier::IntentClassifier;
use crate::context::ContextAssembler;
use crate::llm::{LlmClient, LlmError};
use crate::reply::ReplyGenerator;

const PRODUCT_NOT_FOUND: &str =
    "Je suis désolé, je n'ai pas trouvé ce produit dans notre boutique.";
const ORDER_NOT_FOUND: &str = "Je n'ai pas trouvé de commande associée.";
const DELIVERY_POLICY: &str = "La livraison prend entre 3 et 5 jours ouvrés.";
const RETURN_POLICY: &str = "Les retours sont acceptés sous 30 jours. Les articles doivent \
    être non utilisés et dans leur emballage d'origine.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Seam to the commerce catalog so the dispatcher can be exercised without
/// the real API behind it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn find_product_by_title(&self, name: &str) -> Result<Option<Product>, CatalogError>;
    async fn find_order(
        &self,
        order_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Order>, CatalogError>;
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn find_product_by_title(&self, name: &str) -> Result<Option<Product>, CatalogError> {
        CatalogClient::find_product_by_title(self, name).await
    }

    async fn find_order(
        &self,
        order_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Order>, CatalogError> {
        CatalogClient::find_order(self, order_id, email).await
    }
}

/// The dispatcher: routes one inbound message through classification, the
/// matching intent branch, and reply generation. Both sides of the exchange
/// are persisted on every branch; an error in between leaves the user turn
/// unpaired (accepted data-loss mode, logged by the caller).
pub struct AgentRuntime<L, C> {
    repository: Arc<dyn ConversationRepository>,
    catalog: C,
    classifier: IntentClassifier<L>,
    generator: ReplyGenerator<L>,
}

impl<L, C> AgentRuntime<L, C>
where
    L: LlmClient + Clone,
    C: CatalogSource,
{
    pub fn new(llm: L, catalog: C, repository: Arc<dyn ConversationRepository>) -> Self {
        let assembler = ContextAssembler::new(repository.clone());
        Self {
            repository,
            catalog,
            classifier: IntentClassifier::new(llm.clone()),
            generator: ReplyGenerator::new(llm, assembler),
        }
    }

    pub async fn handle_message(
        &self,
        user_text: &str,
        phone_number: &str,
    ) -> Result<String, AgentError> {
        self.repository.append(phone_number, ChatRole::User, user_text).await?;

        let analysis = self.classifier.classify(user_text).await?;
        info!(
            event_name = "agent.message.classified",
            intent = ?analysis.intent,
            has_product_name = analysis.product_name.is_some(),
            has_order_key = analysis.order_id.is_some() || analysis.email.is_some(),
            "inbound message classified"
        );

        let reply_text = match analysis.intent {
            Intent::ProductInfo => match analysis.product_name.as_deref() {
                Some(product_name) => {
                    match self.catalog.find_product_by_title(product_name).await? {
                        Some(product) => {
                            let product_info = product_summary(&product, analysis.info);
                            self.generator
                                .generate(phone_number, Some(&product_info), user_text)
                                .await?
                        }
                        None => PRODUCT_NOT_FOUND.to_string(),
                    }
                }
                None => PRODUCT_NOT_FOUND.to_string(),
            },
            Intent::OrderStatus => {
                if analysis.order_id.is_none() && analysis.email.is_none() {
                    ORDER_NOT_FOUND.to_string()
                } else {
                    let order = self
                        .catalog
                        .find_order(analysis.order_id.as_deref(), analysis.email.as_deref())
                        .await?;
                    match order {
                        Some(order) => {
                            let status = order.fulfillment_status.as_deref().unwrap_or("unfulfilled");
                            let order_info = format!("Order status: {status}");
                            self.generator
                                .generate(phone_number, Some(&order_info), user_text)
                                .await?
                        }
                        None => ORDER_NOT_FOUND.to_string(),
                    }
                }
            }
            Intent::DeliveryPolicy => DELIVERY_POLICY.to_string(),
            Intent::ReturnPolicy => RETURN_POLICY.to_string(),
            Intent::Generic => self.generator.generate(phone_number, None, user_text).await?,
        };

        self.repository.append(phone_number, ChatRole::Assistant, &reply_text).await?;

        Ok(reply_text)
    }
}
