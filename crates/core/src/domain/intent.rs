use serde::{Deserialize, Serialize};

/// Classified purpose of an inbound message. The set is fixed; anything the
/// classifier cannot place lands on `Generic`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ProductInfo,
    OrderStatus,
    DeliveryPolicy,
    ReturnPolicy,
    #[default]
    Generic,
}

impl Intent {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "product_info" => Some(Self::ProductInfo),
            "order_status" => Some(Self::OrderStatus),
            "delivery_policy" => Some(Self::DeliveryPolicy),
            "return_policy" => Some(Self::ReturnPolicy),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }
}

/// Which product attribute the user asked about. Currently a hint only: the
/// summary formatter emits the full record either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedInfo {
    Price,
    Variants,
    Stock,
    StockByVariant,
    Color,
    Size,
}

impl RequestedInfo {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(Self::Price),
            "variants" => Some(Self::Variants),
            "stock" => Some(Self::Stock),
            "stock_by_variant" => Some(Self::StockByVariant),
            "color" => Some(Self::Color),
            "size" => Some(Self::Size),
            _ => None,
        }
    }
}

/// Result of one classification pass. Produced per request and consumed
/// immediately by the dispatcher; never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentAnalysis {
    pub intent: Intent,
    pub product_name: Option<String>,
    pub order_id: Option<String>,
    pub email: Option<String>,
    pub info: Option<RequestedInfo>,
}
