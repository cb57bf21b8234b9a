use serde::Deserialize;

/// Shopify product as returned by `products.json`. Externally owned; fetched
/// read-only and never written back.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProductOption {
    #[serde(default)]
    pub name: String,
}

/// One purchasable SKU. `option1..option3` positionally match the product's
/// option names; Shopify leaves unused slots null.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProductVariant {
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}

impl Product {
    /// Option names minus the degenerate "Title" placeholder Shopify adds to
    /// products sold without real options.
    pub fn named_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|option| option.name.as_str())
            .filter(|name| !name.eq_ignore_ascii_case("title"))
            .collect()
    }
}

impl ProductVariant {
    pub fn option_value(&self, index: usize) -> Option<&str> {
        let slot = match index {
            0 => self.option1.as_deref(),
            1 => self.option2.as_deref(),
            2 => self.option3.as_deref(),
            _ => None,
        };
        slot.filter(|value| !value.is_empty())
    }
}

/// Shopify order as returned by `orders.json`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<Order>,
}
