use botify_core::RequestedInfo;

use crate::records::Product;

const NO_STOCK_INFO: &str = "Aucune information de stock disponible.";

/// Format a product record into the human-readable block handed to the
/// completion API as grounding data. The output is prose for the model, not
/// a machine format. `_requested` is the classifier's attribute hint; the
/// full record is emitted regardless so the model can answer follow-ups.
pub fn product_summary(product: &Product, _requested: Option<RequestedInfo>) -> String {
    let option_names = product.named_options();

    if product.variants.is_empty() {
        return NO_STOCK_INFO.to_string();
    }

    let title = &product.title;
    let description = product.body_html.trim();

    if product.variants.len() == 1 && option_names.is_empty() {
        let variant = &product.variants[0];
        return format!(
            "📦 *Produit:* {title}\n\
             🧾 *Description:* {description}\n\
             💰 *Prix:* ${price}\n\
             📦 *Stock:* {stock} en stock",
            price = variant.price,
            stock = variant.inventory_quantity,
        );
    }

    let option_lines = option_names
        .iter()
        .enumerate()
        .map(|(index, name)| format!("- Option {}: {name}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let variant_lines = product
        .variants
        .iter()
        .map(|variant| {
            let details = option_names
                .iter()
                .enumerate()
                .filter_map(|(index, name)| {
                    variant.option_value(index).map(|value| format!("{name}: {value}"))
                })
                .collect::<Vec<_>>()
                .join(" | ");
            format!(
                "- {details} | Price: ${price} | Stock: {stock}",
                price = variant.price,
                stock = variant.inventory_quantity,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📦 *Produit:* {title}\n\
         🧾 *Description:* {description}\n\
         🧩 *Variant Attributes:*\n\
         {option_lines}\n\
         🔢 *Variant Details:*\n\
         {variant_lines}"
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use crate::records::{Product, ProductOption, ProductVariant};

    use super::{product_summary, NO_STOCK_INFO};

    fn single_variant_product() -> Product {
        Product {
            title: "Chaise Rouge".to_string(),
            body_html: "Une chaise confortable.".to_string(),
            options: vec![ProductOption { name: "Title".to_string() }],
            variants: vec![ProductVariant {
                price: "49.99".to_string(),
                inventory_quantity: 3,
                option1: Some("Default Title".to_string()),
                ..ProductVariant::default()
            }],
        }
    }

    fn multi_variant_product() -> Product {
        Product {
            title: "T-Shirt Logo".to_string(),
            body_html: "Coton bio.".to_string(),
            options: vec![
                ProductOption { name: "Couleur".to_string() },
                ProductOption { name: "Taille".to_string() },
            ],
            variants: vec![
                ProductVariant {
                    price: "19.99".to_string(),
                    inventory_quantity: 12,
                    option1: Some("Noir".to_string()),
                    option2: Some("M".to_string()),
                    option3: None,
                },
                ProductVariant {
                    price: "21.99".to_string(),
                    inventory_quantity: 0,
                    option1: Some("Blanc".to_string()),
                    option2: Some("L".to_string()),
                    option3: None,
                },
            ],
        }
    }

    #[test]
    fn single_variant_uses_the_short_template() {
        let summary = product_summary(&single_variant_product(), None);

        assert!(summary.contains("📦 *Produit:* Chaise Rouge"));
        assert!(summary.contains("💰 *Prix:* $49.99"));
        assert!(summary.contains("📦 *Stock:* 3 en stock"));
        assert!(!summary.contains("Variant Details"));
    }

    #[test]
    fn multi_variant_lists_one_line_per_variant() {
        let summary = product_summary(&multi_variant_product(), None);

        assert!(summary.contains("🧩 *Variant Attributes:*"));
        assert!(summary.contains("- Option 1: Couleur"));
        assert!(summary.contains("- Option 2: Taille"));
        assert!(summary.contains("- Couleur: Noir | Taille: M | Price: $19.99 | Stock: 12"));
        assert!(summary.contains("- Couleur: Blanc | Taille: L | Price: $21.99 | Stock: 0"));
        assert_eq!(summary.matches("Price: $").count(), 2);
    }

    #[test]
    fn named_option_forces_the_variant_template_even_for_one_variant() {
        let mut product = multi_variant_product();
        product.variants.truncate(1);

        let summary = product_summary(&product, None);

        assert!(summary.contains("🔢 *Variant Details:*"));
        assert!(summary.contains("- Couleur: Noir | Taille: M"));
    }

    #[test]
    fn empty_option_values_are_omitted_from_variant_lines() {
        let mut product = multi_variant_product();
        product.variants[0].option2 = Some(String::new());

        let summary = product_summary(&product, None);

        assert!(summary.contains("- Couleur: Noir | Price: $19.99"));
        assert!(!summary.contains("Taille:  |"));
    }

    #[test]
    fn zero_variants_return_the_fixed_sentinel() {
        let product = Product {
            title: "Carte Cadeau".to_string(),
            body_html: "Offrez-la.".to_string(),
            ..Product::default()
        };

        assert_eq!(product_summary(&product, None), NO_STOCK_INFO);
    }
}
