//! Product detail page.

use tracing::instrument;

use pagesmith_shared::{Product, ProductDetails, ProductHero, ProductPage};

/// Build the product page: a hero block plus every detail except name and price.
#[instrument(skip_all, fields(name = %product.name))]
pub fn build_product_page(product: &Product) -> ProductPage {
    ProductPage {
        product_name: product.name.clone(),
        hero: hero(product),
        details: ProductDetails {
            concentration: product.concentration.clone(),
            skin_types: product.skin_types.clone(),
            key_ingredients: product.key_ingredients.clone(),
            benefits: product.benefits.clone(),
            how_to_use: product.how_to_use.clone(),
            side_effects: product.side_effects.clone(),
        },
    }
}

fn hero(product: &Product) -> ProductHero {
    ProductHero {
        title: product.name.clone(),
        subtitle: format!(
            "{} | For {} skin",
            product.concentration,
            product.skin_types.join(", ")
        ),
        price: product.price.clone(),
    }
}
