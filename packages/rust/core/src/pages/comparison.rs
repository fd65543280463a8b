//! Comparison page against a fixed competitor product.

use tracing::instrument;

use pagesmith_shared::{
    ComparisonPage, ComparisonPoint, ComparisonProducts, ComparisonSummary, Product,
};

/// The compared aspects, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonAspect {
    Concentration,
    SkinTypeTarget,
    KeyIngredients,
    Benefits,
    Price,
}

impl ComparisonAspect {
    pub const ALL: [ComparisonAspect; 5] = [
        Self::Concentration,
        Self::SkinTypeTarget,
        Self::KeyIngredients,
        Self::Benefits,
        Self::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Concentration => "Concentration",
            Self::SkinTypeTarget => "Skin Type Target",
            Self::KeyIngredients => "Key Ingredients",
            Self::Benefits => "Benefits",
            Self::Price => "Price",
        }
    }

    /// Display value of this aspect; lists are joined with `", "`.
    pub fn value_of(&self, summary: &ComparisonSummary) -> String {
        match self {
            Self::Concentration => summary.concentration.clone(),
            Self::SkinTypeTarget => summary.skin_types.join(", "),
            Self::KeyIngredients => summary.key_ingredients.join(", "),
            Self::Benefits => summary.benefits.join(", "),
            Self::Price => summary.price.clone(),
        }
    }
}

/// The synthetic product every page is compared against.
pub fn competitor() -> Product {
    Product {
        name: "RadiantShield Brightening Serum".into(),
        concentration: "5% Vitamin C".into(),
        skin_types: vec!["Dry".into(), "Normal".into()],
        key_ingredients: vec!["Vitamin C".into(), "Niacinamide".into()],
        benefits: vec!["Brightening".into(), "Helps with uneven skin tone".into()],
        how_to_use: "Apply 2–3 drops in the evening on clean skin before moisturizer.".into(),
        side_effects: "Mild tingling may occur on first use.".into(),
        price: "₹799".into(),
    }
}

/// Build the comparison page for `product` against [`competitor`].
#[instrument(skip_all, fields(name = %product.name))]
pub fn build_comparison_page(product: &Product) -> ComparisonPage {
    let a = ComparisonSummary::from(product);
    let b = ComparisonSummary::from(&competitor());

    let comparison_points = ComparisonAspect::ALL
        .iter()
        .map(|aspect| ComparisonPoint {
            aspect: aspect.label().to_string(),
            product_a: aspect.value_of(&a),
            product_b: aspect.value_of(&b),
        })
        .collect();

    ComparisonPage {
        title: format!("{} vs {}", a.name, b.name),
        products: ComparisonProducts { a, b },
        comparison_points,
    }
}
