use crate::domain::model::{Recommendation, Requirement};

struct Entry {
    site_type: &'static str,
    suggested_theme: &'static str,
    features: &'static [&'static str],
    reason: &'static str,
}

impl Entry {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            suggested_theme: self.suggested_theme.to_string(),
            features: self.features.iter().map(|f| f.to_string()).collect(),
            reason: self.reason.to_string(),
        }
    }
}

const FALLBACK: Entry = Entry {
    site_type: "blog",
    suggested_theme: "astro-paper",
    features: &["Markdown/MDX support", "Tags", "Categories", "RSS feed"],
    reason: "Clean blog design with excellent typography",
};

// 鍵一律小寫；查不到時回落到 blog
const RECOMMENDATIONS: &[Entry] = &[
    FALLBACK,
    Entry {
        site_type: "portfolio",
        suggested_theme: "astro-portfolio",
        features: &["Project showcase", "About section", "Contact form"],
        reason: "Professional portfolio layout with smooth animations",
    },
    Entry {
        site_type: "documentation",
        suggested_theme: "starlight",
        features: &["Search", "Sidebar navigation", "Dark mode", "i18n"],
        reason: "Official Astro docs framework, highly optimized",
    },
    Entry {
        site_type: "ecommerce",
        suggested_theme: "astro-ecommerce",
        features: &["Product listings", "Cart", "Checkout", "Payment integration"],
        reason: "Full-featured ecommerce setup",
    },
    Entry {
        site_type: "landing",
        suggested_theme: "astro-landing",
        features: &["Hero section", "Features", "CTA", "Contact form"],
        reason: "Conversion-optimized landing page",
    },
];

/// Picks a theme for the requested site type. Never fails: unknown types get the blog entry.
pub fn suggest_theme(requirement: &Requirement) -> Recommendation {
    let key = requirement.site_type.to_lowercase();
    let entry = RECOMMENDATIONS
        .iter()
        .find(|entry| entry.site_type == key)
        .unwrap_or(&FALLBACK);

    tracing::debug!(
        "Recommendation for site type '{}': {}",
        requirement.site_type,
        entry.suggested_theme
    );

    entry.to_recommendation()
}

pub fn supported_site_types() -> Vec<&'static str> {
    RECOMMENDATIONS.iter().map(|entry| entry.site_type).collect()
}
