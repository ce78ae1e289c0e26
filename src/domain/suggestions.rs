//! Keyword suggestions grouped by business category.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionCategory {
    pub name: &'static str,
    pub emoji: &'static str,
    pub keywords: &'static [&'static str],
}

/// Fallback category for keywords matching none of the catalog.
pub const OTHER_CATEGORY: SuggestionCategory = SuggestionCategory {
    name: "Other",
    emoji: "🏢",
    keywords: &[],
};

pub const KEYWORD_SUGGESTIONS: &[SuggestionCategory] = &[
    SuggestionCategory {
        name: "Food & Drink",
        emoji: "🍽️",
        keywords: &[
            "restaurant",
            "café",
            "boulangerie",
            "pizzeria",
            "traiteur",
            "restaurant japonais",
            "restaurant italien",
            "fast-food",
        ],
    },
    SuggestionCategory {
        name: "Beauty & Wellness",
        emoji: "💆",
        keywords: &[
            "coiffeur",
            "salon de beauté",
            "spa",
            "institut de beauté",
            "barbier",
            "massage",
            "onglerie",
            "esthéticienne",
        ],
    },
    SuggestionCategory {
        name: "Retail",
        emoji: "🏪",
        keywords: &[
            "boutique",
            "magasin",
            "épicerie",
            "supermarché",
            "librairie",
            "fleuriste",
            "boucherie",
            "primeur",
        ],
    },
    SuggestionCategory {
        name: "Services",
        emoji: "🛠️",
        keywords: &[
            "garage",
            "plombier",
            "électricien",
            "architecte",
            "avocat",
            "comptable",
            "agent immobilier",
            "assurance",
        ],
    },
    SuggestionCategory {
        name: "Health",
        emoji: "⚕️",
        keywords: &[
            "médecin",
            "dentiste",
            "pharmacie",
            "kinésithérapeute",
            "ostéopathe",
            "vétérinaire",
            "opticien",
            "laboratoire",
        ],
    },
];

/// First category with a catalog keyword contained in `keyword` (case-insensitive).
pub fn category_for(keyword: &str) -> &'static SuggestionCategory {
    let lower = keyword.to_lowercase();
    KEYWORD_SUGGESTIONS
        .iter()
        .find(|cat| cat.keywords.iter().any(|k| lower.contains(&k.to_lowercase())))
        .unwrap_or(&OTHER_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_for("Boulangerie artisanale").name, "Food & Drink");
        assert_eq!(category_for("barbier").emoji, "💆");
        assert_eq!(category_for("cordonnier").name, "Other");
    }

    #[test]
    fn test_first_match_wins() {
        // "restaurant japonais" contains "restaurant", which is listed first.
        assert_eq!(category_for("restaurant japonais").name, "Food & Drink");
    }
}
