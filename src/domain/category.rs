use std::fmt;

/// Folder a password entry can be filed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Finance,
    Shopping,
    Social,
    Entertainment,
    Work,
    Education,
    Travel,
    Health,
    /// Fallback used whenever no other category applies with enough confidence.
    NoFolder,
}

/// Spelling used by older exports and some model outputs for the sentinel.
const NO_FOLDER_ALIAS: &str = "No Folder";

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Finance,
        Category::Shopping,
        Category::Social,
        Category::Entertainment,
        Category::Work,
        Category::Education,
        Category::Travel,
        Category::Health,
        Category::NoFolder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::Shopping => "Shopping",
            Category::Social => "Social",
            Category::Entertainment => "Entertainment",
            Category::Work => "Work",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Health => "Health",
            Category::NoFolder => "No folder",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Finance => "banking, investments, money management",
            Category::Shopping => "retail, e-commerce, marketplaces",
            Category::Social => "social media, messaging, forums",
            Category::Entertainment => "streaming, games, media",
            Category::Work => "business tools, productivity",
            Category::Education => "learning platforms, academic",
            Category::Travel => "airlines, hotels, booking",
            Category::Health => "medical, fitness, wellness",
            Category::NoFolder => "when no match or insufficient information",
        }
    }

    /// Exact label lookup. Both sentinel spellings resolve to [`Category::NoFolder`].
    pub fn from_label(label: &str) -> Option<Self> {
        if label == NO_FOLDER_ALIAS {
            return Some(Category::NoFolder);
        }
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    pub fn is_sentinel(self) -> bool {
        self == Category::NoFolder
    }

    /// Bullet list of categories for the model prompt, sentinel last.
    pub fn format_for_prompt() -> String {
        Self::ALL
            .into_iter()
            .filter(|category| !category.is_sentinel())
            .chain(std::iter::once(Category::NoFolder))
            .map(|category| format!("- {} ({})", category.label(), category.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
