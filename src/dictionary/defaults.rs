/// A semantic category of word substitutions.
pub struct CategoryTable {
    pub name: &'static str,
    pub entries: &'static [(&'static str, &'static [&'static str])],
}

/// Lookup order for categories; the first category holding a key wins.
pub const CATEGORY_ORDER: &[&str] = &["geographic", "size", "time", "adjective", "directional"];

pub const DEFAULT_CATEGORIES: &[CategoryTable] = &[
    CategoryTable {
        name: "geographic",
        entries: &[
            ("capital", &["largest", "oldest", "second-largest"]),
            ("city", &["town", "village", "province"]),
            ("country", &["province", "region", "territory"]),
            ("island", &["peninsula", "archipelago"]),
            ("river", &["lake", "canal", "stream"]),
            ("mountain", &["hill", "plateau", "volcano"]),
            ("coast", &["border", "valley", "interior"]),
            ("europe", &["asia", "africa"]),
            ("france", &["belgium", "spain", "italy"]),
            ("germany", &["austria", "poland", "denmark"]),
        ],
    },
    CategoryTable {
        name: "size",
        entries: &[
            ("largest", &["smallest", "second-largest", "oldest"]),
            ("smallest", &["largest", "second-smallest"]),
            ("large", &["small", "modest", "vast"]),
            ("small", &["large", "huge", "sizeable"]),
            ("major", &["minor", "secondary"]),
            ("tallest", &["shortest", "oldest"]),
        ],
    },
    CategoryTable {
        name: "time",
        entries: &[
            ("ancient", &["medieval", "modern"]),
            ("medieval", &["ancient", "renaissance"]),
            ("modern", &["medieval", "classical"]),
            ("century", &["decade", "millennium"]),
            ("early", &["late", "mid"]),
            ("first", &["second", "last", "third"]),
            ("oldest", &["newest", "youngest"]),
        ],
    },
    CategoryTable {
        name: "adjective",
        entries: &[
            ("famous", &["obscure", "notorious"]),
            ("popular", &["unpopular", "controversial"]),
            ("important", &["minor", "peripheral"]),
            ("wealthy", &["poor", "modest"]),
            ("successful", &["unsuccessful", "disastrous"]),
        ],
    },
    CategoryTable {
        name: "directional",
        entries: &[
            ("north", &["south", "east", "west"]),
            ("south", &["north", "east", "west"]),
            ("east", &["west", "north", "south"]),
            ("west", &["east", "north", "south"]),
            ("northern", &["southern", "eastern", "western"]),
            ("southern", &["northern", "eastern", "western"]),
            ("eastern", &["western", "northern", "southern"]),
            ("western", &["eastern", "northern", "southern"]),
        ],
    },
];

pub const FALLBACK_SHORT: &[&str] = &["old", "new", "main", "late", "early"];
pub const FALLBACK_MEDIUM: &[&str] = &["former", "second", "minor", "famous", "rival"];
pub const FALLBACK_LONG: &[&str] = &["provincial", "secondary", "historical", "controversial"];

/// Used when no dictionary is available at all.
pub const BUILTIN_FALLBACK: &[&str] = &["major", "minor", "ancient", "northern", "famous"];

/// `(min, max)` fractional change for quantities above 1000.
pub const SMALL_CHANGE_PERCENT: (f64, f64) = (0.15, 0.25);
/// `(min, max)` fractional change for quantities up to 1000.
pub const MEDIUM_CHANGE_PERCENT: (f64, f64) = (0.20, 0.40);
pub const YEAR_CHANGE_MODERN: (i64, i64) = (1, 10);
pub const YEAR_CHANGE_ANCIENT: (i64, i64) = (5, 50);

/// Words never chosen as lexical candidates.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "after", "also", "an", "and", "are", "as", "at", "be", "been", "before",
    "between", "but", "by", "can", "could", "during", "each", "for", "from", "had", "has",
    "have", "he", "her", "his", "in", "into", "is", "it", "its", "more", "most", "not", "of",
    "on", "one", "or", "other", "over", "she", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "until",
    "upon", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "will",
    "with", "would",
];

pub fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOPWORDS.contains(&lower.as_str())
}
