use std::time::Duration;

pub const UPSTREAM_URL: &str = "https://at.agromarket.kr/domeinfo/sanRealtime.do";

/// Upstream category codes. 13/26 is the paprika family; the small code picks
/// the colour (02: yellow, 03: red, ...). An empty small code returns all of them.
pub const LARGE_CD: &str = "13";
pub const MID_CD: &str = "26";
pub const PAGE_SIZE: u32 = 1000;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Variety used when a row carries no variety of its own.
pub const DEFAULT_VARIETY: &str = "파프리카";

/// Group key for origin view when a row has no origin.
pub const UNKNOWN_ORIGIN: &str = "기타";

/// Crops offered on the landing page, as `(slug, display name)`.
pub const CROPS: &[(&str, &str)] = &[
    ("paprica", "파프리카"),
    ("strawberry", "딸기"),
    ("tomato", "토마토"),
    ("cucumber", "오이"),
    ("pepper", "고추"),
];

/// Paprika varieties as reported upstream, with their short filter labels.
pub const VARIETIES: &[(&str, &str)] = &[
    ("빨강파프리카", "빨강"),
    ("노랑파프리카", "노랑"),
    ("오렌지파프리카", "오렌지"),
    ("파프리카(일반)", "일반"),
    ("파프리카", "기타"),
];

/// Display name for a crop slug, falling back to the slug itself.
pub fn crop_name(slug: &str) -> &str {
    CROPS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, name)| *name)
        .unwrap_or(slug)
}

/// Resolve free-text search input to a crop slug.
///
/// Matches the Korean display name exactly or the slug case-insensitively.
/// Unknown input is returned trimmed so callers can still route on it; blank
/// input yields `None`.
pub fn resolve_crop(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    let slug = CROPS
        .iter()
        .find(|(slug, name)| *name == trimmed || *slug == lower)
        .map(|(slug, _)| slug.to_string())
        .unwrap_or_else(|| trimmed.to_string());
    Some(slug)
}

/// Short filter label for a variety; unknown varieties share the generic label.
pub fn variety_label(variety: &str) -> &'static str {
    VARIETIES
        .iter()
        .find(|(v, _)| *v == variety)
        .map(|(_, label)| *label)
        .unwrap_or("기타")
}
