//! Placeholder SEO strategy generator
//!
//! Builds a site architecture, internal link plan and content outlines for
//! each row. The content is fabricated: the business type and word counts
//! come from an injected [`RandomSource`], everything else is derived from
//! the row's keyword and geo columns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::row::{Row, PRIMARY_GEO, PRIMARY_KEYWORDS, SECONDARY_GEO, SECONDARY_KEYWORDS, URL};

/// Labels the business type is drawn from
pub const BUSINESS_TYPES: [&str; 5] = [
    "Local Service",
    "E-commerce",
    "SaaS",
    "Content Site",
    "Professional Services",
];

/// Section skeleton shared by every content outline
pub const OUTLINE_SKELETON: [&str; 5] = [
    "Introduction and Overview",
    "Key Benefits and Features",
    "Process and Methodology",
    "Frequently Asked Questions",
    "Contact and Next Steps",
];

/// Inclusive lower bound for generated word counts
pub const WORD_COUNT_MIN: u32 = 800;
/// Exclusive upper bound for generated word counts
pub const WORD_COUNT_MAX: u32 = 1800;

pub const LINK_SOURCE: &str = "Homepage";
pub const NAV_LINK_REASON: &str = "Main navigation link";

/// Source of the generator's randomness
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is never zero
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform value in `low..high`
    fn pick_between(&mut self, low: u32, high: u32) -> u32;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn pick_between(&mut self, low: u32, high: u32) -> u32 {
        self.0.random_range(low..high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Homepage,
    Service,
    Location,
    Blog,
}

/// One planned page of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub keywords: Vec<String>,
}

/// Planned pages grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    pub homepage: Vec<Page>,
    pub service_pages: Vec<Page>,
    pub location_pages: Vec<Page>,
    pub blog_pages: Vec<Page>,
}

impl Architecture {
    /// Categories keyed by their serialized names, in output order
    pub fn categories(&self) -> [(&'static str, &[Page]); 4] {
        [
            ("homepage", &self.homepage),
            ("servicePages", &self.service_pages),
            ("locationPages", &self.location_pages),
            ("blogPages", &self.blog_pages),
        ]
    }

    /// Every page in category order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.homepage
            .iter()
            .chain(&self.service_pages)
            .chain(&self.location_pages)
            .chain(&self.blog_pages)
    }

    pub fn page_count(&self) -> usize {
        self.homepage.len() + self.service_pages.len() + self.location_pages.len() + self.blog_pages.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    pub from: String,
    pub to: String,
    pub anchor: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOutline {
    pub page: String,
    pub url: String,
    pub outline: Vec<String>,
    pub word_count: u32,
    pub target_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

/// The generated strategy for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub business_type: String,
    pub architecture: Architecture,
    pub internal_links: Vec<InternalLink>,
    pub content_outlines: Vec<ContentOutline>,
    pub keywords: KeywordSet,
    pub geo_areas: Vec<String>,
}

/// Generates [`ProcessingResult`]s from rows
pub struct StubGenerator<S> {
    source: S,
}

impl StubGenerator<RngSource<StdRng>> {
    /// Reproducible generator for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource(StdRng::seed_from_u64(seed)))
    }

    /// Generator seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::new(RngSource(StdRng::from_os_rng()))
    }
}

impl<S: RandomSource> StubGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Build the strategy for a single row
    pub fn generate(&mut self, row: &Row) -> ProcessingResult {
        let primary = split_list(row.get(PRIMARY_KEYWORDS));
        let secondary = split_list(row.get(SECONDARY_KEYWORDS));
        let geo_areas = geo_areas(row);

        let architecture = build_architecture(&primary, &secondary, &geo_areas);
        let internal_links = internal_links(&architecture);
        let content_outlines = self.content_outlines(&architecture);
        let business_type = self.business_type().to_string();

        ProcessingResult {
            url: row.get_opt(URL).map(String::from),
            business_type,
            architecture,
            internal_links,
            content_outlines,
            keywords: KeywordSet { primary, secondary },
            geo_areas,
        }
    }

    /// Build strategies for every row, in order
    pub fn generate_all(&mut self, rows: &[Row]) -> Vec<ProcessingResult> {
        rows.iter().map(|row| self.generate(row)).collect()
    }

    /// Draw a business type label
    pub fn business_type(&mut self) -> &'static str {
        BUSINESS_TYPES[self.source.pick_index(BUSINESS_TYPES.len())]
    }

    fn content_outlines(&mut self, architecture: &Architecture) -> Vec<ContentOutline> {
        architecture
            .pages()
            .map(|page| ContentOutline {
                page: page.title.clone(),
                url: page.url.clone(),
                outline: OUTLINE_SKELETON.iter().map(|s| s.to_string()).collect(),
                word_count: self.source.pick_between(WORD_COUNT_MIN, WORD_COUNT_MAX),
                target_keywords: page.keywords.clone(),
            })
            .collect()
    }
}

/// Split a comma-separated cell into trimmed, non-empty entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Primary geo (if any) followed by the secondary geo entries
pub fn geo_areas(row: &Row) -> Vec<String> {
    let mut areas = Vec::new();
    let primary = row.get(PRIMARY_GEO);
    if !primary.is_empty() {
        areas.push(primary.to_string());
    }
    areas.extend(split_list(row.get(SECONDARY_GEO)));
    areas
}

/// Lowercase and replace each whitespace run with `-`
pub fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn build_architecture(primary: &[String], secondary: &[String], geo_areas: &[String]) -> Architecture {
    let lead = primary.first().map(String::as_str);
    let top_keywords: Vec<String> = primary.iter().take(3).cloned().collect();

    let homepage = vec![Page {
        title: format!("{} - Professional Services", lead.unwrap_or("Homepage")),
        url: "/".to_string(),
        page_type: PageType::Homepage,
        keywords: top_keywords.clone(),
    }];

    let service_pages = primary
        .iter()
        .enumerate()
        .map(|(i, keyword)| {
            let mut keywords = vec![keyword.clone()];
            keywords.extend(secondary.iter().skip(i * 2).take(2).cloned());
            Page {
                title: format!("{} Services", keyword),
                url: format!("/{}", slugify(keyword)),
                page_type: PageType::Service,
                keywords,
            }
        })
        .collect();

    let location_pages = geo_areas
        .iter()
        .map(|area| Page {
            title: format!("{} in {}", lead.unwrap_or("Services"), area),
            url: format!("/{}", slugify(area)),
            page_type: PageType::Location,
            keywords: vec![lead.unwrap_or("").to_string(), area.clone()],
        })
        .collect();

    let blog_pages = vec![Page {
        title: format!("Ultimate Guide to {}", lead.unwrap_or("Your Service")),
        url: format!("/blog/guide-to-{}", slugify(lead.unwrap_or("service"))),
        page_type: PageType::Blog,
        keywords: top_keywords,
    }];

    Architecture {
        homepage,
        service_pages,
        location_pages,
        blog_pages,
    }
}

/// One navigation link from the homepage to every other page
pub fn internal_links(architecture: &Architecture) -> Vec<InternalLink> {
    architecture
        .pages()
        .filter(|page| page.page_type != PageType::Homepage)
        .map(|page| InternalLink {
            from: LINK_SOURCE.to_string(),
            to: page.title.clone(),
            anchor: anchor_text(&page.title).to_string(),
            reason: NAV_LINK_REASON.to_string(),
        })
        .collect()
}

/// Title text before the first `" - "` separator
pub fn anchor_text(title: &str) -> &str {
    title.split(" - ").next().unwrap_or(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always answers with the smallest value
    struct LowSource;

    impl RandomSource for LowSource {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }

        fn pick_between(&mut self, low: u32, _high: u32) -> u32 {
            low
        }
    }

    fn plumbing_row() -> Row {
        Row::from_pairs([
            (URL, "https://example-plumbing.com"),
            (PRIMARY_KEYWORDS, "plumbing, emergency plumber, pipe repair"),
            (SECONDARY_KEYWORDS, "water heater, drain cleaning, leak detection"),
            (PRIMARY_GEO, "New York City"),
            (SECONDARY_GEO, "Brooklyn, Queens, Manhattan"),
        ])
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" a, b ,, c ,"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_geo_areas_primary_first() {
        assert_eq!(
            geo_areas(&plumbing_row()),
            vec!["New York City", "Brooklyn", "Queens", "Manhattan"]
        );
        let row = Row::from_pairs([(SECONDARY_GEO, "Austin")]);
        assert_eq!(geo_areas(&row), vec!["Austin"]);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Emergency  Plumber"), "emergency-plumber");
        assert_eq!(slugify("New York City"), "new-york-city");
        assert_eq!(slugify("seo"), "seo");
    }

    #[test]
    fn test_page_counts() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&plumbing_row());

        // 1 homepage + 3 services + 4 locations + 1 blog
        assert_eq!(result.architecture.page_count(), 9);
        assert_eq!(result.architecture.homepage.len(), 1);
        assert_eq!(result.architecture.service_pages.len(), 3);
        assert_eq!(result.architecture.location_pages.len(), 4);
        assert_eq!(result.architecture.blog_pages.len(), 1);
        assert_eq!(result.internal_links.len(), 8);
        assert_eq!(result.content_outlines.len(), 9);
    }

    #[test]
    fn test_page_details() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&plumbing_row());
        let arch = &result.architecture;

        assert_eq!(arch.homepage[0].title, "plumbing - Professional Services");
        assert_eq!(arch.homepage[0].url, "/");
        assert_eq!(arch.homepage[0].keywords, vec!["plumbing", "emergency plumber", "pipe repair"]);

        let service = &arch.service_pages[1];
        assert_eq!(service.title, "emergency plumber Services");
        assert_eq!(service.url, "/emergency-plumber");
        assert_eq!(service.keywords, vec!["emergency plumber", "leak detection"]);
        assert_eq!(arch.service_pages[2].keywords, vec!["pipe repair"]);

        let location = &arch.location_pages[0];
        assert_eq!(location.title, "plumbing in New York City");
        assert_eq!(location.url, "/new-york-city");
        assert_eq!(location.keywords, vec!["plumbing", "New York City"]);

        let blog = &arch.blog_pages[0];
        assert_eq!(blog.title, "Ultimate Guide to plumbing");
        assert_eq!(blog.url, "/blog/guide-to-plumbing");
    }

    #[test]
    fn test_empty_row_uses_fallback_titles() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&Row::new());
        let arch = &result.architecture;

        assert_eq!(result.url, None);
        assert_eq!(arch.page_count(), 2);
        assert_eq!(arch.homepage[0].title, "Homepage - Professional Services");
        assert_eq!(arch.blog_pages[0].title, "Ultimate Guide to Your Service");
        assert_eq!(arch.blog_pages[0].url, "/blog/guide-to-service");
        assert_eq!(result.internal_links.len(), 1);
    }

    #[test]
    fn test_internal_links_from_homepage() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&plumbing_row());

        for link in &result.internal_links {
            assert_eq!(link.from, "Homepage");
            assert_eq!(link.reason, "Main navigation link");
        }
        assert_eq!(result.internal_links[0].to, "plumbing Services");
        assert_eq!(result.internal_links[0].anchor, "plumbing Services");
    }

    #[test]
    fn test_anchor_text_stops_at_separator() {
        assert_eq!(anchor_text("plumbing - Professional Services"), "plumbing");
        assert_eq!(anchor_text("No separator"), "No separator");
    }

    #[test]
    fn test_outlines_follow_pages() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&plumbing_row());

        let titles: Vec<&str> = result.architecture.pages().map(|p| p.title.as_str()).collect();
        let outline_titles: Vec<&str> = result.content_outlines.iter().map(|o| o.page.as_str()).collect();
        assert_eq!(titles, outline_titles);

        for outline in &result.content_outlines {
            assert_eq!(outline.outline, OUTLINE_SKELETON);
            assert_eq!(outline.word_count, WORD_COUNT_MIN);
        }
        assert_eq!(result.business_type, "Local Service");
    }

    #[test]
    fn test_seeded_output_is_in_range_and_reproducible() {
        let row = plumbing_row();
        let first = StubGenerator::seeded(42).generate(&row);
        let second = StubGenerator::seeded(42).generate(&row);
        assert_eq!(first, second);

        assert!(BUSINESS_TYPES.contains(&first.business_type.as_str()));
        for outline in &first.content_outlines {
            assert!((WORD_COUNT_MIN..WORD_COUNT_MAX).contains(&outline.word_count));
        }
    }

    #[test]
    fn test_json_field_names() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&plumbing_row());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["businessType"], "Local Service");
        assert!(value["architecture"]["servicePages"].is_array());
        assert_eq!(value["architecture"]["homepage"][0]["type"], "homepage");
        assert_eq!(value["contentOutlines"][0]["wordCount"], 800);
        assert!(value["contentOutlines"][0]["targetKeywords"].is_array());
        assert_eq!(value["geoAreas"][1], "Brooklyn");
        assert_eq!(value["keywords"]["secondary"][0], "water heater");
    }

    #[test]
    fn test_missing_url_is_omitted_from_json() {
        let mut generator = StubGenerator::new(LowSource);
        let result = generator.generate(&Row::new());
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("url").is_none());
    }
}
