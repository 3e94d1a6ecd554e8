//! Table formatting for the preview and result views
//!
//! Tables are built with `tabled`; the interactive wizard and the
//! `preview` command share these renderers.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{category_label, keywords_preview, outline_preview, truncate_str};
use crate::core::generator::ProcessingResult;
use crate::core::row::{PRIMARY_GEO, PRIMARY_KEYWORDS, URL};
use crate::core::store::SortDirection;
use crate::core::wizard::Wizard;

/// Configuration for the preview table
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum characters per cell before truncation
    pub max_width: usize,
    /// Show every source column instead of the summary columns
    pub all_columns: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_width: 40,
            all_columns: false,
        }
    }
}

/// Columns of the summary preview: (column key, header label)
const PREVIEW_COLUMNS: [(&str, &str); 3] = [
    (URL, "URL"),
    (PRIMARY_KEYWORDS, "Primary Keywords"),
    (PRIMARY_GEO, "Primary Geo"),
];

/// Render the wizard's current view with selection marks
pub fn preview_table(wizard: &Wizard, config: &TableConfig) -> String {
    let store = wizard.store();

    let columns: Vec<(String, String)> = if config.all_columns && !store.headers().is_empty() {
        store
            .headers()
            .iter()
            .map(|h| (h.clone(), h.clone()))
            .collect()
    } else {
        PREVIEW_COLUMNS
            .iter()
            .map(|(key, label)| (key.to_string(), label.to_string()))
            .collect()
    };

    let sort = store.sort();
    let mut header = vec!["#".to_string(), "✓".to_string()];
    for (key, label) in &columns {
        let marker = match sort {
            Some(s) if s.key == *key => match s.direction {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            },
            _ => "",
        };
        header.push(format!("{}{}", label, marker));
    }

    let mut builder = Builder::default();
    builder.push_record(header);

    for (position, row) in store.rows().enumerate() {
        let mut record = vec![
            (position + 1).to_string(),
            (if wizard.is_selected(position) { "✓" } else { "" }).to_string(),
        ];
        for (key, _) in &columns {
            record.push(truncate_str(row.get(key), config.max_width));
        }
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// One line per site: business type and page/link/outline counts
pub fn results_table(results: &[ProcessingResult]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Website", "Business Type", "Pages", "Internal Links", "Content Outlines"]);

    for (i, result) in results.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            result.url.clone().unwrap_or_default(),
            result.business_type.clone(),
            result.architecture.page_count().to_string(),
            result.internal_links.len().to_string(),
            result.content_outlines.len().to_string(),
        ]);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Every planned page of one site
pub fn pages_table(result: &ProcessingResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Page Title", "URL", "Category", "Target Keywords"]);

    for (category, pages) in result.architecture.categories() {
        for page in pages {
            builder.push_record([
                page.title.clone(),
                page.url.clone(),
                category_label(category),
                keywords_preview(&page.keywords),
            ]);
        }
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Content outlines of one site
pub fn outlines_table(result: &ProcessingResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Content Title", "URL", "Word Count", "Outline Preview"]);

    for outline in &result.content_outlines {
        builder.push_record([
            outline.page.clone(),
            outline.url.clone(),
            format!("{} words", outline.word_count),
            outline_preview(&outline.outline),
        ]);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Internal link plan of one site
pub fn links_table(result: &ProcessingResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(["From Page", "To Page", "Anchor Text", "Link Reason"]);

    for link in &result.internal_links {
        builder.push_record([
            link.from.clone(),
            link.to.clone(),
            link.anchor.clone(),
            link.reason.clone(),
        ]);
    }

    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::StubGenerator;

    fn preview_wizard() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.load_demo().unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_preview_table_lists_rows() {
        let mut wizard = preview_wizard();
        wizard.toggle(1).unwrap();

        let table = preview_table(&wizard, &TableConfig::default());
        assert!(table.contains("https://example-plumbing.com"));
        assert!(table.contains("https://dentist-example.com"));
        assert!(table.contains("New York City"));
        assert_eq!(table.matches('✓').count(), 2); // header + one selected row
    }

    #[test]
    fn test_preview_table_marks_sort_column() {
        let mut wizard = preview_wizard();
        wizard.apply_sort(URL).unwrap();
        assert!(preview_table(&wizard, &TableConfig::default()).contains("URL ▲"));

        wizard.apply_sort(URL).unwrap();
        assert!(preview_table(&wizard, &TableConfig::default()).contains("URL ▼"));
    }

    #[test]
    fn test_preview_table_all_columns() {
        let wizard = preview_wizard();
        let config = TableConfig {
            all_columns: true,
            ..TableConfig::default()
        };
        let table = preview_table(&wizard, &config);
        assert!(table.contains("secondary_geo"));
        assert!(table.contains("Brooklyn, Queens, Manhattan"));
    }

    #[test]
    fn test_result_tables() {
        let results = StubGenerator::seeded(5).generate_all(&crate::core::demo::demo_rows());

        let summary = results_table(&results);
        assert!(summary.contains("https://dentist-example.com"));
        assert_eq!(summary.lines().filter(|l| l.contains("https://")).count(), 2);

        let pages = pages_table(&results[0]);
        assert!(pages.contains("Ultimate Guide to plumbing"));
        assert!(pages.contains("Location"));

        let outlines = outlines_table(&results[0]);
        assert!(outlines.contains("words"));
        assert!(outlines.contains("(+3 more)"));

        let links = links_table(&results[0]);
        assert!(links.contains("Main navigation link"));
    }
}
