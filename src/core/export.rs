//! Export generated strategies as JSON, CSV or Markdown

use miette::Diagnostic;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::core::generator::ProcessingResult;

/// Column order of the flattened CSV export
pub const CSV_HEADERS: [&str; 7] = [
    "website",
    "business_type",
    "page_title",
    "page_url",
    "target_keywords",
    "word_count",
    "content_outline",
];

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("Failed to serialize results: {0}")]
    #[diagnostic(code(seoplan::export::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}", path.display())]
    #[diagnostic(code(seoplan::export::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }

    /// File name used when no output path is given
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "seo_strategy.json",
            ExportFormat::Csv => "seo_content_plan.csv",
            ExportFormat::Markdown => "seo_strategy_report.md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unsupported export format: '{}'. Supported: json, csv, md",
                s
            )),
        }
    }
}

/// Totals for a set of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub sites: usize,
    pub pages: usize,
    pub outlines: usize,
}

pub fn stats(results: &[ProcessingResult]) -> ExportStats {
    ExportStats {
        sites: results.len(),
        pages: results.iter().map(|r| r.architecture.page_count()).sum(),
        outlines: results.iter().map(|r| r.content_outlines.len()).sum(),
    }
}

/// Pretty-printed JSON array of every result
pub fn to_json(results: &[ProcessingResult]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// One CSV line per content outline, or `None` when there are none
pub fn to_csv(results: &[ProcessingResult]) -> Option<String> {
    let mut lines = vec![CSV_HEADERS.join(",")];

    for result in results {
        let website = result.url.as_deref().unwrap_or("");
        for outline in &result.content_outlines {
            let word_count = outline.word_count.to_string();
            let keywords = outline.target_keywords.join(", ");
            let sections = outline.outline.join(" | ");
            let fields = [
                website,
                result.business_type.as_str(),
                outline.page.as_str(),
                outline.url.as_str(),
                keywords.as_str(),
                word_count.as_str(),
                sections.as_str(),
            ];
            lines.push(
                fields
                    .iter()
                    .map(|f| escape_csv(f))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
    }

    if lines.len() == 1 {
        return None;
    }
    Some(lines.join("\n"))
}

/// Human-readable report with one section per site
pub fn to_markdown(results: &[ProcessingResult]) -> String {
    let mut md = String::new();
    md.push_str("# SEO Strategy Report\n\n");

    for result in results {
        md.push_str(&format!("## {}\n", result.url.as_deref().unwrap_or("")));
        md.push_str(&format!("**Business Type:** {}\n\n", result.business_type));

        md.push_str("### Site Architecture\n");
        for (category, pages) in result.architecture.categories() {
            md.push_str(&format!("**{}:**\n", capitalize(category)));
            for page in pages {
                md.push_str(&format!("- {} ({})\n", page.title, page.url));
            }
            md.push('\n');
        }

        md.push_str("### Content Outlines\n");
        for outline in &result.content_outlines {
            let keywords = outline.target_keywords.join(", ");
            md.push_str(&format!("**{}**\n", outline.page));
            md.push_str(&format!("- URL: {}\n", outline.url));
            md.push_str(&format!("- Target Keywords: {}\n", keywords));
            md.push_str(&format!("- Word Count: {}\n", outline.word_count));
            md.push_str("- Outline:\n");
            for item in &outline.outline {
                md.push_str(&format!("  - {}\n", item));
            }
            md.push('\n');
        }
        md.push_str("---\n\n");
    }

    md
}

/// Render in the requested format; `None` means there was nothing to export
pub fn render(results: &[ProcessingResult], format: ExportFormat) -> Result<Option<String>, ExportError> {
    match format {
        ExportFormat::Json => to_json(results).map(Some),
        ExportFormat::Csv => Ok(to_csv(results)),
        ExportFormat::Markdown => Ok(Some(to_markdown(results))),
    }
}

/// Write an export to `path`; returns `false` when there was nothing to write
pub fn write_export(
    results: &[ProcessingResult],
    format: ExportFormat,
    path: &Path,
) -> Result<bool, ExportError> {
    let Some(content) = render(results, format)? else {
        tracing::warn!(%format, "nothing to export");
        return Ok(false);
    };

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    tracing::info!(%format, path = %path.display(), bytes = content.len(), "export written");
    Ok(true)
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}
