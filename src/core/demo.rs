//! Built-in demo records, usable without a CSV file

use crate::core::row::{Row, KNOWN_COLUMNS, PRIMARY_GEO, PRIMARY_KEYWORDS, SECONDARY_GEO, SECONDARY_KEYWORDS, URL};

/// Header for the demo data set: the known columns
pub fn demo_headers() -> Vec<String> {
    KNOWN_COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn demo_rows() -> Vec<Row> {
    vec![
        Row::from_pairs([
            (URL, "https://example-plumbing.com"),
            (PRIMARY_KEYWORDS, "plumbing, emergency plumber, pipe repair"),
            (SECONDARY_KEYWORDS, "water heater, drain cleaning, leak detection"),
            (PRIMARY_GEO, "New York City"),
            (SECONDARY_GEO, "Brooklyn, Queens, Manhattan"),
        ]),
        Row::from_pairs([
            (URL, "https://dentist-example.com"),
            (PRIMARY_KEYWORDS, "dentist, dental care, teeth cleaning"),
            (SECONDARY_KEYWORDS, "orthodontics, dental implants, whitening"),
            (PRIMARY_GEO, "Los Angeles"),
            (SECONDARY_GEO, "Beverly Hills, Santa Monica"),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_rows_have_every_known_column() {
        let rows = demo_rows();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            for column in KNOWN_COLUMNS {
                assert!(!row.get(column).is_empty(), "missing {}", column);
            }
        }
    }
}
