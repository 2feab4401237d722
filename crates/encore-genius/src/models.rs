// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};

/// Search response from `/search` (`response.hits`).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub response: SearchResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// A single search hit. Only the primary artist is of interest here.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub result: HitResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitResult {
    pub primary_artist: PrimaryArtist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryArtist {
    pub id: u64,
    pub name: String,
}

/// Artist lookup response from `/artists/{id}` (`response.artist`).
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistResponse {
    pub response: ArtistPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistPayload {
    /// Absent when the payload carries no artist object.
    #[serde(default)]
    pub artist: Option<Artist>,
}

/// Full artist record.
///
/// Missing subfields fall back to placeholders instead of failing
/// deserialization: id 0, name "N/A", followers 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    #[serde(default)]
    pub id: u64,
    #[serde(default = "placeholder_name")]
    pub name: String,
    #[serde(default)]
    pub followers_count: u64,
}

fn placeholder_name() -> String {
    "N/A".to_string()
}

/// One output row per query term. Artist fields are `Some` only when both
/// the search and the artist fetch succeeded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LookupRow {
    pub search_term: String,
    pub artist_name: Option<String>,
    pub artist_id: Option<u64>,
    pub followers_count: Option<u64>,
}

impl LookupRow {
    /// Row for a term that could not be resolved.
    pub fn unresolved(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            artist_name: None,
            artist_id: None,
            followers_count: None,
        }
    }

    /// Row for a fully resolved term.
    pub fn resolved(search_term: impl Into<String>, artist: &Artist) -> Self {
        Self {
            search_term: search_term.into(),
            artist_name: Some(artist.name.clone()),
            artist_id: Some(artist.id),
            followers_count: Some(artist.followers_count),
        }
    }
}

/// Ordered batch lookup result, one row per input term.
///
/// The row count always equals the input count; unresolved terms keep their
/// row with empty artist fields.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct LookupTable {
    rows: Vec<LookupRow>,
}

impl LookupTable {
    pub fn push(&mut self, row: LookupRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[LookupRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookupRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a LookupRow;
    type IntoIter = std::slice::Iter<'a, LookupRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

const TABLE_HEADERS: [&str; 4] = ["search_term", "artist_name", "artist_id", "followers_count"];

impl fmt::Display for LookupTable {
    /// Plain-text table with aligned columns; absent values render as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.search_term.clone(),
                    row.artist_name.clone().unwrap_or_else(|| "-".to_string()),
                    row.artist_id
                        .map_or_else(|| "-".to_string(), |id| id.to_string()),
                    row.followers_count
                        .map_or_else(|| "-".to_string(), |count| count.to_string()),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.len());
            }
        }

        write_row(f, TABLE_HEADERS, widths)?;
        for row in &rows {
            write_row(f, row.each_ref().map(String::as_str), widths)?;
        }

        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: [&str; 4], widths: [usize; 4]) -> fmt::Result {
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            write!(f, "  ")?;
        }
        if index + 1 == cells.len() {
            // Last column stays unpadded to avoid trailing whitespace.
            write!(f, "{cell}")?;
        } else {
            write!(f, "{cell:<width$}")?;
        }
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drake() -> Artist {
        Artist {
            id: 130,
            name: "Drake".to_string(),
            followers_count: 5_000_000,
        }
    }

    #[test]
    fn test_artist_defaults_for_missing_subfields() {
        let artist: Artist = serde_json::from_str("{}").unwrap();
        assert_eq!(artist.id, 0);
        assert_eq!(artist.name, "N/A");
        assert_eq!(artist.followers_count, 0);
    }

    #[test]
    fn test_resolved_row_copies_artist_fields() {
        let row = LookupRow::resolved("Drake", &drake());
        assert_eq!(row.search_term, "Drake");
        assert_eq!(row.artist_name.as_deref(), Some("Drake"));
        assert_eq!(row.artist_id, Some(130));
        assert_eq!(row.followers_count, Some(5_000_000));
    }

    #[test]
    fn test_unresolved_row_has_no_artist_fields() {
        let row = LookupRow::unresolved("Nobody");
        assert_eq!(row.search_term, "Nobody");
        assert!(row.artist_name.is_none());
        assert!(row.artist_id.is_none());
        assert!(row.followers_count.is_none());
    }

    #[test]
    fn test_table_display_aligns_columns() {
        let mut table = LookupTable::default();
        table.push(LookupRow::resolved("Drake", &drake()));
        table.push(LookupRow::unresolved("Nobody"));

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("search_term"));
        assert!(lines[1].contains("Drake"));
        assert!(lines[1].contains("5000000"));
        assert!(lines[2].starts_with("Nobody"));
        assert!(lines[2].trim_end().ends_with('-'));
    }

    #[test]
    fn test_table_serializes_as_row_array() {
        let mut table = LookupTable::default();
        table.push(LookupRow::resolved("Drake", &drake()));

        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["search_term"], "Drake");
        assert_eq!(json[0]["followers_count"], 5_000_000);
    }
}
