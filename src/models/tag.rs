// src/models/tag.rs
// DOCUMENTATION: Tag parsing and tag listing responses

use serde::Serialize;
use std::collections::BTreeSet;

use super::ImageResponse;

/// Longest accepted tag name
pub const MAX_TAG_LENGTH: usize = 50;

/// Split free-text tag input into distinct, sorted tag names
/// DOCUMENTATION: Double-quoted groups are taken verbatim. The unquoted
/// remainder is split on commas when it contains one, otherwise on
/// whitespace. Empty names are dropped and duplicates collapse.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    let mut tags = BTreeSet::new();
    let mut unquoted: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        if c == '"' {
            let chunk = std::mem::take(&mut buffer);
            if in_quotes {
                insert_tag(&mut tags, &chunk);
            } else {
                unquoted.push(chunk);
            }
            in_quotes = !in_quotes;
        } else {
            buffer.push(c);
        }
    }

    // an unterminated quote runs to the end of the input
    if in_quotes {
        insert_tag(&mut tags, &buffer);
    } else {
        unquoted.push(buffer);
    }

    let comma_delimited = unquoted.iter().any(|chunk| chunk.contains(','));
    for chunk in &unquoted {
        if comma_delimited {
            chunk.split(',').for_each(|tag| insert_tag(&mut tags, tag));
        } else {
            chunk
                .split_whitespace()
                .for_each(|tag| insert_tag(&mut tags, tag));
        }
    }

    tags.into_iter().collect()
}

fn insert_tag(tags: &mut BTreeSet<String>, raw: &str) {
    let tag = raw.trim();
    if !tag.is_empty() {
        tags.insert(tag.to_string());
    }
}

/// Render tags back into a string that `parse_tag_input` reads identically
pub fn edit_string_for_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| {
            if tag.contains(',') || tag.contains(' ') {
                format!("\"{}\"", tag)
            } else {
                tag.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Images carrying one tag
#[derive(Debug, Clone, Serialize)]
pub struct TagListResponse {
    pub tag: String,
    pub count: usize,
    pub image_list: Vec<ImageResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_input_yields_distinct_trimmed_tags() {
        assert_eq!(
            parse_tag_input("one, tow, three"),
            vec!["one", "three", "tow"]
        );
    }

    #[test]
    fn whitespace_separates_when_no_comma() {
        assert_eq!(parse_tag_input("sea  sky sea"), vec!["sea", "sky"]);
    }

    #[test]
    fn quoted_groups_are_single_tags() {
        assert_eq!(
            parse_tag_input("\"new york\" paris"),
            vec!["new york", "paris"]
        );
        assert_eq!(
            parse_tag_input("\"a, b\", c d"),
            vec!["a, b", "c d"]
        );
        assert_eq!(parse_tag_input("x \"open ended"), vec!["open ended", "x"]);
    }

    #[test]
    fn empty_and_separator_only_input_yield_nothing() {
        assert!(parse_tag_input("").is_empty());
        assert!(parse_tag_input("  ,, ,").is_empty());
        assert!(parse_tag_input("\"\"").is_empty());
    }

    #[test]
    fn edit_string_parses_back_to_same_tags() {
        let tags = parse_tag_input("\"new york\", paris, one");
        let rendered = edit_string_for_tags(&tags);
        assert_eq!(rendered, "\"new york\", one, paris");
        assert_eq!(parse_tag_input(&rendered), tags);
    }
}
