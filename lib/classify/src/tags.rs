//! Tags implied by a workflow's filename.

/// Case-sensitive filename keywords and the tag each implies.
const FILENAME_TAGS: &[(&[&str], &str)] = &[
    (&["Scheduled"], "scheduled"),
    (&["Triggered"], "triggered"),
    (&["Manual"], "manual"),
    (&["Webhook"], "webhook"),
    (&["Automate", "Automation"], "automation"),
    (&["Monitor"], "monitoring"),
    (&["Create"], "creation"),
    (&["Update"], "update"),
    (&["Send"], "notification"),
    (&["Import"], "import"),
    (&["Export"], "export"),
    (&["Process"], "processing"),
    (&["Sync"], "sync"),
];

/// Extracts tags from a filename by keyword presence, in table order.
#[must_use]
pub fn extract_tags_from_filename(filename: &str) -> Vec<String> {
    let stem = filename.strip_suffix(".json").unwrap_or(filename);
    FILENAME_TAGS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| stem.contains(k)))
        .map(|(_, tag)| (*tag).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_send_report() {
        let tags = extract_tags_from_filename("42_Scheduled_Send_Report.json");
        assert!(tags.contains(&"scheduled".to_string()));
        assert!(tags.contains(&"notification".to_string()));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn automation_keyword_variants_yield_one_tag() {
        let tags = extract_tags_from_filename("Automate_Automation_Export.json");
        assert_eq!(tags, vec!["automation", "export"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(extract_tags_from_filename("scheduled_send.json").is_empty());
    }

    #[test]
    fn empty_filename() {
        assert!(extract_tags_from_filename("").is_empty());
    }
}
