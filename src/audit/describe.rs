//! Human-readable descriptions for the activity log
//!
//! Turns entities into short labels and change sets into one-line summaries
//! such as `" | Changes: status: pending → confirmed"`. Everything here is
//! pure: identical input always renders identical text.

use crate::models::{Describable, FieldValue};
use crate::storage::ChangeSet;

/// Default maximum rendered length of a single value
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 120;

/// Shortest cap that still leaves room for the `...` marker
pub const MIN_VALUE_LENGTH: usize = ELLIPSIS.len();

const ELLIPSIS: &str = "...";

/// Fields never shown in change summaries, whatever the entity
pub const IGNORED_FIELDS: [&str; 4] = ["updatedAt", "createdAt", "password", "plainPassword"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short label for an entity
///
/// `Type: display` when the entity has a non-blank natural string,
/// `Type#id` when it only has an id, `Type (new)` otherwise.
pub fn describe_entity(entity: &dyn Describable) -> String {
    let type_name = entity.type_name();

    if let Some(display) = entity.display_string() {
        let display = display.trim();
        if !display.is_empty() {
            return format!("{}: {}", type_name, display);
        }
    }

    match entity.identifier() {
        Some(id) if !id.is_empty() => format!("{}#{}", type_name, id),
        _ => format!("{} (new)", type_name),
    }
}

/// Trim and cap a string at `max_len` characters
///
/// Blank input renders as `""` so empty values stay visible in summaries.
/// Caps too small for the `...` marker cut the text without one.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.trim();
    if s.is_empty() {
        return "\"\"".to_string();
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    if max_len < MIN_VALUE_LENGTH {
        return s.chars().take(max_len).collect();
    }

    let mut cut: String = s.chars().take(max_len - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Renders values and change sets with a configurable length cap and denylist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDescriber {
    max_len: usize,
    extra_ignored: Vec<String>,
}

impl Default for ChangeDescriber {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_VALUE_LENGTH,
            extra_ignored: Vec::new(),
        }
    }
}

impl ChangeDescriber {
    /// Create a describer with a custom cap and extra hidden fields
    pub fn new(max_len: usize, extra_ignored: Vec<String>) -> Self {
        Self {
            max_len,
            extra_ignored,
        }
    }

    /// Check whether a field is kept out of summaries
    pub fn is_ignored(&self, field: &str) -> bool {
        IGNORED_FIELDS.contains(&field) || self.extra_ignored.iter().any(|f| f == field)
    }

    /// Render one value for a change summary
    pub fn render_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Null => "null".to_string(),
            FieldValue::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Reference {
                display: Some(display),
                ..
            } => truncate(display, self.max_len),
            FieldValue::Reference {
                type_name,
                display: None,
            } => (*type_name).to_string(),
            FieldValue::Collection(json) => truncate(&json.to_string(), self.max_len),
            FieldValue::Int(n) => truncate(&n.to_string(), self.max_len),
            FieldValue::Text(s) => truncate(s, self.max_len),
        }
    }

    /// Render a change set as `" | Changes: f: old → new, ..."`
    ///
    /// Returns an empty string when every changed field is ignored.
    pub fn format_changes(&self, changes: &ChangeSet) -> String {
        let parts: Vec<String> = changes
            .iter()
            .filter(|change| !self.is_ignored(change.field()))
            .map(|change| {
                format!(
                    "{}: {} → {}",
                    change.field(),
                    self.render_value(change.old()),
                    self.render_value(change.new())
                )
            })
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!(" | Changes: {}", parts.join(", "))
        }
    }
}

/// Render a change set with the default cap and denylist
pub fn format_changes(changes: &ChangeSet) -> String {
    ChangeDescriber::default().format_changes(changes)
}

/// Render one value with the default cap
pub fn render_value(value: &FieldValue) -> String {
    ChangeDescriber::default().render_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    struct Sample {
        display: Option<String>,
        id: Option<String>,
    }

    impl Describable for Sample {
        fn type_name(&self) -> &'static str {
            "Sample"
        }

        fn display_string(&self) -> Option<String> {
            self.display.clone()
        }

        fn identifier(&self) -> Option<String> {
            self.id.clone()
        }
    }

    fn sample(display: Option<&str>, id: Option<&str>) -> Sample {
        Sample {
            display: display.map(str::to_string),
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_describe_prefers_display_string() {
        let entity = sample(Some("  Light and Shadow "), Some("3"));
        assert_eq!(describe_entity(&entity), "Sample: Light and Shadow");
    }

    #[test]
    fn test_describe_falls_back_to_id() {
        assert_eq!(describe_entity(&sample(None, Some("42"))), "Sample#42");
        assert_eq!(describe_entity(&sample(Some("   "), Some("42"))), "Sample#42");
    }

    #[test]
    fn test_describe_new_entity() {
        assert_eq!(describe_entity(&sample(None, None)), "Sample (new)");
    }

    #[test]
    fn test_truncate_short_and_blank() {
        assert_eq!(truncate("  hello  ", 120), "hello");
        assert_eq!(truncate("   ", 120), "\"\"");
        assert_eq!(truncate("", 120), "\"\"");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(200);
        let cut = truncate(&long, 120);
        assert_eq!(cut.chars().count(), 120);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..117], &long[..117]);
    }

    #[test]
    fn test_tiny_cap_never_exceeded() {
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("abcdef", 0), "");

        let describer = ChangeDescriber::new(2, vec![]);
        let rendered = describer.render_value(&FieldValue::from("abcdef"));
        assert!(rendered.chars().count() <= 2);
    }

    #[test]
    fn test_truncate_exact_limit_kept() {
        let exact = "b".repeat(120);
        assert_eq!(truncate(&exact, 120), exact);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let accented = "é".repeat(130);
        let cut = truncate(&accented, 120);
        assert_eq!(cut.chars().count(), 120);
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let inputs = [
            String::new(),
            "  padded  ".to_string(),
            "x".repeat(500),
            format!("{}   {}", "y".repeat(116), "z".repeat(50)),
            "\"\"".to_string(),
        ];
        for input in inputs {
            let once = truncate(&input, 120);
            assert_eq!(truncate(&once, 120), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_render_value_variants() {
        let describer = ChangeDescriber::default();
        let ts = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();

        assert_eq!(describer.render_value(&FieldValue::Null), "null");
        assert_eq!(
            describer.render_value(&FieldValue::Timestamp(ts)),
            "2025-06-01 09:05:00"
        );
        assert_eq!(describer.render_value(&FieldValue::Bool(false)), "false");
        assert_eq!(describer.render_value(&FieldValue::Int(4)), "4");
        assert_eq!(
            describer.render_value(&FieldValue::reference("Exhibition", Some("Impressions".into()))),
            "Impressions"
        );
        assert_eq!(
            describer.render_value(&FieldValue::reference("User", None)),
            "User"
        );
        assert_eq!(
            describer.render_value(&FieldValue::Collection(json!(["ROLE_ADMIN", "ROLE_USER"]))),
            r#"["ROLE_ADMIN","ROLE_USER"]"#
        );
        assert_eq!(describer.render_value(&FieldValue::Text(" ".into())), "\"\"");
    }

    #[test]
    fn test_render_long_collection_truncated() {
        let describer = ChangeDescriber::default();
        let items: Vec<String> = (0..100).map(|i| format!("item-{}", i)).collect();
        let rendered = describer.render_value(&FieldValue::from(items));
        assert_eq!(rendered.chars().count(), 120);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_format_changes_in_input_order() {
        let mut changes = ChangeSet::default();
        changes.push("status", "pending".into(), "confirmed".into());
        changes.push("numberOfGuests", FieldValue::Int(2), FieldValue::Int(4));

        assert_eq!(
            format_changes(&changes),
            " | Changes: status: pending → confirmed, numberOfGuests: 2 → 4"
        );
    }

    #[test]
    fn test_format_changes_only_ignored_fields() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut changes = ChangeSet::default();
        changes.push("updatedAt", FieldValue::Timestamp(ts), FieldValue::Timestamp(ts));
        changes.push("createdAt", FieldValue::Null, FieldValue::Timestamp(ts));
        changes.push("password", "old-hash".into(), "new-hash".into());
        changes.push("plainPassword", FieldValue::Null, "secret".into());

        assert_eq!(format_changes(&changes), "");
    }

    #[test]
    fn test_format_changes_hides_password_among_others() {
        let mut changes = ChangeSet::default();
        changes.push("password", "old-hash".into(), "new-hash".into());
        changes.push("username", "staff".into(), "guide".into());

        let summary = format_changes(&changes);
        assert_eq!(summary, " | Changes: username: staff → guide");
        assert!(!summary.contains("hash"));
    }

    #[test]
    fn test_extra_ignored_fields() {
        let describer = ChangeDescriber::new(120, vec!["notes".into()]);
        let mut changes = ChangeSet::default();
        changes.push("notes", FieldValue::Null, "wheelchair access".into());

        assert!(describer.is_ignored("notes"));
        assert!(describer.is_ignored("password"));
        assert_eq!(describer.format_changes(&changes), "");
    }

    #[test]
    fn test_empty_change_set() {
        assert_eq!(format_changes(&ChangeSet::default()), "");
    }
}
