//! Facet expression compiler.
//!
//! A facet expression is a JSON-ish array of arrays of `"dimension:value"`
//! strings. Each dimension of [`SearchCriteria`] becomes one group of
//! single-term arrays; non-empty groups are joined with `,` and wrapped in an
//! outer `[...]`:
//!
//! ```text
//! categories = [a, b], versions = [1.0]
//! => [["categories:a"],["categories:b"],["versions:1.0"]]
//! ```

use serde_json::Value;

use crate::models::SearchCriteria;

// Facet keys, in emission order
const CATEGORIES: &str = "categories";
const VERSIONS: &str = "versions";
const PROJECT_TYPE: &str = "project_type";
const LICENSE: &str = "license";

/// Compile the facet dimensions of `criteria` into a facets expression.
///
/// Returns an empty string when every dimension is empty, so the caller can
/// leave the `facets` parameter out entirely.
pub fn compile_facets(criteria: &SearchCriteria) -> String {
    let groups = [
        render_group(CATEGORIES, &criteria.categories),
        render_group(VERSIONS, &criteria.versions),
        render_group(PROJECT_TYPE, &criteria.project_types),
        render_group(LICENSE, &criteria.licenses),
    ];

    let populated: Vec<&str> = groups
        .iter()
        .map(String::as_str)
        .filter(|group| !group.is_empty())
        .collect();

    if populated.is_empty() {
        return String::new();
    }

    format!("[{}]", populated.join(","))
}

/// Render one dimension as comma-separated `["dimension:value"]` terms.
///
/// Separators go between positions, so repeated values keep theirs.
fn render_group(dimension: &str, values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("[{}]", quote(&format!("{}:{}", dimension, value))))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a term as a JSON string, escaping `"` and `\`
fn quote(term: &str) -> String {
    Value::String(term.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(
        categories: &[&str],
        versions: &[&str],
        project_types: &[&str],
        licenses: &[&str],
    ) -> SearchCriteria {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        SearchCriteria {
            categories: owned(categories),
            versions: owned(versions),
            project_types: owned(project_types),
            licenses: owned(licenses),
            ..SearchCriteria::new("query")
        }
    }

    #[test]
    fn test_all_empty_is_empty_string() {
        assert_eq!(compile_facets(&criteria(&[], &[], &[], &[])), "");
    }

    #[test]
    fn test_single_group_two_values() {
        assert_eq!(
            compile_facets(&criteria(&["a", "b"], &[], &[], &[])),
            r#"[["categories:a"],["categories:b"]]"#
        );
    }

    #[test]
    fn test_two_single_value_groups() {
        assert_eq!(
            compile_facets(&criteria(&["a"], &["1.0"], &[], &[])),
            r#"[["categories:a"],["versions:1.0"]]"#
        );
    }

    #[test]
    fn test_single_value_has_no_trailing_separator() {
        assert_eq!(
            compile_facets(&criteria(&[], &[], &["mod"], &[])),
            r#"[["project_type:mod"]]"#
        );
    }

    #[test]
    fn test_duplicate_values_keep_separators() {
        // Comparing against the last value instead of the last position
        // would drop the first comma here
        assert_eq!(
            compile_facets(&criteria(&[], &["1.20", "1.19", "1.20"], &[], &[])),
            r#"[["versions:1.20"],["versions:1.19"],["versions:1.20"]]"#
        );
        assert_eq!(
            compile_facets(&criteria(&["x", "x"], &[], &[], &[])),
            r#"[["categories:x"],["categories:x"]]"#
        );
    }

    #[test]
    fn test_gaps_between_groups() {
        // Only populated groups are separated, whatever sits between them
        assert_eq!(
            compile_facets(&criteria(&["a"], &[], &[], &["MIT"])),
            r#"[["categories:a"],["license:MIT"]]"#
        );
        assert_eq!(
            compile_facets(&criteria(&[], &["1.0"], &[], &["MIT"])),
            r#"[["versions:1.0"],["license:MIT"]]"#
        );
        assert_eq!(
            compile_facets(&criteria(&[], &[], &["mod"], &["MIT"])),
            r#"[["project_type:mod"],["license:MIT"]]"#
        );
    }

    #[test]
    fn test_all_groups_in_fixed_order() {
        assert_eq!(
            compile_facets(&criteria(&["a", "b"], &["1.0"], &["mod", "modpack"], &["MIT"])),
            concat!(
                r#"[["categories:a"],["categories:b"],"#,
                r#"["versions:1.0"],"#,
                r#"["project_type:mod"],["project_type:modpack"],"#,
                r#"["license:MIT"]]"#
            )
        );
    }

    #[test]
    fn test_values_are_escaped() {
        assert_eq!(
            compile_facets(&criteria(&[r#"say "hi""#], &[], &[], &[])),
            r#"[["categories:say \"hi\""]]"#
        );
    }

    #[test]
    fn test_output_is_valid_json() {
        let facets = compile_facets(&criteria(&["a", "b"], &["1.0"], &[], &["LGPL-3.0"]));
        let parsed: Vec<Vec<String>> = serde_json::from_str(&facets).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[3], vec!["license:LGPL-3.0"]);
    }
}
