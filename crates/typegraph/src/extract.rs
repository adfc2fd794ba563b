//! The seam between source-analysis front ends and the graph.
//!
//! Front ends implement [`Extractor`] to turn one source file into a
//! [`SourceRecord`]. The helpers here apply the naming rules every front end
//! shares: binary nested-type names are normalized to dotted form, and
//! references into platform namespaces are left out so the graph stays scoped
//! to project-owned types.

use std::path::Path;

use crate::error::Result;
use crate::record::SourceRecord;

/// Namespace prefixes excluded from referenced types by default.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["java.", "javax."];

/// Produces a [`SourceRecord`] for one source file.
///
/// Implementations populate `declared_types` with every type declared in the
/// file and `referenced_types` with every imported type plus explicit
/// supertype and interface names.
pub trait Extractor: Send + Sync {
    /// Extract the declared and referenced types of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Extraction`] if the file cannot be analyzed.
    fn extract(&self, path: &Path) -> Result<SourceRecord>;
}

impl<F> Extractor for F
where
    F: Fn(&Path) -> Result<SourceRecord> + Send + Sync,
{
    fn extract(&self, path: &Path) -> Result<SourceRecord> {
        self(path)
    }
}

/// Convert a binary type name (`pkg.Outer$Inner`) to its dotted form.
#[must_use]
pub fn normalize_type_name(name: &str) -> String {
    name.replace('$', ".")
}

/// Drops referenced type names that fall under excluded namespace prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFilter {
    excluded_prefixes: Vec<String>,
}

impl Default for ReferenceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().map(ToString::to_string))
    }
}

impl ReferenceFilter {
    /// Create a filter with the given excluded prefixes.
    pub fn new(prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded_prefixes: prefixes.into_iter().collect(),
        }
    }

    /// A filter that keeps every reference.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::new(std::iter::empty())
    }

    /// The configured prefixes.
    #[must_use]
    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded_prefixes
    }

    /// Returns `true` if `type_name` belongs to an excluded namespace.
    #[must_use]
    pub fn is_excluded(&self, type_name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| type_name.starts_with(prefix.as_str()))
    }

    /// Normalize all names of `record` and drop excluded references.
    ///
    /// Order and duplicates are preserved for everything that is kept.
    #[must_use]
    pub fn apply(&self, record: SourceRecord) -> SourceRecord {
        let (path, declared, referenced) = record.into_parts();
        let declared = declared.iter().map(|n| normalize_type_name(n)).collect();
        let referenced = referenced
            .iter()
            .map(|n| normalize_type_name(n))
            .filter(|n| !self.is_excluded(n))
            .collect();
        SourceRecord::new(path, declared, referenced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("org.example.Outer$Inner", "org.example.Outer.Inner")]
    #[case("org.example.A$B$C", "org.example.A.B.C")]
    #[case("org.example.Plain", "org.example.Plain")]
    fn normalizes_binary_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_type_name(input), expected);
    }

    #[rstest]
    #[case("java.util.List", true)]
    #[case("javax.inject.Inject", true)]
    #[case("javafx.scene.Node", false)]
    #[case("org.example.Base", false)]
    fn default_filter_excludes_platform_namespaces(#[case] name: &str, #[case] excluded: bool) {
        assert_eq!(ReferenceFilter::default().is_excluded(name), excluded);
    }

    #[test]
    fn apply_filters_references_only() {
        let record = SourceRecord::new(
            "Child.java",
            vec!["org.example.Child".into(), "org.example.Child$Node".into()],
            vec![
                "java.util.List".into(),
                "org.example.Base".into(),
                "org.example.Base".into(),
            ],
        );

        let filtered = ReferenceFilter::default().apply(record);
        assert_eq!(
            filtered.declared_types(),
            ["org.example.Child", "org.example.Child.Node"]
        );
        assert_eq!(
            filtered.referenced_types(),
            ["org.example.Base", "org.example.Base"]
        );
    }

    #[test]
    fn closures_are_extractors() {
        let extractor =
            |path: &Path| -> Result<SourceRecord> { Ok(SourceRecord::new(path, vec!["X".into()], vec![])) };

        let record = extractor.extract(Path::new("X.java")).unwrap();
        assert_eq!(record.declared_types(), ["X"]);
    }
}
