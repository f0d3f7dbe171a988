use nbgather_types::{NotebookUnit, ReconstructedDocument};

use crate::text::segment;

/// Reconstruct a flat script from marker-delimited slice text.
///
/// Internal marker lines are rewritten to the host's configured cell
/// marker so the script keeps its cell structure in the editor.
pub fn to_script(marked_text: &str, marker: &str, cell_marker: &str) -> ReconstructedDocument {
    let lines: Vec<String> = marked_text
        .lines()
        .map(|line| match line.strip_prefix(marker) {
            Some(rest) => format!("{}{}", cell_marker, rest),
            None => line.to_string(),
        })
        .collect();

    ReconstructedDocument::Script(lines.join("\n"))
}

/// Reconstruct a structured notebook from marker-delimited slice text.
///
/// Markers are removed and each fragment becomes its own code unit.
/// Blank fragments produce no unit.
pub fn to_notebook(marked_text: &str, marker: &str) -> ReconstructedDocument {
    let units: Vec<NotebookUnit> = segment(marked_text, marker)
        .into_iter()
        .filter(|fragment| !fragment.text.trim().is_empty())
        .map(|fragment| NotebookUnit::code(fragment.text.lines().map(str::to_string).collect()))
        .collect();

    ReconstructedDocument::Notebook(units)
}

/// Sentinel document shown when no resolver is available for the
/// session.
pub fn unavailable_document(to_script: bool, cell_marker: &str) -> ReconstructedDocument {
    const NOTICE: &str = "## Gather not available";

    if to_script {
        ReconstructedDocument::Script(format!("{} [markdown]\n{}", cell_marker, NOTICE))
    } else {
        ReconstructedDocument::Notebook(vec![NotebookUnit::markdown(vec![NOTICE.to_string()])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbgather_types::UnitKind;

    #[test]
    fn test_to_script_rewrites_markers() {
        let doc = to_script("#%%\na = 1\n#%%\nprint(a)\n", "#%%", "# %%");
        assert_eq!(
            doc,
            ReconstructedDocument::Script("# %%\na = 1\n# %%\nprint(a)".to_string())
        );
    }

    #[test]
    fn test_to_notebook_strips_markers_and_splits_units() {
        let ReconstructedDocument::Notebook(units) = to_notebook("#%%\na = 1\nb = 2\n#%%\nprint(a)\n", "#%%")
        else {
            panic!("expected notebook");
        };

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].source_lines, vec!["a = 1", "b = 2"]);
        assert_eq!(units[1].source_lines, vec!["print(a)"]);
        assert!(units.iter().all(|u| u.kind == UnitKind::Code));
    }

    #[test]
    fn test_unavailable_document_script_form() {
        let ReconstructedDocument::Script(text) = unavailable_document(true, "# %%") else {
            panic!("expected script");
        };
        assert_eq!(text, "# %% [markdown]\n## Gather not available");
    }

    #[test]
    fn test_unavailable_document_notebook_form() {
        let ReconstructedDocument::Notebook(units) = unavailable_document(false, "# %%") else {
            panic!("expected notebook");
        };
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].kind, UnitKind::Markdown);
    }
}
