use nbgather_types::{Fragment, LiveUnit, SelectionRange};

/// Match slice fragments back onto the live document for highlighting.
///
/// For each fragment, in resolver order, the first live unit whose
/// text contains the fragment text as a contiguous substring is
/// selected. A fragment matching no unit is skipped silently: the cell
/// it came from may have been edited or removed since execution, which
/// is expected rather than an error. Ranges are neither merged nor
/// deduplicated, and their order follows dependency order, not
/// document order.
pub fn map_fragments_to_units(
    fragments: &[Fragment],
    live_units: &[LiveUnit],
) -> Vec<SelectionRange> {
    fragments
        .iter()
        .filter(|fragment| !fragment.text.trim().is_empty())
        .filter_map(|fragment| {
            live_units
                .iter()
                .position(|unit| unit.text.contains(&fragment.text))
                .map(SelectionRange::single)
        })
        .collect()
}
