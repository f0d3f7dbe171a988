use nbgather_types::Fragment;

/// Flatten slice fragments into one marker-delimited text blob.
///
/// Each fragment is prefixed with a single marker token line, in the
/// order given. Resolver order is authoritative; this function never
/// re-sorts.
pub fn reassemble(fragments: &[Fragment], marker: &str) -> String {
    let mut out = String::new();
    for fragment in fragments {
        out.push_str(marker);
        out.push('\n');
        out.push_str(&fragment.text);
        out.push('\n');
    }
    out
}

/// Split a marker-delimited text blob back into ordered fragments.
///
/// A line equal to or prefixed by the marker token starts a new
/// fragment; every following line up to the next marker line belongs
/// to it. Content before the first marker is kept as a fragment only
/// when non-blank. Empty input yields an empty list, not an error.
///
/// Recovered fragments carry no origin; that information only exists
/// on resolver output.
pub fn segment(text: &str, marker: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut seen_marker = false;

    for line in text.lines() {
        if line.starts_with(marker) {
            flush(&mut fragments, &mut current, seen_marker);
            seen_marker = true;
        } else {
            current.push(line);
        }
    }
    flush(&mut fragments, &mut current, seen_marker);

    fragments
}

fn flush(fragments: &mut Vec<Fragment>, current: &mut Vec<&str>, seen_marker: bool) {
    let text = current.join("\n");
    current.clear();

    // A leading fragment (before any marker) is an artifact of the
    // input unless it actually says something.
    if !seen_marker && text.trim().is_empty() {
        return;
    }
    fragments.push(Fragment::anonymous(text));
}
