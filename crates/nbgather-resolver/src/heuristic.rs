use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use nbgather_types::{CellId, Fragment, LoggedUnit, Slice};
use regex::Regex;

use crate::traits::{latest_execution, DependencyResolver};
use crate::Result;

static ASSIGN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:,\s*[A-Za-z_][A-Za-z0-9_]*\s*)*[+\-*/]?=[^=]")
        .unwrap()
});
static DEF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:def|class)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());
static IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(.+)$").unwrap());
static FROM_IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*from\s+\S+\s+import\s+(.+)$").unwrap());
static IDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());
static STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'[^'\n]*'|"[^"\n]*""#).unwrap());

/// Cell-granularity reference resolver.
///
/// A deliberately coarse default collaborator: a cell is a dependency
/// of the target when it is the latest execution of its identity and
/// defines a name (assignment, `def`/`class`, import) that the kept
/// set references. Whole cells are kept or dropped; no statement-level
/// dataflow is attempted. Hosts with a real analyzer plug it in
/// through [`DependencyResolver`] instead.
#[derive(Debug, Default)]
pub struct CellRefResolver;

impl CellRefResolver {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyResolver for CellRefResolver {
    fn resolve(&self, log: &[LoggedUnit], target: &CellId) -> Result<Option<Slice>> {
        let Some(target_unit) = latest_execution(log, target) else {
            // The target never ran against this log; nothing to slice.
            return Ok(None);
        };
        let target_pos = log
            .iter()
            .rposition(|unit| unit.log_event_id == target_unit.log_event_id)
            .unwrap_or(0);

        // Only the latest execution of each identity before the target
        // can contribute; earlier runs are superseded.
        let mut latest_pos: HashMap<&CellId, usize> = HashMap::new();
        for (pos, unit) in log.iter().enumerate().take(target_pos) {
            latest_pos.insert(&unit.persistent_id, pos);
        }
        let mut candidates: Vec<usize> = latest_pos
            .iter()
            .filter(|&(id, _)| *id != target)
            .map(|(_, &pos)| pos)
            .collect();
        candidates.sort_unstable();

        let mut needed = referenced_names(&target_unit.text);
        let mut kept: Vec<usize> = Vec::new();

        for &pos in candidates.iter().rev() {
            let unit = &log[pos];
            if unit.has_error {
                continue;
            }
            let defs = defined_names(&unit.text);
            if defs.iter().any(|name| needed.contains(name)) {
                needed.extend(referenced_names(&unit.text));
                kept.push(pos);
            }
        }

        kept.reverse();
        let mut fragments: Vec<Fragment> = kept
            .into_iter()
            .map(|pos| Fragment::new(log[pos].text.clone(), log[pos].persistent_id.clone()))
            .collect();
        fragments.push(Fragment::new(
            target_unit.text.clone(),
            target_unit.persistent_id.clone(),
        ));

        Ok(Some(Slice::new(target.clone(), fragments)))
    }
}

/// Names a cell makes available to later cells.
fn defined_names(text: &str) -> HashSet<String> {
    let mut names = HashSet::new();

    for line in text.lines() {
        if ASSIGN_REGEX.is_match(line) {
            // Multiple targets ("a, b = ...") all bind, so take every
            // identifier on the left of the first '='.
            let lhs = line.split('=').next().unwrap_or("");
            for ident in IDENT_REGEX.find_iter(lhs) {
                names.insert(ident.as_str().to_string());
            }
            continue;
        }
        if let Some(caps) = DEF_REGEX.captures(line) {
            names.insert(caps[1].to_string());
            continue;
        }
        if let Some(caps) = FROM_IMPORT_REGEX.captures(line) {
            names.extend(imported_names(&caps[1]));
            continue;
        }
        if let Some(caps) = IMPORT_REGEX.captures(line) {
            names.extend(imported_names(&caps[1]));
        }
    }

    names
}

/// Every identifier a cell mentions outside string literals.
/// Over-approximates on purpose: keyword and attribute hits only ever
/// keep extra cells, never drop needed ones.
fn referenced_names(text: &str) -> HashSet<String> {
    let stripped = STRING_REGEX.replace_all(text, " ");
    IDENT_REGEX
        .find_iter(&stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Bound names from an import clause: "x, y as z" -> {x, z}.
fn imported_names(clause: &str) -> HashSet<String> {
    clause
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            let bound = match part.split_once(" as ") {
                Some((_, alias)) => alias.trim(),
                None => part.split('.').next().unwrap_or(part).trim(),
            };
            IDENT_REGEX
                .find(bound)
                .map(|m| m.as_str().to_string())
        })
        .collect()
}
