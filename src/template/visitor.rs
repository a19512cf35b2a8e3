// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use crate::document::{ConfigDocument, OverlayMap};
use serde_yaml::{Mapping, Value};

/// Outcome of one sentinel pass over a document tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub replaced: usize,
    /// Field names still holding the sentinel because the overlay has no entry for them
    pub unresolved: Vec<String>,
}

/// Walk `value` and replace every mapping entry whose value is exactly
/// `sentinel` with the overlay entry named after the entry's key.
///
/// Sequences are walked but their items have no key, so a bare sentinel item
/// inside a list stays as it is.
pub fn replace_sentinels(value: &mut Value, sentinel: &str, overlay: &OverlayMap) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();
    visit(value, sentinel, overlay, &mut report);
    report
}

/// [`replace_sentinels`] over the root mapping of a document
pub fn replace_document_sentinels(
    doc: &mut ConfigDocument,
    sentinel: &str,
    overlay: &OverlayMap,
) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();
    visit_mapping(doc.data_mut(), sentinel, overlay, &mut report);
    report
}

fn visit(value: &mut Value, sentinel: &str, overlay: &OverlayMap, report: &mut SubstitutionReport) {
    match value {
        Value::Mapping(map) => visit_mapping(map, sentinel, overlay, report),
        Value::Sequence(items) => {
            for item in items {
                visit(item, sentinel, overlay, report);
            }
        }
        Value::Tagged(tagged) => visit(&mut tagged.value, sentinel, overlay, report),
        _ => {}
    }
}

fn visit_mapping(
    map: &mut Mapping,
    sentinel: &str,
    overlay: &OverlayMap,
    report: &mut SubstitutionReport,
) {
    for (key, entry) in map.iter_mut() {
        if entry.as_str() != Some(sentinel) {
            visit(entry, sentinel, overlay, report);
            continue;
        }

        let field = key.as_str();
        match field.and_then(|k| overlay.get(k)) {
            Some(replacement) => {
                *entry = Value::String(replacement.to_string());
                report.replaced += 1;
            }
            None => report
                .unresolved
                .push(field.map(str::to_string).unwrap_or_else(|| format!("{:?}", key))),
        }
    }
}
