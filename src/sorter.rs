/*!
 * Ordering of bibliography entries by first-author surname.
 *
 * Entries are compared on the lowercased sort key using plain string
 * ordering. The sort is stable: entries with equal keys keep the order they
 * had in the manuscript, since no secondary key (initials, year) is extracted.
 */

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use log::debug;
use crate::bibliography::BibliographyEntry;
use crate::errors::AppError;
use crate::sort_key::SortKey;

/// An entry paired with its extracted key and original position
#[derive(Debug, Clone)]
pub struct KeyedEntry<'a> {
    /// Zero-based position in the input document
    pub position: usize,
    pub entry: &'a BibliographyEntry,
    pub key: SortKey,
}

/// Stable, case-insensitive sort by sort key
pub fn sort_entries(entries: Vec<BibliographyEntry>) -> Vec<BibliographyEntry> {
    sort_entries_by(entries, normalized_key)
}

/// Sort entries, turning any unexpected panic during ordering into [`AppError::SortFailure`].
///
/// Nothing is returned unless the whole sequence was ordered.
pub fn try_sort_entries(entries: Vec<BibliographyEntry>) -> Result<Vec<BibliographyEntry>, AppError> {
    try_sort_entries_by(entries, normalized_key)
}

pub(crate) fn try_sort_entries_by<F>(entries: Vec<BibliographyEntry>, key_fn: F) -> Result<Vec<BibliographyEntry>, AppError>
where
    F: FnMut(&BibliographyEntry) -> String,
{
    panic::catch_unwind(AssertUnwindSafe(move || sort_entries_by(entries, key_fn)))
        .map_err(|payload| AppError::SortFailure(panic_message(payload.as_ref())))
}

fn sort_entries_by<F>(mut entries: Vec<BibliographyEntry>, key_fn: F) -> Vec<BibliographyEntry>
where
    F: FnMut(&BibliographyEntry) -> String,
{
    // Each key is extracted exactly once; equal keys keep their input order.
    entries.sort_by_cached_key(key_fn);
    debug!("Sorted {} entries", entries.len());
    entries
}

fn normalized_key(entry: &BibliographyEntry) -> String {
    entry.sort_key().normalized()
}

/// Whether `entries` already appear in sorted order
pub fn is_sorted(entries: &[BibliographyEntry]) -> bool {
    let keys: Vec<String> = entries.iter().map(normalized_key).collect();
    keys.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Entries with their keys, in the order [`sort_entries`] would produce
pub fn keyed_entries(entries: &[BibliographyEntry]) -> Vec<KeyedEntry<'_>> {
    let mut keyed: Vec<KeyedEntry<'_>> = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| KeyedEntry {
            position,
            entry,
            key: entry.sort_key(),
        })
        .collect();

    keyed.sort_by_cached_key(|k| k.key.normalized());
    keyed
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected failure while ordering entries".to_string()
    }
}
