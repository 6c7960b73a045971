/*
 * reorder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Reordering of a single citation cluster.
//!
//! The prefix of the first citation belongs to the cluster as a whole
//! (`[see @b; @a]` reads "see" before whatever comes first), so it is taken
//! off before sorting and put back on the citation that ends up first.
//! Every other prefix and every suffix stays with its own citation.

use citesort_pandoc::{Citation, Cite};

use crate::sort_key::{SortKey, SortTable};

/// Sort the citations of `cite` in place.
///
/// Clusters with fewer than two citations are left untouched. Returns
/// whether the order of citations changed; the cite is never modified when
/// it returns `false`.
pub fn reorder_cite(cite: &mut Cite, table: &SortTable) -> bool {
    if cite.citations.len() < 2 {
        return false;
    }

    let order = sorted_order(&cite.citations, table);
    if order.iter().enumerate().all(|(idx, original)| idx == *original) {
        return false;
    }

    let cluster_prefix = std::mem::take(&mut cite.citations[0].prefix);

    let mut slots: Vec<Option<Citation>> = std::mem::take(&mut cite.citations)
        .into_iter()
        .map(Some)
        .collect();
    cite.citations = order
        .iter()
        .filter_map(|original| slots[*original].take())
        .collect();

    if !cluster_prefix.is_empty() {
        let first = &mut cite.citations[0].prefix;
        let own = std::mem::take(first);
        *first = cluster_prefix;
        first.extend(own);
    }

    true
}

/// Original indices of `citations` in sorted order.
pub fn sorted_order(citations: &[Citation], table: &SortTable) -> Vec<usize> {
    let mut keyed: Vec<SortKey> = citations
        .iter()
        .enumerate()
        .map(|(position, citation)| table.key_for(&citation.id, position))
        .collect();
    // positions are unique, so keys never tie
    keyed.sort();
    keyed.into_iter().map(|key| key.position).collect()
}
