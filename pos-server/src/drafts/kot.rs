//! KOT (kitchen order ticket) recording
//!
//! Each send-to-kitchen appends a snapshot of cart *deltas* (what changed
//! since the last send) to the draft's append-only `kot_history`. The
//! invariant maintained here: for any item, the sum of its delta quantities
//! across the history equals its quantity in the current cart.

use std::collections::HashMap;

use crate::db::models::{CartLine, KotLine, KotSnapshot, TableDraft};

use super::cart::line_key;

/// Running total and display name for a line identity across the history
struct SentLine {
    quantity: i32,
    name: String,
}

/// What the kitchen has already seen, summed per line identity
fn sent_lines(history: &[KotSnapshot]) -> HashMap<String, SentLine> {
    let mut sent: HashMap<String, SentLine> = HashMap::new();
    for kot in history {
        for line in &kot.items {
            let key = match &line.item {
                Some(item) => item.clone(),
                None => format!("manual:{}", line.name),
            };
            let entry = sent.entry(key).or_insert_with(|| SentLine {
                quantity: 0,
                name: line.name.clone(),
            });
            entry.quantity += line.quantity;
        }
    }
    sent
}

/// Compute the deltas between the current cart and what the kitchen has
/// already seen (positive = added, negative = removed)
pub fn cart_deltas(history: &[KotSnapshot], cart: &[CartLine]) -> Vec<KotLine> {
    let mut sent = sent_lines(history);
    let mut deltas = Vec::new();

    for line in cart {
        let key = line_key(line.item.as_ref(), &line.name);
        let already = sent.remove(&key).map(|s| s.quantity).unwrap_or(0);
        let delta = line.quantity - already;
        if delta != 0 {
            deltas.push(KotLine {
                item: line.item.as_ref().map(|i| i.to_string()),
                name: line.name.clone(),
                quantity: delta,
                note: line.note.clone(),
                is_spicy: line.is_spicy,
                is_jain: line.is_jain,
            });
        }
    }

    // Lines sent earlier but no longer in the cart: negative delta, named
    // after the history line so the ticket never shows a record id
    for (key, line) in sent {
        if line.quantity != 0 {
            let item = if key.starts_with("manual:") {
                None
            } else {
                Some(key)
            };
            deltas.push(KotLine {
                item,
                name: line.name,
                quantity: -line.quantity,
                note: None,
                is_spicy: false,
                is_jain: false,
            });
        }
    }

    deltas
}

/// Append a KOT snapshot for the current cart deltas
///
/// Returns `None` (and leaves the draft untouched) when nothing changed
/// since the last send.
pub fn send_to_kitchen(draft: &mut TableDraft, now: i64) -> Option<KotSnapshot> {
    let deltas = cart_deltas(&draft.kot_history, &draft.cart);
    if deltas.is_empty() {
        return None;
    }

    let snapshot = KotSnapshot {
        id: uuid::Uuid::new_v4().to_string(),
        items: deltas,
        created_at: now,
        printed: false,
    };
    draft.kot_history.push(snapshot.clone());
    draft.updated_at = now;
    Some(snapshot)
}

/// Flag KOT ids as printed; re-marking an already-printed id is a no-op
pub fn mark_printed(draft: &mut TableDraft, ids: &[String]) -> usize {
    let mut newly_marked = 0;
    for id in ids {
        let known = draft.kot_history.iter().any(|k| &k.id == id);
        if !known {
            continue;
        }
        if !draft.printed_kots.contains(id) {
            draft.printed_kots.push(id.clone());
            newly_marked += 1;
        }
        for kot in draft.kot_history.iter_mut().filter(|k| &k.id == id) {
            kot.printed = true;
        }
    }
    newly_marked
}
