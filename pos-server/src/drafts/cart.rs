//! Cart stamping and totals
//!
//! The server never trusts client-sent totals: every save recomputes
//! subtotal/tax/total from the submitted lines with Decimal math. Saves
//! replace the whole cart (last-writer-wins); `added_by` survives from the
//! previous cart for lines that already existed, `last_updated_by` is
//! always refreshed.

use super::DraftError;
use crate::db::models::{
    AuditStamp, CartLine, CartLineInput, DraftSave, DraftStatus, TableDraft,
};
use crate::utils::money::{self, MAX_PRICE, MAX_QUANTITY};
use rust_decimal::Decimal;
use surrealdb::RecordId;

/// Identity of a cart line for matching across saves and KOT history
///
/// Lines with an item reference are keyed by the item id; manual lines by
/// their name.
pub fn line_key(item: Option<&RecordId>, name: &str) -> String {
    match item {
        Some(id) => id.to_string(),
        None => format!("manual:{}", name),
    }
}

fn validate_line(line: &CartLineInput) -> Result<(), DraftError> {
    if line.name.trim().is_empty() {
        return Err(DraftError::InvalidLine("name is required".to_string()));
    }
    if !line.price.is_finite() || line.price < 0.0 || line.price > MAX_PRICE {
        return Err(DraftError::InvalidLine(format!(
            "price out of range: {}",
            line.price
        )));
    }
    if line.quantity <= 0 || line.quantity > MAX_QUANTITY {
        return Err(DraftError::InvalidLine(format!(
            "quantity out of range: {}",
            line.quantity
        )));
    }
    Ok(())
}

/// Recompute running totals from the cart
///
/// Tax is fixed at zero; total equals subtotal.
pub fn compute_totals(cart: &[CartLine]) -> (f64, f64, f64) {
    let subtotal: Decimal = cart
        .iter()
        .map(|l| money::line_total(l.price, l.quantity))
        .sum();
    let subtotal = money::to_f64(subtotal);
    (subtotal, 0.0, subtotal)
}

/// Status derived from cart content
pub fn derive_status(cart: &[CartLine]) -> DraftStatus {
    if cart.is_empty() {
        DraftStatus::Draft
    } else {
        DraftStatus::Occupied
    }
}

/// Apply a save to a table's draft
///
/// Replaces the cart wholesale, preserving `added_by` stamps for lines that
/// were already present and keeping the existing KOT history untouched.
pub fn apply_save(
    existing: Option<TableDraft>,
    restaurant: RecordId,
    dining_table: RecordId,
    save: DraftSave,
    staff: AuditStamp,
    now: i64,
) -> Result<TableDraft, DraftError> {
    for line in &save.cart {
        validate_line(line)?;
    }

    let previous_cart = existing
        .as_ref()
        .map(|d| d.cart.clone())
        .unwrap_or_default();

    let cart: Vec<CartLine> = save
        .cart
        .into_iter()
        .map(|input| {
            let item = input
                .item
                .as_deref()
                .and_then(|s| s.parse::<RecordId>().ok());
            let key = line_key(item.as_ref(), &input.name);
            let added_by = previous_cart
                .iter()
                .find(|prev| line_key(prev.item.as_ref(), &prev.name) == key)
                .map(|prev| prev.added_by.clone())
                .unwrap_or_else(|| staff.clone());
            CartLine {
                item,
                name: input.name,
                price: input.price,
                quantity: input.quantity,
                note: input.note,
                is_spicy: input.is_spicy,
                is_jain: input.is_jain,
                added_by,
                last_updated_by: staff.clone(),
            }
        })
        .collect();

    let (subtotal, tax, total) = compute_totals(&cart);
    let status = derive_status(&cart);

    let (persons, kot_history, printed_kots) = match existing {
        Some(d) => (
            save.persons.unwrap_or(d.persons),
            d.kot_history,
            d.printed_kots,
        ),
        None => (save.persons.unwrap_or(1), Vec::new(), Vec::new()),
    };

    Ok(TableDraft {
        id: None,
        restaurant,
        dining_table,
        persons,
        cart,
        subtotal,
        tax,
        total,
        status,
        kot_history,
        printed_kots,
        updated_at: now,
    })
}

/// A fresh, empty draft for table turnover
///
/// Empty cart, zero totals, `draft` status, no KOT history. Persons starts
/// at one, the smallest party a table can seat.
pub fn cleared_draft(restaurant: RecordId, dining_table: RecordId, now: i64) -> TableDraft {
    TableDraft {
        id: None,
        restaurant,
        dining_table,
        persons: 1,
        cart: Vec::new(),
        subtotal: 0.0,
        tax: 0.0,
        total: 0.0,
        status: DraftStatus::Draft,
        kot_history: Vec::new(),
        printed_kots: Vec::new(),
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(staff: &str) -> AuditStamp {
        AuditStamp {
            staff: format!("staff:{}", staff),
            name: staff.to_string(),
            at: 1_000,
        }
    }

    fn line(name: &str, price: f64, quantity: i32) -> CartLineInput {
        CartLineInput {
            item: Some(format!("menu_item:{}", name)),
            name: name.to_string(),
            price,
            quantity,
            note: None,
            is_spicy: false,
            is_jain: false,
        }
    }

    fn ids() -> (RecordId, RecordId) {
        (
            "restaurant:r1".parse().unwrap(),
            "dining_table:t1".parse().unwrap(),
        )
    }

    #[test]
    fn test_save_recomputes_totals() {
        let (r, t) = ids();
        let save = DraftSave {
            persons: Some(4),
            cart: vec![line("paneer", 120.0, 2), line("roti", 15.5, 4)],
        };
        let draft = apply_save(None, r, t, save, stamp("asha"), 2_000).unwrap();

        assert_eq!(draft.subtotal, 302.0);
        assert_eq!(draft.tax, 0.0);
        assert_eq!(draft.total, 302.0);
        assert_eq!(draft.status, DraftStatus::Occupied);
        assert_eq!(draft.persons, 4);
    }

    #[test]
    fn test_empty_cart_stays_draft() {
        let (r, t) = ids();
        let save = DraftSave {
            persons: None,
            cart: vec![],
        };
        let draft = apply_save(None, r, t, save, stamp("asha"), 2_000).unwrap();
        assert_eq!(draft.status, DraftStatus::Draft);
        assert_eq!(draft.total, 0.0);
        assert_eq!(draft.persons, 1);
    }

    #[test]
    fn test_added_by_preserved_on_resave() {
        let (r, t) = ids();
        let first = apply_save(
            None,
            r.clone(),
            t.clone(),
            DraftSave {
                persons: None,
                cart: vec![line("paneer", 120.0, 1)],
            },
            stamp("asha"),
            2_000,
        )
        .unwrap();

        let second = apply_save(
            Some(first),
            r,
            t,
            DraftSave {
                persons: None,
                cart: vec![line("paneer", 120.0, 3), line("roti", 15.0, 2)],
            },
            stamp("ravi"),
            3_000,
        )
        .unwrap();

        let paneer = &second.cart[0];
        assert_eq!(paneer.added_by.name, "asha");
        assert_eq!(paneer.last_updated_by.name, "ravi");

        let roti = &second.cart[1];
        assert_eq!(roti.added_by.name, "ravi");
    }

    #[test]
    fn test_last_writer_wins_replaces_cart() {
        let (r, t) = ids();
        let first = apply_save(
            None,
            r.clone(),
            t.clone(),
            DraftSave {
                persons: None,
                cart: vec![line("paneer", 120.0, 2), line("dal", 90.0, 1)],
            },
            stamp("asha"),
            2_000,
        )
        .unwrap();

        // Concurrent save from another terminal: the whole cart is replaced
        let second = apply_save(
            Some(first),
            r,
            t,
            DraftSave {
                persons: None,
                cart: vec![line("roti", 15.0, 6)],
            },
            stamp("ravi"),
            2_001,
        )
        .unwrap();

        assert_eq!(second.cart.len(), 1);
        assert_eq!(second.cart[0].name, "roti");
        assert_eq!(second.subtotal, 90.0);
    }

    #[test]
    fn test_invalid_lines_rejected() {
        let (r, t) = ids();
        for bad in [
            line("x", -1.0, 1),
            line("x", f64::NAN, 1),
            line("x", 10.0, 0),
            line("x", 10.0, -2),
        ] {
            let result = apply_save(
                None,
                r.clone(),
                t.clone(),
                DraftSave {
                    persons: None,
                    cart: vec![bad],
                },
                stamp("asha"),
                2_000,
            );
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_cleared_draft_is_empty() {
        let (r, t) = ids();
        let draft = cleared_draft(r, t, 5_000);
        assert!(draft.cart.is_empty());
        assert_eq!(draft.subtotal, 0.0);
        assert_eq!(draft.total, 0.0);
        assert_eq!(draft.persons, 1);
        assert_eq!(draft.status, DraftStatus::Draft);
        assert!(draft.kot_history.is_empty());
        assert!(draft.printed_kots.is_empty());
    }
}
