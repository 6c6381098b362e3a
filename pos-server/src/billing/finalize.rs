//! Freezing lines and computing bill totals

use super::BillingError;
use crate::db::models::{BillLine, BillLineInput};
use crate::utils::money::{self, MAX_PRICE, MAX_QUANTITY};
use rust_decimal::Decimal;
use surrealdb::RecordId;

fn validate_line(line: &BillLineInput) -> Result<(), BillingError> {
    if line.name.trim().is_empty() {
        return Err(BillingError::InvalidLine("name is required".to_string()));
    }
    if !line.price.is_finite() || line.price < 0.0 || line.price > MAX_PRICE {
        return Err(BillingError::InvalidLine(format!(
            "price out of range: {}",
            line.price
        )));
    }
    if line.quantity <= 0 || line.quantity > MAX_QUANTITY {
        return Err(BillingError::InvalidLine(format!(
            "quantity out of range: {}",
            line.quantity
        )));
    }
    if let Some(discount) = line.discount
        && (!discount.is_finite() || discount < 0.0)
    {
        return Err(BillingError::InvalidLine(format!(
            "discount out of range: {}",
            discount
        )));
    }
    Ok(())
}

/// Freeze a submitted line into an immutable bill line
///
/// `resolved_price` is the price the resolver charged for the table's
/// space; manual lines (no item ref) keep the submitted price.
pub fn freeze_line(
    input: BillLineInput,
    resolved_price: Option<f64>,
) -> Result<BillLine, BillingError> {
    validate_line(&input)?;
    let item = input
        .item
        .as_deref()
        .and_then(|s| s.parse::<RecordId>().ok());
    let price = match (&item, resolved_price) {
        (Some(_), Some(p)) => p,
        _ => input.price,
    };
    Ok(BillLine {
        item,
        name: input.name,
        price,
        quantity: input.quantity,
        discount: input.discount.unwrap_or(0.0),
    })
}

/// subtotal = Σ(price × qty); total = subtotal − line discounts − bill
/// discount + charges
pub fn compute_bill_totals(
    items: &[BillLine],
    discount: f64,
    charges: f64,
) -> Result<(f64, f64), BillingError> {
    if !discount.is_finite() || discount < 0.0 {
        return Err(BillingError::InvalidAmount(format!(
            "discount out of range: {}",
            discount
        )));
    }
    if !charges.is_finite() || charges < 0.0 {
        return Err(BillingError::InvalidAmount(format!(
            "charges out of range: {}",
            charges
        )));
    }

    let subtotal: Decimal = items
        .iter()
        .map(|l| money::line_total(l.price, l.quantity))
        .sum();
    let line_discounts: Decimal = items.iter().map(|l| money::to_decimal(l.discount)).sum();
    let total = subtotal - line_discounts - money::to_decimal(discount)
        + money::to_decimal(charges);

    Ok((money::to_f64(subtotal), money::to_f64(total)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64, quantity: i32, discount: Option<f64>) -> BillLineInput {
        BillLineInput {
            item: Some(format!("menu_item:{}", name)),
            name: name.to_string(),
            price,
            quantity,
            discount,
        }
    }

    #[test]
    fn test_resolved_price_overrides_submitted() {
        let line = freeze_line(input("paneer", 100.0, 2, None), Some(120.0)).unwrap();
        assert_eq!(line.price, 120.0);
    }

    #[test]
    fn test_manual_line_keeps_submitted_price() {
        let mut manual = input("extra cheese", 30.0, 1, None);
        manual.item = None;
        let line = freeze_line(manual, None).unwrap();
        assert!(line.item.is_none());
        assert_eq!(line.price, 30.0);
    }

    #[test]
    fn test_totals_with_discounts_and_charges() {
        let items = vec![
            freeze_line(input("paneer", 120.0, 2, Some(20.0)), Some(120.0)).unwrap(),
            freeze_line(input("roti", 15.0, 4, None), Some(15.0)).unwrap(),
        ];
        let (subtotal, total) = compute_bill_totals(&items, 30.0, 10.0).unwrap();
        assert_eq!(subtotal, 300.0);
        // 300 − 20 (line) − 30 (bill) + 10 (charges)
        assert_eq!(total, 260.0);
    }

    #[test]
    fn test_invalid_lines_rejected() {
        assert!(freeze_line(input("", 10.0, 1, None), None).is_err());
        assert!(freeze_line(input("x", -1.0, 1, None), None).is_err());
        assert!(freeze_line(input("x", 10.0, 0, None), None).is_err());
        assert!(freeze_line(input("x", 10.0, 1, Some(-5.0)), None).is_err());
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        assert!(compute_bill_totals(&[], -1.0, 0.0).is_err());
        assert!(compute_bill_totals(&[], 0.0, f64::NAN).is_err());
    }
}
