//! Bill aggregates and net-profit reporting

use std::collections::HashMap;

use crate::db::models::Bill;
use crate::utils::money;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline figures for a range of bills
#[derive(Debug, Clone, Serialize)]
pub struct BillStats {
    pub bill_count: usize,
    /// Sum of finalized bill totals
    pub revenue: f64,
    pub average_bill: f64,
    /// Total number of bill lines
    pub item_count: usize,
    /// Line-level plus bill-level discounts
    pub discount: f64,
}

/// Fold bills into headline figures (count, revenue, average, discounts)
pub fn bill_stats(bills: &[Bill]) -> BillStats {
    let mut revenue = Decimal::ZERO;
    let mut discount = Decimal::ZERO;
    let mut item_count = 0usize;

    for bill in bills {
        revenue += money::to_decimal(bill.total);
        discount += money::to_decimal(bill.discount);
        item_count += bill.items.len();
        for line in &bill.items {
            discount += money::to_decimal(line.discount);
        }
    }

    let average = if bills.is_empty() {
        Decimal::ZERO
    } else {
        revenue / Decimal::from(bills.len())
    };

    BillStats {
        bill_count: bills.len(),
        revenue: money::to_f64(revenue),
        average_bill: money::to_f64(average),
        item_count,
        discount: money::to_f64(discount),
    }
}

/// Aggregated figures for a range of bills
///
/// `net_profit` = revenue − discount − cost, where revenue is the gross
/// line total plus charges and cost is resolved against current item costs.
#[derive(Debug, Clone, Serialize)]
pub struct NetProfitStats {
    pub bill_count: usize,
    pub revenue: f64,
    pub discount: f64,
    pub cost: f64,
    pub net_profit: f64,
}

/// Fold bills into net-profit figures
///
/// `costs` maps item ids (as "menu_item:xxx") to their current cost. Lines
/// without an item ref, and items missing from the map, count zero cost.
pub fn net_profit(bills: &[Bill], costs: &HashMap<String, f64>) -> NetProfitStats {
    let mut revenue = Decimal::ZERO;
    let mut discount = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for bill in bills {
        revenue += money::to_decimal(bill.charges);
        discount += money::to_decimal(bill.discount);
        for line in &bill.items {
            revenue += money::line_total(line.price, line.quantity);
            discount += money::to_decimal(line.discount);
            if let Some(item) = &line.item
                && let Some(unit_cost) = costs.get(&item.to_string())
            {
                cost += money::line_total(*unit_cost, line.quantity);
            }
        }
    }

    let net = revenue - discount - cost;
    NetProfitStats {
        bill_count: bills.len(),
        revenue: money::to_f64(revenue),
        discount: money::to_f64(discount),
        cost: money::to_f64(cost),
        net_profit: money::to_f64(net),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::BillLine;

    fn bill(items: Vec<BillLine>, discount: f64, charges: f64) -> Bill {
        let subtotal: f64 = items.iter().map(|l| l.price * l.quantity as f64).sum();
        Bill {
            id: None,
            restaurant: "restaurant:r1".parse().unwrap(),
            dining_table: "dining_table:t1".parse().unwrap(),
            space: None,
            bill_no: "B-1".to_string(),
            items,
            subtotal,
            discount,
            charges,
            total: subtotal - discount + charges,
            persons: 2,
            created_by: "staff:asha".to_string(),
            created_at: 1_000,
        }
    }

    fn line(name: &str, price: f64, quantity: i32, discount: f64) -> BillLine {
        BillLine {
            item: Some(format!("menu_item:{}", name).parse().unwrap()),
            name: name.to_string(),
            price,
            quantity,
            discount,
        }
    }

    #[test]
    fn test_single_line_profit() {
        let bills = vec![bill(vec![line("paneer", 100.0, 2, 0.0)], 0.0, 0.0)];
        let costs = HashMap::from([("menu_item:paneer".to_string(), 40.0)]);

        let stats = net_profit(&bills, &costs);
        assert_eq!(stats.revenue, 200.0);
        assert_eq!(stats.cost, 80.0);
        assert_eq!(stats.net_profit, 120.0);
    }

    #[test]
    fn test_discounts_reduce_profit() {
        let bills = vec![bill(vec![line("paneer", 100.0, 2, 10.0)], 15.0, 0.0)];
        let costs = HashMap::from([("menu_item:paneer".to_string(), 40.0)]);

        let stats = net_profit(&bills, &costs);
        assert_eq!(stats.discount, 25.0);
        assert_eq!(stats.net_profit, 95.0);
    }

    #[test]
    fn test_unknown_cost_counts_zero() {
        let mut manual = line("extra", 50.0, 1, 0.0);
        manual.item = None;
        let bills = vec![bill(
            vec![line("mystery", 100.0, 1, 0.0), manual],
            0.0,
            0.0,
        )];

        let stats = net_profit(&bills, &HashMap::new());
        assert_eq!(stats.cost, 0.0);
        assert_eq!(stats.net_profit, 150.0);
    }

    #[test]
    fn test_charges_add_to_revenue() {
        let bills = vec![bill(vec![line("paneer", 100.0, 1, 0.0)], 0.0, 20.0)];
        let stats = net_profit(&bills, &HashMap::new());
        assert_eq!(stats.revenue, 120.0);
    }

    #[test]
    fn test_bill_stats_aggregates() {
        let bills = vec![
            bill(vec![line("paneer", 100.0, 2, 0.0)], 10.0, 0.0),
            bill(
                vec![line("roti", 15.0, 4, 5.0), line("dal", 90.0, 1, 0.0)],
                0.0,
                0.0,
            ),
        ];

        let stats = bill_stats(&bills);
        assert_eq!(stats.bill_count, 2);
        // Totals: (200 - 10) + 150 = 340
        assert_eq!(stats.revenue, 340.0);
        assert_eq!(stats.average_bill, 170.0);
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.discount, 15.0);
    }

    #[test]
    fn test_bill_stats_empty_range() {
        let stats = bill_stats(&[]);
        assert_eq!(stats.bill_count, 0);
        assert_eq!(stats.revenue, 0.0);
        assert_eq!(stats.average_bill, 0.0);
    }
}
