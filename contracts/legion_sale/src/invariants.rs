#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::testutils::TestSale;
use crate::types::{InvestorPosition, SaleStatus};

/// Total capital raised equals the sum of all open positions.
pub fn assert_capital_conserved(sale: &TestSale, investors: &[Address]) {
    let sum: i128 = investors
        .iter()
        .filter_map(|investor| sale.client.investor_position(investor))
        .map(|position| position.invested_capital)
        .sum();
    let status = sale.client.sale_status();
    assert_eq!(
        status.total_capital_raised, sum,
        "total capital raised {} differs from the sum of positions {}",
        status.total_capital_raised, sum
    );
}

/// The sale holds every unit of bid token it still owes investors.
pub fn assert_bid_balance_covers_positions(sale: &TestSale) {
    let status = sale.client.sale_status();
    let paid_to_project = if status.capital_withdrawn {
        status.total_capital_withdrawn
    } else {
        0
    };
    let owed = status.total_capital_raised - paid_to_project;
    let held = sale.bid.balance(&sale.client.address);
    assert!(held >= owed, "sale holds {} but owes {}", held, owed);
}

/// One-way flags never reset.
pub fn assert_flags_monotonic(before: &SaleStatus, after: &SaleStatus) {
    assert!(!before.canceled || after.canceled, "canceled was reset");
    assert!(
        !before.results_published || after.results_published,
        "results_published was reset"
    );
    assert!(
        !before.tokens_supplied || after.tokens_supplied,
        "tokens_supplied was reset"
    );
    assert!(
        before.private_key.is_none() || after.private_key == before.private_key,
        "revealed private key changed"
    );
}

/// Tokens are only ever supplied on published results.
pub fn assert_supply_follows_publish(status: &SaleStatus) {
    if status.tokens_supplied {
        assert!(status.results_published, "tokens supplied before results");
    }
}

/// Refunded positions hold no capital and never settle.
pub fn assert_position_consistent(position: &InvestorPosition) {
    assert!(position.invested_capital >= 0, "negative invested capital");
    if position.has_refunded {
        assert_eq!(position.invested_capital, 0, "refunded position holds capital");
        assert!(!position.has_settled, "refunded position settled");
    }
}

pub fn assert_all_sale_invariants(sale: &TestSale, investors: &[Address]) {
    assert_capital_conserved(sale, investors);
    assert_bid_balance_covers_positions(sale);
    assert_supply_follows_publish(&sale.client.sale_status());
    for investor in investors {
        if let Some(position) = sale.client.investor_position(investor) {
            assert_position_consistent(&position);
        }
    }
}
