use proptest::prelude::*;
use rhub_domain::money::{Money, equal_split};

#[test]
fn shares_sum_exactly_for_the_worked_example() {
    let shares = equal_split(Money::from_cents(10_000), 3);
    let total: Money = shares.iter().copied().sum();
    assert_eq!(total, Money::from_cents(10_000));
    assert_eq!(shares[0], Money::from_cents(3334));
}

#[test]
fn money_round_trips_through_json() {
    let amount = Money::from_cents(3334);
    let json = serde_json::to_string(&amount).unwrap();
    assert_eq!(json, "33.34");
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(back, amount);
}

#[test]
fn out_of_range_amounts_are_rejected() {
    assert!(serde_json::from_str::<Money>("1e15").is_err());
}

proptest! {
    #[test]
    fn shares_always_sum_to_the_price(cents in 0i64..10_000_000, parts in 1usize..=6) {
        let total = Money::from_cents(cents);
        let shares = equal_split(total, parts);
        prop_assert_eq!(shares.len(), parts);

        let sum: i64 = shares.iter().map(|m| m.cents()).sum();
        prop_assert_eq!(sum, cents);

        // No two shares differ by more than one cent.
        let min = shares.iter().map(|m| m.cents()).min().unwrap();
        let max = shares.iter().map(|m| m.cents()).max().unwrap();
        prop_assert!(max - min <= 1);

        // Spare cents land on the earliest-joined members.
        for pair in shares.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }
}
