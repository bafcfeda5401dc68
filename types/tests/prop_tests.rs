use proptest::prelude::*;

use hdn_types::{AccountAddress, RewardAmount, Timestamp, TokenId, YieldParams, SECS_PER_DAY};

proptest! {
    /// AccountAddress roundtrip: from_bytes -> parse produces an equal address.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = AccountAddress::from_bytes(&bytes);
        let parsed: AccountAddress = addr.as_str().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// AccountAddress bincode serialization roundtrip.
    #[test]
    fn address_bincode_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = AccountAddress::from_bytes(&bytes);
        let encoded = bincode::serialize(&addr).unwrap();
        let decoded: AccountAddress = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, addr);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(later) = later - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let later = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(later), offset);
    }

    /// Timestamp elapsed_since saturates to 0 when the "later" time is earlier.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// TokenId bincode roundtrip and ordering agree with the raw integer.
    #[test]
    fn token_id_roundtrip_and_order(a in 0u64..u64::MAX - 1, b in 0u64..u64::MAX - 1) {
        let ta = TokenId::new(a);
        let tb = TokenId::new(b);
        prop_assert_eq!(ta < tb, a < b);
        let decoded: TokenId = bincode::deserialize(&bincode::serialize(&ta).unwrap()).unwrap();
        prop_assert_eq!(decoded, ta);
    }

    /// RewardAmount whole-token conversion never loses whole tokens.
    #[test]
    fn reward_amount_whole_conversion(tokens in 0u64..1_000_000_000) {
        let amount = RewardAmount::from_whole(tokens);
        prop_assert_eq!(amount.whole(), tokens as u128);
    }

    /// Accrual is monotone in elapsed time (before the end of the program).
    #[test]
    fn accrual_monotonic(
        rate in 0u128..1_000_000_000_000,
        start in 0u64..1_000_000,
        d1 in 0u64..1_000_000,
        d2 in 0u64..1_000_000,
    ) {
        let p = YieldParams::new(rate, Timestamp::new(u64::MAX));
        let checkpoint = Timestamp::new(start);
        let a1 = p.accrual_between(checkpoint, Timestamp::new(start + d1)).unwrap();
        let a2 = p.accrual_between(checkpoint, Timestamp::new(start + d1 + d2)).unwrap();
        prop_assert!(a2 >= a1);
    }

    /// Accrual computed at any time past the end equals accrual at the end.
    #[test]
    fn accrual_frozen_past_end(
        rate in 0u128..1_000_000_000_000,
        start in 0u64..1_000_000,
        program_days in 1u64..1_000,
        dead_days in 1u64..1_000,
    ) {
        let end = Timestamp::new(start).plus_days(program_days);
        let p = YieldParams::new(rate, end);
        let checkpoint = Timestamp::new(start);
        let at_end = p.accrual_between(checkpoint, end).unwrap();
        let past_end = p.accrual_between(checkpoint, end.plus_days(dead_days)).unwrap();
        prop_assert_eq!(at_end, past_end);
    }

    /// Whole-day accrual matches days × rate exactly.
    #[test]
    fn accrual_whole_days_exact(
        rate in 0u128..1_000_000_000_000_000_000_000,
        days in 0u64..10_000,
    ) {
        let p = YieldParams::new(rate, Timestamp::new(u64::MAX));
        let start = Timestamp::new(SECS_PER_DAY); // arbitrary non-zero origin
        let accrued = p.accrual_between(start, start.plus_days(days)).unwrap();
        prop_assert_eq!(accrued, rate * days as u128);
    }
}
