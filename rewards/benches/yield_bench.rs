use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hdn_access::Role;
use hdn_rewards::YieldEngine;
use hdn_types::{AccountAddress, Timestamp, TokenId, YieldParams, HDN_UNIT};

fn addr(n: u8) -> AccountAddress {
    AccountAddress::from_bytes(&[n; 20])
}

fn engine_with_tokens(token_count: u64) -> YieldEngine {
    let admin = addr(1);
    let collection = addr(2);
    let owner = addr(10);

    let mut engine = YieldEngine::new(admin.clone(), addr(0xEE));
    engine.grant_role(&admin, Role::Yield, &collection).unwrap();
    engine
        .set_yield_parameters(
            &admin,
            &collection,
            YieldParams::new(10 * HDN_UNIT, Timestamp::new(u64::MAX)),
        )
        .unwrap();
    for id in 0..token_count {
        engine
            .record_transfer(
                &collection,
                &collection,
                TokenId::new(id),
                None,
                &owner,
                Timestamp::new(id),
            )
            .unwrap();
    }
    engine
}

fn bench_pending_rewards(c: &mut Criterion) {
    let mut group = c.benchmark_group("pending_rewards");
    let collection = addr(2);
    let owner = addr(10);

    for token_count in [1u64, 10, 100, 1000] {
        let engine = engine_with_tokens(token_count);
        let now = Timestamp::new(token_count).plus_days(30);

        group.bench_with_input(
            BenchmarkId::new("pending_rewards_for", token_count),
            &token_count,
            |b, _| {
                b.iter(|| {
                    black_box(
                        engine
                            .pending_rewards_for(
                                black_box(&collection),
                                black_box(&owner),
                                black_box(now),
                            )
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_record_transfer(c: &mut Criterion) {
    let collection = addr(2);
    let owner = addr(10);
    let recipient = addr(11);

    c.bench_function("record_transfer", |b| {
        b.iter_batched(
            || engine_with_tokens(100),
            |mut engine| {
                engine
                    .record_transfer(
                        &collection,
                        &collection,
                        TokenId::new(50),
                        Some(&owner),
                        &recipient,
                        Timestamp::new(100).plus_days(30),
                    )
                    .unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_pending_rewards, bench_record_transfer);
criterion_main!(benches);
