use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use pegbank_bank::{
    AccountStore, AssetPeg, Bank, BranchStore, Context, InMemoryAccountStore, InfiniteGasMeter,
    Input, Keeper, Output, SendBank,
};
use pegbank_core::{AccountAddress, Coins, PegHash};

fn addr(i: u32) -> AccountAddress {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&i.to_be_bytes());
    bytes[19] = 1;
    AccountAddress::new(bytes)
}

fn coins(s: &str) -> Coins {
    s.parse().expect("valid coins literal")
}

fn funded_store(keeper: &Keeper, accounts: u32, amt: &str) -> InMemoryAccountStore {
    let store = InMemoryAccountStore::new();
    let mut meter = InfiniteGasMeter::new();
    let mut ctx = Context::new(&store, &mut meter);
    for i in 0..accounts {
        keeper
            .set_coins(&mut ctx, &addr(i), coins(amt))
            .expect("seed balance");
    }
    store
}

fn bench_send_coins(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_coins");
    let keeper = Keeper::new();

    group.bench_function("direct", |b| {
        let store = funded_store(&keeper, 2, "1000000000atom,1000000000stake");
        let amt = coins("1atom,1stake");
        b.iter(|| {
            let mut meter = InfiniteGasMeter::new();
            let mut ctx = Context::new(&store, &mut meter);
            let _ = black_box(keeper.send_coins(&mut ctx, &addr(0), &addr(1), &amt));
        });
    });

    group.bench_function("through_branch", |b| {
        let store = funded_store(&keeper, 2, "1000000000atom,1000000000stake");
        let amt = coins("1atom,1stake");
        b.iter(|| {
            let branch = BranchStore::new(&store);
            {
                let mut meter = InfiniteGasMeter::new();
                let mut ctx = Context::new(&branch, &mut meter);
                let _ = black_box(keeper.send_coins(&mut ctx, &addr(0), &addr(1), &amt));
            }
            let _ = branch.commit();
        });
    });

    group.finish();
}

fn bench_input_output_coins(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_output_coins");
    let keeper = Keeper::new();

    for legs in [1u32, 8, 64].iter() {
        group.throughput(Throughput::Elements(*legs as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(legs), legs, |b, &legs| {
            let store = funded_store(&keeper, legs, "1000000000atom");
            let inputs: Vec<Input> = (0..legs).map(|i| Input::new(addr(i), coins("1atom"))).collect();
            let outputs: Vec<Output> = (0..legs)
                .map(|i| Output::new(addr(legs + i), coins("1atom")))
                .collect();
            b.iter(|| {
                let mut meter = InfiniteGasMeter::new();
                let mut ctx = Context::new(&store, &mut meter);
                let _ = black_box(keeper.input_output_coins(&mut ctx, &inputs, &outputs));
            });
        });
    }

    group.finish();
}

fn bench_issue_asset(c: &mut Criterion) {
    let mut group = c.benchmark_group("issue_asset");
    let keeper = Keeper::new();

    group.bench_function("pool_of_1000", |b| {
        b.iter_batched(
            || {
                let store = InMemoryAccountStore::new();
                let mut issuer = store.create(addr(0));
                issuer.set_asset_peg_wallet(
                    (0..1000u32)
                        .map(|i| AssetPeg::with_peg_hash(PegHash::new(i.to_be_bytes().to_vec())))
                        .collect(),
                );
                store.put(issuer).expect("seed pool");
                store
            },
            |store| {
                let mut meter = InfiniteGasMeter::new();
                let mut ctx = Context::new(&store, &mut meter);
                let _ = black_box(keeper.issue_asset(&mut ctx, &addr(0), &addr(1), AssetPeg::default()));
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_send_coins,
    bench_input_output_coins,
    bench_issue_asset
);
criterion_main!(benches);
