use std::sync::Arc;

use criterion::{BatchSize, Criterion, criterion_group};

use vehicle_stub::correlation::async_correlator::AsyncCorrelator;
use vehicle_stub::owner::owner::{AsyncResult, AsyncResultCallback, Owner};
use vehicle_stub::request::property::OperationKind;
use vehicle_stub::request::request_id::RequestId;

const SIZE: usize = 1024 * 1024;

struct NothingCallback {}

impl AsyncResultCallback for NothingCallback {
    fn on_results(&self, _: Vec<AsyncResult>) {}
}

fn register(criterion: &mut Criterion) {
    let owner = Owner::new(1, Arc::new(NothingCallback {}));

    let mut group = criterion.benchmark_group("async correlator register");

    group.bench_function("register without capacity", |bencher| {
        let correlator = AsyncCorrelator::new();

        bencher.iter_batched(
            || (0..SIZE).map(|index| index as RequestId).collect::<Vec<_>>(),
            |request_ids| {
                for request_id in request_ids {
                    correlator.register(request_id, request_id, OperationKind::Get, owner.clone());
                }
            },
            BatchSize::SmallInput
        );
    });
    group.bench_function("register with capacity", |bencher| {
        let correlator = AsyncCorrelator::new_with_capacity(SIZE);

        bencher.iter_batched(
            || (0..SIZE).map(|index| index as RequestId).collect::<Vec<_>>(),
            |request_ids| {
                for request_id in request_ids {
                    correlator.register(request_id, request_id, OperationKind::Get, owner.clone());
                }
            },
            BatchSize::SmallInput
        );
    });
    group.finish();
}

fn purge(criterion: &mut Criterion) {
    let owner = Owner::new(1, Arc::new(NothingCallback {}));
    let other_owner = Owner::new(2, Arc::new(NothingCallback {}));

    criterion.bench_function("async correlator purge half of the entries", |bencher| {
        bencher.iter_batched(
            || {
                let correlator = AsyncCorrelator::new_with_capacity(SIZE / 16);
                for request_id in 0..(SIZE / 16) as RequestId {
                    let entry_owner = if request_id % 2 == 0 { owner.clone() } else { other_owner.clone() };
                    correlator.register(request_id, request_id, OperationKind::Set, entry_owner);
                }
                correlator
            },
            |correlator| correlator.purge_for_owner(1),
            BatchSize::LargeInput
        );
    });
}

criterion_group!(benches, register, purge);
