use std::sync::Arc;
use std::thread;

use criterion::{Criterion, criterion_group};

use vehicle_stub::request::request_id::RequestIdGenerator;
use vehicle_stub::request::request_id_allocator::RequestIdAllocator;

const IDS_PER_THREAD: usize = 10_000;

fn next(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("request id allocator next");

    group.bench_function("single thread", |bencher| {
        let allocator = RequestIdAllocator::new();
        bencher.iter(|| allocator.next());
    });
    group.bench_function("four threads", |bencher| {
        let allocator = Arc::new(RequestIdAllocator::new());
        bencher.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let allocator = allocator.clone();
                    thread::spawn(move || {
                        for _ in 0..IDS_PER_THREAD {
                            allocator.next();
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });
    group.finish();
}

criterion_group!(benches, next);
