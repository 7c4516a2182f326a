// Pipeline benchmark - measure notification → MetricRecord conversion
//
// Covers the whole core path: unwrap the doubly-encoded oslo message,
// validate every payload entry and derive record identity.

use ceilo2metrics_core::{FailurePolicy, MetricPipeline};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value as JsonValue};

const COUNTER_NAMES: &[&str] = &[
    "cpu",
    "memory.usage",
    "disk.device.read.bytes",
    "network.incoming.packets.rate",
    "compute.instance.booting.time",
];

fn synthetic_test_case(entries: usize) -> JsonValue {
    let payload: Vec<JsonValue> = (0..entries)
        .map(|i| {
            json!({
                "source": "openstack",
                "counter_name": COUNTER_NAMES[i % COUNTER_NAMES.len()],
                "counter_type": "cumulative",
                "counter_unit": "B",
                "counter_volume": i * 1024,
                "project_id": "5dfb98560ce74cf780c21fb18a5ad1de",
                "resource_id": format!("instance-{:05}", i),
            })
        })
        .collect();

    let message = json!({
        "publisher_id": "telemetry.publisher.controller-0",
        "event_type": "metering",
        "payload": payload,
    });

    json!({"request": {"oslo.version": "2.0", "oslo.message": message.to_string()}})
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("ceilometer_pipeline");

    for entries in [1usize, 100, 10_000] {
        let test_case = synthetic_test_case(entries);
        group.throughput(Throughput::Elements(entries as u64));

        for policy in [FailurePolicy::AllOrNothing, FailurePolicy::Partial] {
            let pipeline = MetricPipeline::new(policy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), entries),
                &test_case,
                |b, test_case| {
                    b.iter(|| {
                        let outcome = pipeline.run(test_case).unwrap();
                        black_box(outcome);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
