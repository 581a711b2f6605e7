//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers:
//! - Single net pay calculation
//! - Report build over batches of 100 and 1000 employees with history
//! - The `/detect` endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, DetectionRequest, create_router};
use payroll_engine::calculation::compute_net_pay;
use payroll_engine::config::{RuleTable, RulesLoader};
use payroll_engine::detection::build_report;
use payroll_engine::models::{Employee, HistoryRecord, PayPeriod};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const DEPARTMENTS: [&str; 4] = ["Engineering", "Sales", "Support", "Finance"];
const LOCATIONS: [&str; 4] = ["Mumbai", "Delhi", "Bengaluru", "Pune"];

fn load_rules() -> RuleTable {
    RulesLoader::load("./config/rules.yaml")
        .expect("Failed to load rules")
        .into_rules()
}

/// Creates a batch with a spread of departments, locations, and salaries.
fn create_batch(size: usize) -> Vec<Employee> {
    (0..size)
        .map(|i| Employee {
            employee_id: format!("emp_{:05}", i),
            name: format!("Employee {}", i),
            department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
            location: Some(LOCATIONS[(i / DEPARTMENTS.len()) % LOCATIONS.len()].to_string()),
            salary: Decimal::from(30000 + (i % 50) as i64 * 2000),
            bonus: Decimal::from((i % 7) as i64 * 1000),
            deductions: Decimal::from(2000),
        })
        .collect()
}

/// Six months of history for every employee in the batch, most recent first.
fn create_history(batch: &[Employee]) -> Vec<HistoryRecord> {
    batch
        .iter()
        .flat_map(|employee| {
            (0..6).map(move |month| HistoryRecord {
                employee_id: employee.employee_id.clone(),
                pay_period: PayPeriod::new(format!("2026-{:02}", 9 - month)),
                net_pay: employee.salary * Decimal::new(75, 2),
            })
        })
        .collect()
}

/// Benchmark: Single net pay calculation.
fn bench_single_net_pay(c: &mut Criterion) {
    let rules = load_rules();
    let employee = create_batch(1).remove(0);

    c.bench_function("single_net_pay", |b| {
        b.iter(|| black_box(compute_net_pay(black_box(&employee), &rules)))
    });
}

/// Benchmark: Report build over batches with full history.
fn bench_build_report(c: &mut Criterion) {
    let rules = load_rules();

    let mut group = c.benchmark_group("build_report");
    for size in [100usize, 1000] {
        let batch = create_batch(size);
        let history = create_history(&batch);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(build_report(
                    &batch,
                    &history,
                    &rules,
                    Some(PayPeriod::new("2026-10")),
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: The `/detect` endpoint with a 1000 employee batch.
fn bench_detect_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let batch = create_batch(1000);
    let history = create_history(&batch);
    let router = create_router(AppState::new(load_rules(), history));

    let body = serde_json::to_string(&DetectionRequest {
        employees: batch,
        history: None,
        pay_period: Some(PayPeriod::new("2026-10")),
    })
    .unwrap();

    let mut group = c.benchmark_group("detect_endpoint");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/detect")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_net_pay,
    bench_build_report,
    bench_detect_endpoint
);
criterion_main!(benches);
