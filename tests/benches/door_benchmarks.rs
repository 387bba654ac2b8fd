//! # Doorkeeper Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Passcode validation | one TOTP check per enrolled key, fanned out |
//! | Policy evaluation | one range check per bound |
//! | Signed request verification | one HMAC per candidate app |

use chrono::{Local, NaiveDate, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dk_01_time_policy::Policy;
use dk_02_passcode_validator::{Key, KeySet, TotpSecret};
use dk_03_signed_request::{
    AuthorizedApp, FreshnessWindow, RequestSigner, RequestVerifier, SharedSecret,
};
use std::time::{Duration, UNIX_EPOCH};

// ============================================================================
// Passcode validation
// ============================================================================

fn bench_passcode_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("passcode-validation");
    let at = 1_460_108_220;
    let now = UNIX_EPOCH + Duration::from_secs(at);

    for size in [1, 10, 100, 1000] {
        let keys: Vec<_> = (0..size)
            .map(|i| Key::bare(format!("person-{}", i), TotpSecret::generate()))
            .collect();
        // Last key matches, so every key is checked
        let code = keys[size - 1].secret().generate_code(at).unwrap();
        let set = KeySet::new(keys, Duration::ZERO);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("validate", size), &size, |b, _| {
            b.iter(|| black_box(set.validate_at(&code, now).is_ok()))
        });
    }
    group.finish();
}

// ============================================================================
// Policy evaluation
// ============================================================================

fn bench_policy_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy-evaluation");
    let naive = NaiveDate::from_ymd_opt(2016, 4, 9)
        .unwrap()
        .and_hms_opt(9, 37, 0)
        .unwrap();
    let saturday = Local.from_local_datetime(&naive).earliest().unwrap();

    let text = "[Mon:Fri]08:00->20:30|[Sat:Sat]10:00->14:00|[Sun:Sun]12:00->13:00";
    group.bench_function("parse", |b| b.iter(|| black_box(Policy::parse(text))));

    let policy = Policy::parse(text).unwrap();
    group.bench_function("contains_time", |b| {
        b.iter(|| black_box(policy.contains_time(&saturday)))
    });
    group.finish();
}

// ============================================================================
// Signed request verification
// ============================================================================

fn bench_signed_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("signed-request");
    let when = 1_460_108_220;

    for size in [1, 10, 100] {
        let apps: Vec<_> = (0..size)
            .map(|i| {
                AuthorizedApp::new(
                    format!("app-{}", i),
                    SharedSecret::new(format!("key-{}", i).into_bytes()),
                )
            })
            .collect();
        // Signed by the last app, so every candidate is tried
        let last = SharedSecret::new(format!("key-{}", size - 1).into_bytes());
        let signed = RequestSigner::new(last).sign_unlock_at(3, when);
        let verifier = RequestVerifier::new(apps, FreshnessWindow::default());

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| {
                let tag = Some(signed.tag.as_str());
                black_box(verifier.verify(&signed.body, tag, when).is_ok())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_passcode_validation,
    bench_policy_evaluation,
    bench_signed_request
);
criterion_main!(benches);
