//! Batch preprocessing benchmarks
//!
//! Run with: cargo bench --package sequence

use std::sync::Arc;

use activity::ActivityRegistry;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pose_frame::{Frame, Keypoint, KeypointIndex as K, Pose};
use sequence::{worst_frame, EngineConfig, SequencePreprocessor};

/// Squat clip with a single descent and ascent plus a little jitter
fn squat_clip(len: usize) -> Vec<Frame> {
    (0..len)
        .map(|i| {
            let t = i as f64 / (len - 1) as f64;
            let depth = 1.0 - (2.0 * t - 1.0).abs();
            let jitter = 0.003 * ((i * 31) as f64 * 0.7).sin();
            let hip_y = 0.45 + 0.15 * depth + jitter;
            let mut pose = Pose::default();
            for kp in pose.keypoints.iter_mut() {
                *kp = Keypoint::new(0.5, 0.2, 0.9);
            }
            pose[K::LeftShoulder] = Keypoint::new(0.45, hip_y - 0.3, 0.9);
            pose[K::RightShoulder] = Keypoint::new(0.65, hip_y - 0.3, 0.9);
            pose[K::LeftHip] = Keypoint::new(0.40, hip_y, 0.9);
            pose[K::RightHip] = Keypoint::new(0.60, hip_y, 0.9);
            pose[K::LeftKnee] = Keypoint::new(0.32 + jitter, 0.60, 0.9);
            pose[K::RightKnee] = Keypoint::new(0.68 - jitter, 0.60, 0.9);
            pose[K::LeftAnkle] = Keypoint::new(0.30, 0.80, 0.9);
            pose[K::RightAnkle] = Keypoint::new(0.70, 0.80, 0.9);
            Frame::new(i as f64 / 30.0, pose)
        })
        .collect()
}

fn bench_preprocess(c: &mut Criterion) {
    let preprocessor = SequencePreprocessor::new(Arc::new(ActivityRegistry::new()), EngineConfig::default());
    let mut group = c.benchmark_group("Sequence Preprocessing");

    for &len in &[30usize, 150, 350] {
        let frames = squat_clip(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("squat", len), &frames, |b, frames| {
            b.iter(|| {
                let enriched = preprocessor
                    .preprocess(black_box(frames), "squat")
                    .unwrap_or_default();
                black_box(worst_frame(&enriched))
            })
        });
        group.bench_with_input(BenchmarkId::new("coverDrive", len), &frames, |b, frames| {
            b.iter(|| black_box(preprocessor.preprocess(black_box(frames), "coverDrive")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
