use bvh_pose_converter::convert::convert_bvh_string;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

const BONES: [&str; 6] = ["Chest", "Neck", "Head", "LeftHip", "LeftKnee", "LeftAnkle"];

/// A single chain under Hips with `num_frames` frames of 3-channel motion.
fn synthetic_bvh(num_frames: usize) -> String {
    let mut bvh = String::from("HIERARCHY\nROOT Hips\n{\nOFFSET 0 90 0\nCHANNELS 6 Xposition Yposition Zposition Zrotation Yrotation Xrotation\n");
    for name in BONES {
        write!(bvh, "JOINT {}\n{{\nOFFSET 0 10 0\nCHANNELS 3 Zrotation Yrotation Xrotation\n", name).unwrap();
    }
    bvh.push_str("End Site\n{\nOFFSET 0 5 0\n}\n");
    for _ in 0..=BONES.len() {
        bvh.push_str("}\n");
    }

    write!(bvh, "MOTION\nFrames: {}\nFrame Time: 0.008333\n", num_frames).unwrap();
    for frame in 0..num_frames {
        let t = frame as f64;
        write!(bvh, "{:.4} 90.0 {:.4}", t * 0.1, t * 0.05).unwrap();
        for bone in 0..=BONES.len() {
            write!(bvh, " {:.4} {:.4} {:.4}", (t + bone as f64) % 360.0, t * 0.5 % 90.0, -t % 180.0).unwrap();
        }
        bvh.push('\n');
    }
    bvh
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let bvh = synthetic_bvh(600);

    let mut group = c.benchmark_group("sample-size-example");
    group.sample_size(10);
    group.bench_function("convert 600 frames", |b| {
        b.iter(|| convert_bvh_string(black_box(&bvh)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
