use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};

use probe_nn::{
    cost, decode, encode, evaluate, train_loop, ExampleSource, IdxStore, Network, Param,
    StepSchedule, TargetEncoding, TrainConfig,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("probe_nn_e2e_{}_{name}", std::process::id()))
}

/// Writes an IDX image/label pair of `count` 2x2 images.
fn write_idx_pair(count: u8) -> (PathBuf, PathBuf) {
    let mut images = Vec::new();
    for word in [0x0803u32, count as u32, 2, 2] {
        images.extend_from_slice(&word.to_be_bytes());
    }
    let mut labels = Vec::new();
    for word in [0x0801u32, count as u32] {
        labels.extend_from_slice(&word.to_be_bytes());
    }
    for i in 0..count {
        let label = i % 2;
        let pixels = if label == 0 { [255, 0, 0, 0] } else { [0, 0, 0, 255] };
        images.extend_from_slice(&pixels);
        labels.push(label);
    }

    let image_path = temp_path("images");
    let label_path = temp_path("labels");
    std::fs::write(&image_path, images).unwrap();
    std::fs::write(&label_path, labels).unwrap();
    (image_path, label_path)
}

#[test]
fn direct_affine_example() {
    let mut net = Network::create(2, 1, 0, &[]).unwrap();
    *net.param_mut(Param::Weight { layer: 0, neuron: 0, source: 0 }) = 0.5;
    *net.param_mut(Param::Weight { layer: 0, neuron: 0, source: 1 }) = 0.5;

    let out = evaluate(&[1.0, 1.0], &net).unwrap();

    assert_eq!(out, vec![1.0]);
    assert_eq!(cost(&out, &[1.0]), 0.0);
    assert_eq!(cost(&out, &[0.0]), 1.0);
}

#[test]
fn train_from_idx_store_then_reload() {
    let (image_path, label_path) = write_idx_pair(6);
    let mut store = IdxStore::open(image_path.to_str().unwrap(), label_path.to_str().unwrap()).unwrap();
    assert_eq!(store.len(), 6);

    let mut net = Network::create(4, 2, 1, &[3]).unwrap();
    net.fill_random(2024);
    let initial = net.clone();

    let config = TrainConfig::new(
        4,
        StepSchedule::Constant { value: 0.01 },
        TargetEncoding::Label,
    );
    let mut rng = StdRng::seed_from_u64(8);
    let report = train_loop(&mut net, &mut store, &mut rng, &config).unwrap().unwrap();

    assert_eq!(report.iteration, 3);
    assert_ne!(net, initial);

    let model_path = temp_path("network.bin");
    net.save(model_path.to_str().unwrap()).unwrap();
    let reloaded = Network::load(model_path.to_str().unwrap()).unwrap();

    assert_eq!(reloaded, net);
    let example = store.example(report.index.unwrap()).unwrap();
    assert_eq!(reloaded.forward(&example.input).unwrap(), report.output);

    for path in [image_path, label_path, model_path] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn mnist_sized_round_trip() {
    let mut net = Network::create(784, 10, 2, &[16, 16]).unwrap();
    net.fill_random(1);

    let bytes = encode(&net);
    let back = decode(&bytes).unwrap();

    assert_eq!(back, net);
    assert_eq!(back.topology().weight_count(), 784 * 16 + 16 * 16 + 16 * 10);
    assert_eq!(back.topology().bias_count(), 16 + 16 + 10);
    back.destroy();
}
