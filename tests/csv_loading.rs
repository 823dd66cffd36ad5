use std::path::PathBuf;

use ferrite_digits::data::dataset::split_frame;
use ferrite_digits::{load_csv, DatasetError, NetworkShape, Shape, TwoLayerNetwork};

/// A CSV file in the temp dir, removed on drop.
struct TempCsv(PathBuf);

impl TempCsv {
    fn new(name: &str, contents: &str) -> TempCsv {
        let path = std::env::temp_dir().join(format!(
            "ferrite-digits-{}-{}.csv",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        TempCsv(path)
    }
}

impl Drop for TempCsv {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn digit_csv(samples: usize, pixels: usize) -> String {
    let mut out = String::from("label");
    for p in 0..pixels {
        out.push_str(&format!(",pixel{}", p));
    }
    out.push('\n');
    for s in 0..samples {
        out.push_str(&(s % 10).to_string());
        for p in 0..pixels {
            out.push_str(&format!(",{}", (s * 31 + p * 7) % 256));
        }
        out.push('\n');
    }
    out
}

#[test]
fn loads_splits_and_runs_forward() {
    let csv = TempCsv::new("pipeline", &digit_csv(8, 16));
    let frame = load_csv(&csv.0).unwrap();
    assert_eq!(frame.shape(), Shape::new(8, 17));

    let (dev, train) = split_frame(&frame, 3).unwrap();
    assert_eq!(dev.labels.shape(), Shape::new(1, 3));
    assert_eq!(dev.features.shape(), Shape::new(16, 3));
    assert_eq!(train.labels.shape(), Shape::new(1, 5));
    assert_eq!(train.features.shape(), Shape::new(16, 5));
    assert_eq!(dev.labels.row(0), Some(&[0.0, 1.0, 2.0][..]));

    let shape = NetworkShape { input_size: 16, hidden_size: 10, classes: 10 };
    let net = TwoLayerNetwork::random(shape, Some(3));
    let probs = net.forward(&train.features).unwrap();
    assert_eq!(probs.shape(), Shape::new(10, 5));
}

#[test]
fn missing_file_names_the_path() {
    let err = load_csv("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.csv"));
}

#[test]
fn malformed_cell_is_fatal() {
    let csv = TempCsv::new("malformed", "label,p0\n1,2\n3,abc\n");
    assert!(matches!(
        load_csv(&csv.0),
        Err(DatasetError::InvalidNumber { row: 3, col: 2, .. })
    ));
}
