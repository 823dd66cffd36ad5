pub mod csv;
pub mod dataset;

pub use csv::{load_csv, parse_csv, DatasetError};
pub use dataset::{split_frame, LabeledSplit};
