pub mod batch;
pub mod config;
mod process;
mod types;

pub use batch::{default_workers, discover_plates, process_batch};
pub use config::{AlignConfig, AlignMode, AutoParams};
pub use process::{align_plate, output_file_name, process_plate};
pub use types::{BatchSummary, NoOpReporter, PlateAlignment, PlateReport, ProgressReporter};
