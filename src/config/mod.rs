//! Runtime configuration shared by the CLI and the service.

mod duration;

pub use duration::parse_duration;

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Where the catalog and generated files live, and how runs behave.
#[derive(Args, Clone, Debug)]
pub struct DatagenOpts {
    /// Directory holding the schema and run catalog
    #[arg(long, default_value = ".csv-datagen", env = "DATAGEN_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory finished dataset files are stored in
    #[arg(long, default_value = "media", env = "DATAGEN_MEDIA_DIR")]
    pub media_dir: PathBuf,

    /// Pause between writing a dataset and storing it (e.g. "300ms", "2s")
    #[arg(long, default_value = "0", env = "DATAGEN_WRITE_DELAY", value_parser = parse_duration)]
    pub write_delay: Duration,
}
