use crate::nace::NaceCode;
use std::path::PathBuf;

const DATA_DIR: &str = "bce_mai_2025";
const INPUT_FILE: &str = "activity.csv";

/// Where a run reads its input and writes its output.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(INPUT_FILE)
    }

    pub fn output_file_name(code: &NaceCode) -> String {
        format!("filtre_{code}.csv")
    }

    pub fn output_path(&self, code: &NaceCode) -> PathBuf {
        self.output_dir.join(Self::output_file_name(code))
    }
}
