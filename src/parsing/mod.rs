use ndarray::Array1;
use std::path::PathBuf;
use thiserror::Error;

pub mod salaries;

/// Training data, one entry per dataset row in each column
pub struct Dataset {
    pub experience: Array1<f64>,
    pub salary: Array1<f64>,
}

impl Dataset {
    pub fn new(experience: Vec<f64>, salary: Vec<f64>) -> Dataset {
        Dataset {
            experience: Array1::from(experience),
            salary: Array1::from(salary),
        }
    }

    pub fn len(&self) -> usize {
        self.experience.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experience.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Data not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Dataset is missing the {0:?} column")]
    MissingColumn(&'static str),

    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Dataset has no rows")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
