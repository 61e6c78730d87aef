//! The three fixed record categories and their column names.

use serde::Serialize;
use std::fmt;

pub const COL_STATE: &str = "state";
pub const COL_DISTRICT: &str = "district";
pub const COL_DATE: &str = "date";

pub const COL_DEMO_AGE_5_17: &str = "demo_age_5_17";
pub const COL_DEMO_AGE_17: &str = "demo_age_17_";
pub const COL_BIO_AGE_5_17: &str = "bio_age_5_17";
pub const COL_BIO_AGE_17: &str = "bio_age_17_";
pub const COL_AGE_0_5: &str = "age_0_5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Biometric,
    Demographic,
    Enrolment,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Biometric,
        Category::Demographic,
        Category::Enrolment,
    ];

    /// Subdirectory of the dataset base path holding this category's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Biometric => "api_data_aadhar_biometric",
            Category::Demographic => "api_data_aadhar_demographic",
            Category::Enrolment => "api_data_aadhar_enrolment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Biometric => "Biometric",
            Category::Demographic => "Demographic",
            Category::Enrolment => "Enrolment",
        }
    }

    /// Numeric update-count columns carried by this category.
    pub fn count_columns(self) -> &'static [&'static str] {
        match self {
            Category::Biometric => &[COL_BIO_AGE_5_17, COL_BIO_AGE_17],
            Category::Demographic => &[COL_DEMO_AGE_5_17, COL_DEMO_AGE_17],
            Category::Enrolment => &[COL_AGE_0_5],
        }
    }

    /// Header of a table holding no files: the geographic columns, `date`
    /// where the category carries one, then the count columns.
    pub fn schema(self) -> Vec<&'static str> {
        let mut columns = vec![COL_STATE, COL_DISTRICT];
        if matches!(self, Category::Biometric | Category::Demographic) {
            columns.push(COL_DATE);
        }
        columns.extend_from_slice(self.count_columns());
        columns
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
