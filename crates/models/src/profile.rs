use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Gender {
    #[default]
    #[serde(rename = "MALE")]
    #[strum(to_string = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    #[strum(to_string = "FEMALE")]
    Female,
}

/// Faculty a lecturer belongs to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Faculty {
    #[default]
    #[serde(rename = "COMPUTER_SCIENCE")]
    #[strum(to_string = "COMPUTER_SCIENCE")]
    ComputerScience,
    #[serde(rename = "LANGUAGE")]
    #[strum(to_string = "LANGUAGE")]
    Language,
    // Stored with spaces, existing rows depend on it
    #[serde(rename = "FACULTY OF ECONOMIC")]
    #[strum(to_string = "FACULTY OF ECONOMIC")]
    Economic,
}
