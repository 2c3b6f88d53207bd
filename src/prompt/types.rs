use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Routine,
    #[serde(rename = "STAT")]
    Stat,
}

/// Radiographic projection(s) acquired for the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Views {
    #[default]
    #[serde(rename = "PA")]
    Pa,
    #[serde(rename = "AP")]
    Ap,
    Lateral,
    #[serde(rename = "PA+Lateral")]
    PaLateral,
    #[serde(rename = "AP Portable")]
    ApPortable,
}

/// Clinical context and section toggles for one report prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(default)]
    pub age: String,
    pub sex: Sex,
    #[serde(default)]
    pub history: String,
    pub priority: Priority,
    pub views: Views,
    #[serde(default)]
    pub include_differential: bool,
    #[serde(default)]
    pub include_severity: bool,
    #[serde(default)]
    pub include_recommendations: bool,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Routine => "Routine",
            Self::Stat => "STAT",
        })
    }
}

impl fmt::Display for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pa => "PA",
            Self::Ap => "AP",
            Self::Lateral => "Lateral",
            Self::PaLateral => "PA+Lateral",
            Self::ApPortable => "AP Portable",
        })
    }
}
