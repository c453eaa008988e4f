//! Team metadata used to decide which games are of interest.

use serde::{Deserialize, Serialize};

/// A team as listed by the provider's team directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Team {
    pub id: i64,
    pub school: String,
    #[serde(default)]
    pub mascot: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub classification: Option<String>,
}

impl Team {
    pub fn new(id: i64, school: &str, conference: Option<&str>) -> Self {
        Self {
            id,
            school: school.to_string(),
            mascot: None,
            abbreviation: None,
            conference: conference.map(str::to_string),
            classification: None,
        }
    }
}
