use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::id_group::IdGroup;
use crate::shared::timestamp::Timestamp;

use super::error::DatasetError;
use super::features::read_id;
use super::json_file::read_json;

#[derive(Deserialize)]
struct RawGroundTruth {
    #[serde(rename = "GTgroups")]
    groups: Vec<Value>,
    #[serde(rename = "GTtimestamp")]
    timestamps: Vec<f64>,
}

/// Annotated groups per frame (`groundtruth.json`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroundTruth {
    classifications: Vec<Classification>,
}

impl GroundTruth {
    pub fn new(classifications: Vec<Classification>) -> Self {
        Self { classifications }
    }

    pub fn read(path: &Path) -> Result<Self, DatasetError> {
        Self::from_raw(read_json(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw = serde_json::from_str(json).map_err(|e| DatasetError::Format(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawGroundTruth) -> Result<Self, DatasetError> {
        if raw.groups.len() != raw.timestamps.len() {
            return Err(DatasetError::Format(format!(
                "{} ground truth timestamps but {} group frames",
                raw.timestamps.len(),
                raw.groups.len()
            )));
        }
        let classifications = raw
            .timestamps
            .iter()
            .zip(&raw.groups)
            .map(|(time, frame)| {
                let groups = read_groups(frame)?;
                Ok(Classification::new(Timestamp::new(*time), groups)?)
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;
        let overlapping = classifications.iter().filter(|c| !c.is_disjoint()).count();
        if overlapping > 0 {
            log::warn!("{overlapping} ground truth frames contain overlapping groups");
        }
        Ok(Self { classifications })
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn len(&self) -> usize {
        self.classifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty()
    }

    /// The classification at `timestamp`: an exact match if there is one,
    /// otherwise the first within [`Timestamp::fuzzy_eq`].
    pub fn find_classification(&self, timestamp: Timestamp) -> Option<&Classification> {
        self.classifications
            .iter()
            .find(|c| c.timestamp() == timestamp)
            .or_else(|| {
                self.classifications
                    .iter()
                    .find(|c| c.timestamp().fuzzy_eq(&timestamp))
            })
    }
}

/// A frame is a list of groups; a group is a list of ids or a single id.
/// Empty groups are skipped.
fn read_groups(frame: &Value) -> Result<Vec<IdGroup>, DatasetError> {
    let groups = match frame {
        Value::Array(groups) => groups,
        Value::Null => return Ok(Vec::new()),
        other => return Err(DatasetError::Format(format!("expected a list of groups, got {other}"))),
    };
    let mut result = Vec::with_capacity(groups.len());
    for group in groups {
        let members: Vec<&Value> = match group {
            Value::Array(members) => members.iter().collect(),
            single => vec![single],
        };
        let ids = members
            .into_iter()
            .map(|id| {
                read_id(id).ok_or_else(|| DatasetError::Format(format!("invalid person id {id}")))
            })
            .collect::<Result<IdGroup, _>>()?;
        if !ids.is_empty() {
            result.push(ids);
        }
    }
    Ok(result)
}
