use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::grouping::domain::group::Group;
use crate::grouping::domain::observation::Observation;
use crate::shared::person::{Person, PersonId};
use crate::shared::pose::Pose;
use crate::shared::timestamp::Timestamp;

use super::error::DatasetError;
use super::json_file::read_json;

#[derive(Deserialize)]
struct RawFeatures {
    #[serde(default)]
    timestamp: Vec<f64>,
    #[serde(default)]
    features: Vec<Value>,
    #[serde(rename = "FoV", default)]
    fov: Option<[f64; 4]>,
}

/// Per-frame observations of a dataset (`features.json`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Features {
    pub observations: Vec<Observation>,
    /// Field of view of the recording, when the dataset provides one.
    pub fov: Option<[f64; 4]>,
}

impl Features {
    pub fn read(path: &Path) -> Result<Self, DatasetError> {
        Self::from_raw(read_json(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw = serde_json::from_str(json).map_err(|e| DatasetError::Format(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawFeatures) -> Result<Self, DatasetError> {
        if raw.timestamp.len() != raw.features.len() {
            return Err(DatasetError::Format(format!(
                "{} timestamps but {} feature frames",
                raw.timestamp.len(),
                raw.features.len()
            )));
        }
        let observations = raw
            .timestamp
            .iter()
            .zip(&raw.features)
            .map(|(time, frame)| Ok(Observation::new(Timestamp::new(*time), read_frame(frame)?)))
            .collect::<Result<Vec<_>, DatasetError>>()?;
        log::debug!("Read {} observations", observations.len());
        Ok(Self {
            observations,
            fov: raw.fov,
        })
    }
}

/// A frame is `[]`, a single person or a list of persons.
fn read_frame(frame: &Value) -> Result<Group, DatasetError> {
    let entries = match frame.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Ok(Group::default()),
    };
    if entries[0].is_array() {
        let persons = entries.iter().map(read_person).collect::<Result<Vec<_>, _>>()?;
        Ok(Group::new(persons))
    } else {
        Ok(Group::new(vec![read_person(frame)?]))
    }
}

/// `[id, x, y]` or `[id, x, y, rotation]`.
fn read_person(person: &Value) -> Result<Person, DatasetError> {
    let malformed = || DatasetError::Format(format!("person must be [id, x, y, (rotation)], got {person}"));
    let fields = person.as_array().ok_or_else(malformed)?;
    if !(3..=4).contains(&fields.len()) {
        return Err(malformed());
    }
    let id = read_id(&fields[0]).ok_or_else(malformed)?;
    let x = fields[1].as_f64().ok_or_else(malformed)?;
    let y = fields[2].as_f64().ok_or_else(malformed)?;
    let rotation = match fields.get(3) {
        Some(rotation) => Some(rotation.as_f64().ok_or_else(malformed)?),
        None => None,
    };
    Ok(Person::new(id, Pose::new((x, y).into(), rotation)))
}

/// Ids are strings or numbers.
pub(crate) fn read_id(id: &Value) -> Option<PersonId> {
    match id {
        Value::String(id) => Some(PersonId::new(id.as_str())),
        Value::Number(id) => Some(PersonId::new(id.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FEATURES: &str = r#"{
        "timestamp": [1.5, 2.5, 3.5],
        "features": [
            [],
            [1, 0.5, 1.0, 2.5],
            [["a", 0, 0], [2, 1.0, 2.0, -1.0]]
        ],
        "FoV": [0, 0, 10, 10]
    }"#;

    #[test]
    fn test_read_frames() {
        let features = Features::from_json(FEATURES).unwrap();
        assert_eq!(features.observations.len(), 3);
        assert_eq!(features.fov, Some([0.0, 0.0, 10.0, 10.0]));

        let empty = &features.observations[0];
        assert_eq!(empty.timestamp, Timestamp::new(1.5));
        assert!(empty.is_empty());

        let single = &features.observations[1];
        let person = single.group.get(&"1".into()).unwrap();
        assert_eq!(person.position(), (0.5, 1.0).into());
        assert_eq!(person.rotation(), Some(2.5));

        let two = &features.observations[2];
        assert_eq!(two.len(), 2);
        assert_eq!(two.group.get(&"a".into()).unwrap().rotation(), None);
        assert_eq!(two.group.get(&"2".into()).unwrap().rotation(), Some(-1.0));
    }

    #[test]
    fn test_missing_sections_mean_no_frames() {
        let features = Features::from_json("{}").unwrap();
        assert!(features.observations.is_empty());
        assert_eq!(features.fov, None);
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = Features::from_json(r#"{"timestamp": [1], "features": []}"#).unwrap_err();
        assert!(matches!(err, DatasetError::Format(_)));
    }

    #[test]
    fn test_person_with_too_few_fields() {
        let err = Features::from_json(r#"{"timestamp": [1], "features": [[1, 2]]}"#).unwrap_err();
        assert!(err.to_string().contains("person must be"));
    }

    #[test]
    fn test_person_with_too_many_fields() {
        let json = r#"{"timestamp": [1], "features": [[[1, 2, 3, 4, 5]]]}"#;
        assert!(Features::from_json(json).is_err());
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEATURES.as_bytes()).unwrap();
        let features = Features::read(file.path()).unwrap();
        assert_eq!(features.observations.len(), 3);
    }
}
