use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Tracklist
// ---------------------------------------------------------------------------

/// One entry of an extracted tracklist.
///
/// `time` is display text produced by the backend (e.g. `"03:12"`) and is
/// never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

/// Parsed response of `GET /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Source label detected by the backend ("YouTube", "SoundCloud", or an
    /// extractor name). Opaque to the client.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    /// `None` when the field is missing or is not a well-formed sequence.
    #[serde(default, deserialize_with = "lenient_tracks")]
    pub tracks: Option<Vec<Track>>,
}

impl ProcessResult {
    /// True when the payload carries at least one track.
    pub fn has_tracks(&self) -> bool {
        self.tracks.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn tracks(&self) -> &[Track] {
        self.tracks.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn lenient_tracks<'de, D>(deserializer: D) -> Result<Option<Vec<Track>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload_in_order() {
        let body = r#"{"title":"Mix 1","type":"youtube","tracks":[
            {"time":"00:00","title":"Intro"},
            {"time":"03:12","title":"Track 2"}]}"#;
        let result: ProcessResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.title, "Mix 1");
        assert_eq!(result.kind, "youtube");
        let titles: Vec<&str> = result.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Intro", "Track 2"]);
        assert!(result.has_tracks());
    }

    #[test]
    fn missing_tracks_is_not_a_sequence() {
        let result: ProcessResult =
            serde_json::from_str(r#"{"title":"Set","type":"soundcloud"}"#).unwrap();
        assert_eq!(result.tracks, None);
        assert!(!result.has_tracks());
    }

    #[test]
    fn non_array_tracks_is_not_a_sequence() {
        let result: ProcessResult =
            serde_json::from_str(r#"{"title":"Set","type":"x","tracks":"nope"}"#).unwrap();
        assert_eq!(result.tracks, None);
    }

    #[test]
    fn malformed_track_element_drops_the_sequence() {
        let result: ProcessResult =
            serde_json::from_str(r#"{"title":"Set","type":"x","tracks":[1,2]}"#).unwrap();
        assert_eq!(result.tracks, None);
    }

    #[test]
    fn null_titles_decode_as_empty() {
        let result: ProcessResult = serde_json::from_str(
            r#"{"title":null,"type":"YouTube","tracks":[{"time":"00:00","title":null}]}"#,
        )
        .unwrap();
        assert_eq!(result.title, "");
        assert_eq!(result.tracks()[0].title, "");
        assert!(result.has_tracks());
    }

    #[test]
    fn serializes_kind_as_type() {
        let result = ProcessResult {
            title: "Set".into(),
            kind: "soundcloud".into(),
            tracks: Some(vec![]),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "soundcloud");
    }
}
