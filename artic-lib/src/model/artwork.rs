//! Artwork record

use serde::Deserialize;
use serde::Deserializer;

/// One artwork record from the API.
///
/// Identity is the `id` alone; every other field is display data and may be
/// absent or null on the wire. The API sends numeric ids, but nothing in the
/// table core depends on that, so ids are normalized to strings on the way
/// in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artwork {
    /// Stable unique identifier.
    #[serde(deserialize_with = "id_from_wire")]
    pub id: String,

    /// Artwork title.
    #[serde(default)]
    pub title: Option<String>,

    /// Place the work originates from.
    #[serde(default)]
    pub place_of_origin: Option<String>,

    /// Display string for the artist.
    #[serde(default)]
    pub artist_display: Option<String>,

    /// Year the work was started.
    #[serde(default)]
    pub date_start: Option<i32>,

    /// Year the work was finished.
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Creates a record with the given id and no display fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            place_of_origin: None,
            artist_display: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the title (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Accepts an id as either a JSON number or a string.
fn id_from_wire<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Num(i64),
        Text(String),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::Num(n) => n.to_string(),
        Wire::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_is_normalized_to_string() {
        let artwork: Artwork =
            serde_json::from_str(r#"{"id": 129884, "title": "Starry Night and the Astronauts"}"#)
                .unwrap();
        assert_eq!(artwork.id, "129884");
        assert_eq!(artwork.title.as_deref(), Some("Starry Night and the Astronauts"));
    }

    #[test]
    fn string_id_passes_through() {
        let artwork: Artwork = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();
        assert_eq!(artwork.id, "abc-1");
    }

    #[test]
    fn null_and_missing_display_fields_deserialize() {
        let artwork: Artwork = serde_json::from_str(
            r#"{"id": 7, "title": null, "place_of_origin": "France", "date_start": -200}"#,
        )
        .unwrap();
        assert_eq!(artwork.title, None);
        assert_eq!(artwork.place_of_origin.as_deref(), Some("France"));
        assert_eq!(artwork.artist_display, None);
        assert_eq!(artwork.date_start, Some(-200));
        assert_eq!(artwork.date_end, None);
    }
}
