//! Content types shared by the cache, the grid layout and the engine
//!
//! Records mirror the CMS document shape (camelCase JSON) so hosts can hand
//! query results straight to [`crate::cache::ContentCache::seed`].

use serde::{Deserialize, Serialize};

/// URL-safe project identifier
pub type Slug = String;

/// Query value reserved for the static information page
pub const INFORMATION_SLUG: &str = "information";

/// Tile size class authored per project
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Large,
    #[default]
    Medium,
    Small,
}

impl SizeClass {
    /// Width multiplier applied to the tile's aspect ratio in row fitting
    pub fn weight(self) -> f32 {
        match self {
            SizeClass::Large => 1.0,
            SizeClass::Medium => 0.85,
            SizeClass::Small => 0.7,
        }
    }
}

/// Kind of a gallery media entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One entry of a project's media gallery
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Stable key for list rendering
    pub key: String,
    #[serde(default)]
    pub aspect_ratio: Option<f32>,
    /// Streaming playback id (videos only)
    #[serde(default)]
    pub playback_id: Option<String>,
}

/// Grid-level project data (the "fetch all" listing)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub year: u16,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tile_size: SizeClass,
    #[serde(default)]
    pub cover_aspect_ratio: Option<f32>,
}

/// Full detail record displayed in the detail surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub year: u16,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tile_size: SizeClass,
    #[serde(default)]
    pub cover_aspect_ratio: Option<f32>,
    /// Prefix for media labels (`AB` -> `AB_01`)
    #[serde(default)]
    pub project_code: Option<String>,
    /// Caption flattened to plain text
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl ProjectRecord {
    /// Minimal record; optional fields empty, medium tile
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<Slug>, year: u16) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            year,
            role: None,
            tile_size: SizeClass::default(),
            cover_aspect_ratio: None,
            project_code: None,
            caption: None,
            media: Vec::new(),
        }
    }

    /// Grid-level view of this record
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            year: self.year,
            role: self.role.clone(),
            tile_size: self.tile_size,
            cover_aspect_ratio: self.cover_aspect_ratio,
        }
    }
}

/// Something the user can navigate to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A project detail record, fetched by slug
    Project(Slug),
    /// The static information page (never fetched)
    Information,
}

impl Target {
    /// Interpret a query value, mapping the information sentinel
    pub fn parse(value: &str) -> Self {
        if value == INFORMATION_SLUG {
            Target::Information
        } else {
            Target::Project(value.to_string())
        }
    }

    /// Value written to the query parameter
    pub fn as_query_value(&self) -> &str {
        match self {
            Target::Project(slug) => slug,
            Target::Information => INFORMATION_SLUG,
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::parse(value)
    }
}

/// What the detail surface currently displays
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Grid only
    #[default]
    None,
    Project(Slug),
    Information,
}

impl Selection {
    /// Build from the observed query parameter
    pub fn from_param(param: Option<Target>) -> Self {
        match param {
            None => Selection::None,
            Some(target) => target.into(),
        }
    }

    /// The query parameter that represents this selection
    pub fn to_param(&self) -> Option<Target> {
        match self {
            Selection::None => None,
            Selection::Project(slug) => Some(Target::Project(slug.clone())),
            Selection::Information => Some(Target::Information),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Slug of the selected project, if any
    pub fn slug(&self) -> Option<&str> {
        match self {
            Selection::Project(slug) => Some(slug),
            _ => None,
        }
    }

    /// Check whether this selection shows the given target
    pub fn shows(&self, target: &Target) -> bool {
        match (self, target) {
            (Selection::Project(a), Target::Project(b)) => a == b,
            (Selection::Information, Target::Information) => true,
            _ => false,
        }
    }
}

impl From<Target> for Selection {
    fn from(target: Target) -> Self {
        match target {
            Target::Project(slug) => Selection::Project(slug),
            Target::Information => Selection::Information,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse_information_sentinel() {
        assert_eq!(Target::parse("information"), Target::Information);
        assert_eq!(
            Target::parse("harbour"),
            Target::Project("harbour".to_string())
        );
        assert_eq!(Target::Information.as_query_value(), "information");
    }

    #[test]
    fn test_selection_param_conversion() {
        assert_eq!(Selection::from_param(None), Selection::None);
        let sel = Selection::from_param(Some(Target::parse("harbour")));
        assert_eq!(sel.slug(), Some("harbour"));
        assert_eq!(sel.to_param(), Some(Target::Project("harbour".to_string())));
        assert!(sel.shows(&Target::parse("harbour")));
        assert!(!sel.shows(&Target::Information));
    }

    #[test]
    fn test_record_deserializes_cms_shape() {
        let json = r#"{
            "id": "p1",
            "title": "Harbour",
            "slug": "harbour",
            "year": 2023,
            "tileSize": "large",
            "coverAspectRatio": 1.78,
            "projectCode": "HB",
            "media": [
                { "kind": "image", "key": "m1", "aspectRatio": 1.5 },
                { "kind": "video", "key": "m2", "playbackId": "abc" }
            ]
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tile_size, SizeClass::Large);
        assert_eq!(record.media.len(), 2);
        assert_eq!(record.media[1].playback_id.as_deref(), Some("abc"));
        assert_eq!(record.summary().slug, "harbour");
    }

    #[test]
    fn test_size_class_defaults_to_medium() {
        let json = r#"{ "id": "p2", "title": "Dunes", "slug": "dunes", "year": 2021 }"#;
        let summary: ProjectSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.tile_size, SizeClass::Medium);
        assert!((summary.tile_size.weight() - 0.85).abs() < 1e-6);
    }
}
