//! Whole-application state: the `App` value and its parts.

use crate::camera::Camera;
use crate::shapes::{SerializableColor, Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// Named pen colors offered by the UI chrome.
pub mod palette {
    use crate::shapes::SerializableColor;

    pub const BLACK: SerializableColor = SerializableColor::new(0x00, 0x00, 0x00, 0xFF);
    pub const WHITE: SerializableColor = SerializableColor::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const GRAY: SerializableColor = SerializableColor::new(0x80, 0x80, 0x80, 0xFF);
    pub const RED: SerializableColor = SerializableColor::new(0xFF, 0x40, 0x40, 0xFF);
    pub const ORANGE: SerializableColor = SerializableColor::new(0xFF, 0x80, 0x00, 0xFF);
    pub const YELLOW: SerializableColor = SerializableColor::new(0xFF, 0xFF, 0x00, 0xFF);
    pub const GREEN: SerializableColor = SerializableColor::new(0x00, 0xFF, 0x00, 0xFF);
    pub const BLUE: SerializableColor = SerializableColor::new(0x40, 0x40, 0xFF, 0xFF);
    pub const PURPLE: SerializableColor = SerializableColor::new(0xC0, 0x00, 0xC0, 0xFF);
}

/// The user's selected tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Freehand,
    Erase,
}

/// The live gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    #[default]
    Idle,
    DrawingFreehand,
    Erasing,
}

/// Drawn content: shapes in z-order plus the selection and hover sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Insertion order is z-order (back to front).
    pub shapes: Vec<Shape>,
    pub selected_ids: Vec<ShapeId>,
    pub hovered_ids: Vec<ShapeId>,
}

/// Active drawing style and appearance preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub pen_color: SerializableColor,
    pub pen_size: f64,
    pub eraser_size: f64,
    pub is_dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pen_color: palette::WHITE,
            pen_size: 4.0,
            eraser_size: 8.0,
            is_dark_mode: false,
        }
    }
}

/// Partial theme update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemePatch {
    pub pen_color: Option<SerializableColor>,
    pub pen_size: Option<f64>,
    pub eraser_size: Option<f64>,
    pub is_dark_mode: Option<bool>,
}

impl Theme {
    /// Apply a partial update, returning the merged theme.
    pub fn merged(self, patch: ThemePatch) -> Self {
        Self {
            pen_color: patch.pen_color.unwrap_or(self.pen_color),
            pen_size: patch.pen_size.unwrap_or(self.pen_size),
            eraser_size: patch.eraser_size.unwrap_or(self.eraser_size),
            is_dark_mode: patch.is_dark_mode.unwrap_or(self.is_dark_mode),
        }
    }
}

/// Session metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Meta {
    pub locked: bool,
}

/// Partial metadata update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaPatch {
    pub locked: Option<bool>,
}

impl Meta {
    pub fn merged(self, patch: MetaPatch) -> Self {
        Self {
            locked: patch.locked.unwrap_or(self.locked),
        }
    }
}

/// The whole-state unit the engine commits, observes, and mirrors remotely.
///
/// Subscribers only ever see fully-formed `App` values; no partial field
/// update is observable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct App {
    pub status: Status,
    pub action: Action,
    pub camera: Camera,
    pub content: Content,
    pub theme: Theme,
    pub meta: Meta,
}

impl App {
    /// The shape currently being edited, if a gesture is in progress.
    pub fn editing_shape(&self) -> Option<&Shape> {
        self.content.shapes.iter().find(|s| s.editing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let app = App::default();
        assert_eq!(app.status, Status::Freehand);
        assert_eq!(app.action, Action::Idle);
        assert!(app.content.shapes.is_empty());
        assert!(!app.meta.locked);
        assert_eq!(app.theme.pen_color, palette::WHITE);
        assert!((app.theme.pen_size - 4.0).abs() < f64::EPSILON);
        assert!((app.theme.eraser_size - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_theme_patch_merges() {
        let theme = Theme::default().merged(ThemePatch {
            pen_color: Some(palette::RED),
            is_dark_mode: Some(true),
            ..Default::default()
        });
        assert_eq!(theme.pen_color, palette::RED);
        assert!(theme.is_dark_mode);
        assert!((theme.pen_size - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&Status::Freehand).unwrap(),
            "\"FREEHAND\""
        );
        assert_eq!(
            serde_json::to_string(&Action::DrawingFreehand).unwrap(),
            "\"DRAWING_FREEHAND\""
        );
    }

    #[test]
    fn test_app_roundtrip() {
        let app = App::default();
        let json = serde_json::to_string(&app).unwrap();
        let back: App = serde_json::from_str(&json).unwrap();
        assert_eq!(app, back);
    }
}
