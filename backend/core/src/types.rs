use serde::{Deserialize, Serialize};

/// A vertex in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Four corners of a detected text region, in the order the OCR service
/// returned them (top-left, top-right, bottom-right, bottom-left by convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Build a quad from the first four points of a polygon.
    /// Returns `None` when fewer than four are available.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        match points {
            [a, b, c, d, ..] => Some(Self([*a, *b, *c, *d])),
            _ => None,
        }
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }
}

/// One line of recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quad: Option<Quad>,
}

/// An image handed to the OCR client.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl ExtractionRequest {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Text entries in the OCR service's reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub entries: Vec<TextEntry>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The recognized text of every entry, in order.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    /// Entries that carry a bounding quad.
    pub fn boxed(&self) -> impl Iterator<Item = &TextEntry> {
        self.entries.iter().filter(|e| e.quad.is_some())
    }
}

/// Item names recovered from a completion, in answer order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistillationResult {
    pub items: Vec<String>,
}

impl DistillationResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_takes_first_four_points() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i, i * 10)).collect();
        let quad = Quad::from_points(&pts).unwrap();
        assert_eq!(quad.points()[3], Point::new(3, 30));
    }

    #[test]
    fn quad_requires_four_points() {
        let pts = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert!(Quad::from_points(&pts).is_none());
    }

    #[test]
    fn result_accessors_keep_order() {
        let result = ExtractionResult {
            entries: vec![
                TextEntry { text: "Kimchi".into(), quad: None },
                TextEntry {
                    text: "Bibimbap".into(),
                    quad: Quad::from_points(&[Point::new(0, 0); 4]),
                },
            ],
        };
        assert_eq!(result.texts(), vec!["Kimchi", "Bibimbap"]);
        assert_eq!(result.boxed().count(), 1);
    }

    #[test]
    fn entry_serializes_quad_as_point_array() {
        let entry = TextEntry {
            text: "Tea".into(),
            quad: Quad::from_points(&[
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(3, 4),
                Point::new(1, 4),
            ]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["quad"][2]["x"], 3);
        assert_eq!(json["quad"].as_array().unwrap().len(), 4);
    }
}
