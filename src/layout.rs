//! Layout slots: where and how each field is drawn on the template.
//!
//! The four well-known columns (`broker`, `name`, `project name`, `submit`)
//! each own a fixed [`Slot`]. Every other column is an "extra field" drawn as
//! `"{column}: {value}"` in a left-aligned stack, one line per column index.

use tiny_skia::Color;

/// Font families tried first for every style.
pub const DEFAULT_FONT_FAMILIES: &[&str] = &["Noto Sans TC"];

/// The well-known fields that have a dedicated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// `broker` column
    Broker,
    /// `name` column
    Name,
    /// `project name` column
    ProjectName,
    /// `submit` column, rendered with an `FYP` prefix
    Submit,
}

impl SlotKind {
    /// All slots in draw order.
    pub const ALL: [SlotKind; 4] = [
        SlotKind::Broker,
        SlotKind::Name,
        SlotKind::ProjectName,
        SlotKind::Submit,
    ];

    /// Lowercase column name bound to this slot.
    pub fn column_name(self) -> &'static str {
        match self {
            SlotKind::Broker => "broker",
            SlotKind::Name => "name",
            SlotKind::ProjectName => "project name",
            SlotKind::Submit => "submit",
        }
    }

    /// Map a raw column name to its slot, ignoring case.
    pub fn from_column_name(column: &str) -> Option<SlotKind> {
        let lower = column.to_lowercase();
        Self::ALL.into_iter().find(|k| k.column_name() == lower)
    }

    /// Text drawn for a cell value in this slot.
    pub fn display_text(self, value: &str) -> String {
        match self {
            SlotKind::Submit => format!("FYP{}", value),
            _ => value.to_string(),
        }
    }
}

/// Horizontal alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// The anchor is the left edge of the run
    #[default]
    Left,
    /// The run is centered on the anchor
    Centered,
}

impl Alignment {
    /// X coordinate at which a run of `width` pixels starts.
    pub fn origin_x(self, anchor_x: f32, width: f32) -> f32 {
        match self {
            Alignment::Left => anchor_x,
            Alignment::Centered => anchor_x - width / 2.0,
        }
    }
}

/// A point in canvas pixels. `y` is a text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position
    pub x: f32,
    /// Baseline position
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Font family list, weight and pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Family names in priority order
    pub families: Vec<String>,
    /// CSS-style weight (400 regular, 700 bold)
    pub weight: u16,
    /// Pixel size (em height)
    pub size: f32,
}

impl FontSpec {
    /// Regular weight in the default families.
    pub fn regular(size: f32) -> Self {
        Self {
            families: DEFAULT_FONT_FAMILIES.iter().map(|f| f.to_string()).collect(),
            weight: 400,
            size,
        }
    }

    /// Bold weight in the default families.
    pub fn bold(size: f32) -> Self {
        Self {
            weight: 700,
            ..Self::regular(size)
        }
    }

    /// Key identifying the face independent of size.
    pub fn face_key(&self) -> FaceKey {
        FaceKey {
            families: self.families.clone(),
            weight: self.weight,
        }
    }
}

/// Face lookup key: family list and weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceKey {
    /// Family names in priority order
    pub families: Vec<String>,
    /// CSS-style weight
    pub weight: u16,
}

/// Colors, stroke width and font for one text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Glyph fill color
    pub fill: Color,
    /// Outline color
    pub stroke: Color,
    /// Outline width in pixels; `<= 0` draws no outline
    pub stroke_width: f32,
    /// Font used to shape and draw the run
    pub font: FontSpec,
}

/// Horizontal anchor of a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotAnchor {
    /// Fixed x coordinate, left-anchored text
    Fixed(f32),
    /// Centered on the canvas' horizontal midpoint
    CanvasCenter,
}

/// Static draw specification for a well-known field.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Field this slot renders
    pub kind: SlotKind,
    /// Horizontal anchor
    pub anchor: SlotAnchor,
    /// Baseline y coordinate
    pub baseline: f32,
    /// Text style
    pub style: TextStyle,
}

impl Slot {
    /// Anchor point and alignment on a canvas of the given width.
    pub fn resolve(&self, canvas_width: u32) -> (Point, Alignment) {
        match self.anchor {
            SlotAnchor::Fixed(x) => (Point::new(x, self.baseline), Alignment::Left),
            SlotAnchor::CanvasCenter => (
                Point::new(canvas_width as f32 / 2.0, self.baseline),
                Alignment::Centered,
            ),
        }
    }
}

/// Placement of the extra-field stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraFieldStyle {
    /// Left edge of every line
    pub x: f32,
    /// Baseline of column index 0
    pub top: f32,
    /// Vertical distance between consecutive column indices
    pub line_step: f32,
    /// Text style shared by all lines
    pub style: TextStyle,
}

impl ExtraFieldStyle {
    /// Anchor of the line for the column at `column_index`.
    pub fn anchor(&self, column_index: usize) -> Point {
        Point::new(self.x, self.top + column_index as f32 * self.line_step)
    }
}

/// Full layout: the well-known slots plus the extra-field stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Slots in draw order
    pub slots: Vec<Slot>,
    /// Style of the extra-field stack
    pub extra_fields: ExtraFieldStyle,
}

impl Layout {
    /// Slot bound to a well-known field, if configured.
    pub fn slot(&self, kind: SlotKind) -> Option<&Slot> {
        self.slots.iter().find(|s| s.kind == kind)
    }

    /// Every font used by the layout.
    pub fn fonts(&self) -> impl Iterator<Item = &FontSpec> {
        self.slots
            .iter()
            .map(|s| &s.style.font)
            .chain(std::iter::once(&self.extra_fields.style.font))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            slots: vec![
                Slot {
                    kind: SlotKind::Broker,
                    anchor: SlotAnchor::Fixed(530.0),
                    baseline: 500.0,
                    style: TextStyle {
                        fill: Color::BLACK,
                        stroke: Color::WHITE,
                        stroke_width: 8.0,
                        font: FontSpec::bold(130.0),
                    },
                },
                Slot {
                    kind: SlotKind::Name,
                    anchor: SlotAnchor::Fixed(220.0),
                    baseline: 820.0,
                    style: TextStyle {
                        fill: Color::from_rgba8(0xFF, 0xD7, 0x00, 0xFF),
                        stroke: Color::BLACK,
                        stroke_width: 10.0,
                        font: FontSpec::bold(240.0),
                    },
                },
                Slot {
                    kind: SlotKind::ProjectName,
                    anchor: SlotAnchor::CanvasCenter,
                    baseline: 1000.0,
                    style: TextStyle {
                        fill: Color::BLACK,
                        stroke: Color::WHITE,
                        stroke_width: 5.0,
                        font: FontSpec::bold(90.0),
                    },
                },
                Slot {
                    kind: SlotKind::Submit,
                    anchor: SlotAnchor::CanvasCenter,
                    baseline: 1220.0,
                    style: TextStyle {
                        fill: Color::from_rgba8(0xFF, 0x00, 0x00, 0xFF),
                        stroke: Color::WHITE,
                        stroke_width: 8.0,
                        font: FontSpec::bold(130.0),
                    },
                },
            ],
            extra_fields: ExtraFieldStyle {
                x: 100.0,
                top: 300.0,
                line_step: 50.0,
                style: TextStyle {
                    fill: Color::BLACK,
                    stroke: Color::WHITE,
                    stroke_width: 2.0,
                    font: FontSpec::regular(24.0),
                },
            },
        }
    }
}
