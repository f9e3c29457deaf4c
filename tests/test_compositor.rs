//! Tests for record compositing: which draw calls a record produces.

use mergeplate::rendering::{FontBook, TextRasterizer};
use mergeplate::{
    Alignment, MergeOptions, Point, Record, RecordCompositor, RowStore, Template, TextPainter,
    TextStyle,
};
use tiny_skia::Color;

#[derive(Debug, Clone, PartialEq)]
struct DrawCall {
    text: String,
    anchor: Point,
    alignment: Alignment,
    font_size: f32,
}

#[derive(Default)]
struct RecordingPainter {
    calls: Vec<DrawCall>,
}

impl TextPainter for RecordingPainter {
    fn draw_text(&mut self, text: &str, anchor: Point, alignment: Alignment, style: &TextStyle) {
        self.calls.push(DrawCall {
            text: text.to_string(),
            anchor,
            alignment,
            font_size: style.font.size,
        });
    }
}

fn compositor() -> RecordCompositor {
    RecordCompositor::with_rasterizer(MergeOptions::default(), TextRasterizer::new())
}

fn fixture_compositor() -> RecordCompositor {
    let mut book = FontBook::new();
    book.load_font_data(include_bytes!("fixtures/Tuffy.ttf").to_vec());
    RecordCompositor::with_font_book(MergeOptions::default(), &book)
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn paint(record: &Record, cols: &[String], width: u32) -> Vec<DrawCall> {
    let mut painter = RecordingPainter::default();
    let calls = compositor().paint_record(&mut painter, record, cols, width);
    assert_eq!(calls, painter.calls.len());
    painter.calls
}

mod well_known_slots {
    use super::*;

    #[test]
    fn test_one_call_per_truthy_field() {
        let cols = columns(&["broker", "name", "project name", "submit"]);
        let cases: Vec<(Record, usize)> = vec![
            (Record::new(), 0),
            (Record::new().with("broker", "Acme"), 1),
            (Record::new().with("broker", "Acme").with("submit", ""), 1),
            (Record::new().with("name", "Jane").with("submit", "1"), 2),
            (
                Record::new()
                    .with("broker", "Acme")
                    .with("name", "Jane")
                    .with("project name", "Widget")
                    .with("submit", "7"),
                4,
            ),
        ];
        for (record, expected) in cases {
            assert_eq!(paint(&record, &cols, 1000).len(), expected, "{:?}", record);
        }
    }

    #[test]
    fn test_fixed_positions() {
        let record = Record::new().with("broker", "Acme").with("name", "Jane");
        let calls = paint(&record, &columns(&["broker", "name"]), 1000);
        assert_eq!(calls[0].anchor, Point::new(530.0, 500.0));
        assert_eq!(calls[0].alignment, Alignment::Left);
        assert_eq!(calls[1].anchor, Point::new(220.0, 820.0));
        assert_eq!(calls[1].font_size, 240.0);
    }

    #[test]
    fn test_centered_slots_follow_canvas_width() {
        let record = Record::new().with("project name", "Widget").with("submit", "7");
        let cols = columns(&["project name", "submit"]);

        let calls = paint(&record, &cols, 1000);
        assert_eq!(calls[0].anchor, Point::new(500.0, 1000.0));
        assert_eq!(calls[1].anchor, Point::new(500.0, 1220.0));
        assert!(calls.iter().all(|c| c.alignment == Alignment::Centered));

        let calls = paint(&record, &cols, 801);
        assert_eq!(calls[0].anchor.x, 400.5);
    }

    #[test]
    fn test_submit_gets_prefix() {
        let record = Record::new().with("submit", "2024");
        let calls = paint(&record, &columns(&["submit"]), 1000);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "FYP2024");
    }

    #[test]
    fn test_case_insensitive_keys() {
        let record = Record::new()
            .with("BROKER", "Acme")
            .with("Project Name", "Widget");
        let calls = paint(&record, &columns(&["BROKER", "Project Name"]), 1000);
        let texts: Vec<_> = calls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Acme", "Widget"]);
    }

    #[test]
    fn test_draw_order_is_slot_order() {
        // Column order does not change slot order
        let record = Record::new()
            .with("submit", "1")
            .with("project name", "P")
            .with("name", "N")
            .with("broker", "B");
        let calls = paint(&record, &columns(&["submit", "project name", "name", "broker"]), 1000);
        let texts: Vec<_> = calls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["B", "N", "P", "FYP1"]);
    }
}

mod extra_fields {
    use super::*;

    #[test]
    fn test_stacking_follows_column_index() {
        let cols = columns(&["A", "B", "C"]);
        let record = Record::new().with("B", "2").with("C", "3");
        let calls = paint(&record, &cols, 1000);

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].text, "B: 2");
        assert_eq!(calls[0].anchor, Point::new(100.0, 350.0));
        assert_eq!(calls[1].text, "C: 3");
        assert_eq!(calls[1].anchor, Point::new(100.0, 400.0));
    }

    #[test]
    fn test_position_independent_of_other_values() {
        let cols = columns(&["A", "B", "C"]);
        let with_b = paint(&Record::new().with("B", "2").with("C", "3"), &cols, 1000);
        let without_b = paint(&Record::new().with("C", "3"), &cols, 1000);
        assert_eq!(with_b[1].anchor, without_b[0].anchor);
    }

    #[test]
    fn test_well_known_columns_occupy_indices() {
        let cols = columns(&["name", "email", "Submit", "phone"]);
        let record = Record::new()
            .with("name", "Jane")
            .with("email", "jane@example.com")
            .with("Submit", "9")
            .with("phone", "555");
        let calls = paint(&record, &cols, 1000);

        let extras: Vec<_> = calls.iter().filter(|c| c.font_size == 24.0).collect();
        assert_eq!(extras.len(), 2);
        assert_eq!(extras[0].text, "email: jane@example.com");
        assert_eq!(extras[0].anchor.y, 350.0);
        assert_eq!(extras[1].text, "phone: 555");
        assert_eq!(extras[1].anchor.y, 450.0);
    }

    #[test]
    fn test_extras_after_slots() {
        let cols = columns(&["email", "name"]);
        let record = Record::new().with("email", "e").with("name", "Jane");
        let calls = paint(&record, &cols, 1000);
        assert_eq!(calls[0].text, "Jane");
        assert_eq!(calls[1].text, "email: e");
    }

    #[test]
    fn test_only_listed_columns_render() {
        let record = Record::new().with("hidden", "x");
        assert!(paint(&record, &columns(&["shown"]), 1000).is_empty());
    }

    #[test]
    fn test_column_empty_in_first_record_is_not_stacked() {
        let rows = RowStore::new(vec![
            Record::new().with("name", "Jane").with("email", "").with("city", "Taipei"),
            Record::new()
                .with("name", "John")
                .with("email", "j@x.io")
                .with("city", "Tainan"),
        ]);
        assert_eq!(rows.columns(), &["name".to_string(), "city".to_string()]);

        let calls = paint(&rows.records()[1], rows.columns(), 1000);
        let texts: Vec<_> = calls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["John", "city: Tainan"]);
        assert_eq!(calls[1].anchor, Point::new(100.0, 350.0));
    }

    #[test]
    fn test_only_extras_without_well_known() {
        let cols = columns(&["broker", "name", "city", "team"]);
        let record = Record::new()
            .with("broker", "")
            .with("city", "Taipei")
            .with("team", "Blue");
        let calls = paint(&record, &cols, 1000);
        let texts: Vec<_> = calls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["city: Taipei", "team: Blue"]);
    }
}

mod canvas {
    use super::*;

    #[test]
    fn test_template_is_base_layer() {
        let template = Template::solid(10, 10, Color::from_rgba8(0, 128, 255, 255)).unwrap();
        let pixmap = compositor()
            .render_canvas(&Record::new(), &[], &template)
            .unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (10, 10));
        let px = pixmap.pixels()[55].demultiply();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (0, 128, 255, 255));
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let template = Template::solid(64, 64, Color::WHITE).unwrap();
        let record = Record::new().with("name", "Jane");
        let cols = columns(&["name"]);
        let compositor = fixture_compositor();
        let first = compositor.render_canvas(&record, &cols, &template).unwrap();
        let second = compositor.render_canvas(&record, &cols, &template).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_text_lands_on_template() {
        let template = Template::solid(1000, 1500, Color::WHITE).unwrap();
        let compositor = fixture_compositor();

        let blank = compositor.render_canvas(&Record::new(), &[], &template).unwrap();
        assert!(blank.pixels().iter().all(|p| p.demultiply().red() == 255));

        let record = Record::new().with("submit", "2024");
        let pixmap = compositor
            .render_canvas(&record, &columns(&["submit"]), &template)
            .unwrap();
        // Red fill near the submit baseline
        let red_rows = 1100..1230;
        let found = red_rows.into_iter().any(|y| {
            (0..1000).any(|x| {
                let c = pixmap.pixel(x, y).unwrap().demultiply();
                c.red() > 200 && c.green() < 60 && c.blue() < 60
            })
        });
        assert!(found);
    }
}
