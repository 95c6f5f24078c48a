use entity_lines::{Entities, Entity, LabelList, LevelManager, LevelResolver, MonoMeasurer};
use entity_lines_render::{
    Direction, LevelScope, RenderEngine, RenderEngineOptions, RenderedDocument,
};

const TEXT: &str = "Barack Obama visited Paris in 2015.\r\nHe met Angela Merkel there.";

fn labels() -> LabelList {
    LabelList::measured([(1, "PER"), (2, "LOC"), (3, "DATE")], &MonoMeasurer::new(6.0))
}

fn entities() -> Entities {
    Entities::new(vec![
        Entity::new(10, 0, 12, 1),
        Entity::new(11, 7, 12, 1),
        Entity::new(12, 21, 26, 2),
        Entity::new(13, 30, 34, 3),
        Entity::new(14, 44, 57, 1),
    ])
}

fn render(width: f32, scope: LevelScope, direction: Direction) -> RenderedDocument {
    let opts = RenderEngineOptions {
        level_scope: scope,
        direction,
        ..RenderEngineOptions::for_width(width)
    };
    let engine = RenderEngine::new(opts).with_text_measurer(MonoMeasurer::shared(8.0));
    let mut levels = LevelManager::new();
    engine
        .render_document(TEXT, &entities(), &labels(), &mut levels)
        .expect("render should succeed")
}

#[test]
fn every_entity_character_is_drawn_once() {
    for width in [120.0, 200.0, 320.0, 2000.0] {
        let doc = render(width, LevelScope::PerLine, Direction::Ltr);
        for entity in entities().iter() {
            let drawn: usize = doc
                .lines
                .iter()
                .flat_map(|l| {
                    l.entities
                        .iter()
                        .filter(|g| g.entity.id == entity.id)
                        .map(move |g| {
                            let width: f32 = g.ranges.iter().map(|r| r.width()).sum();
                            (width / 8.0).round() as usize
                        })
                })
                .sum();
            assert_eq!(
                drawn,
                entity.end_offset - entity.start_offset,
                "width={} entity={}",
                width,
                entity.id
            );
        }
    }
}

#[test]
fn overlapping_entities_never_share_a_row() {
    for scope in [LevelScope::PerLine, LevelScope::PerDocument] {
        let doc = render(200.0, scope, Direction::Ltr);
        for line in &doc.lines {
            for (i, a) in line.entities.iter().enumerate() {
                for b in &line.entities[i + 1..] {
                    let collide = a.ranges.iter().any(|ra| {
                        b.ranges.iter().any(|rb| ra.x1 < rb.x2 && rb.x1 < ra.x2)
                    });
                    if collide {
                        assert_ne!(a.line_y, b.line_y, "{} vs {}", a.entity.id, b.entity.id);
                    }
                }
            }
        }
    }
}

#[test]
fn nested_entity_stacks_below_its_parent() {
    let doc = render(2000.0, LevelScope::PerLine, Direction::Ltr);
    let first = &doc.lines[0];
    let obama = first
        .entities
        .iter()
        .find(|g| g.entity.id == 11)
        .expect("nested entity on first line");
    let barack_obama = first
        .entities
        .iter()
        .find(|g| g.entity.id == 10)
        .expect("outer entity on first line");
    assert!(obama.line_y > barack_obama.line_y);
    assert!(obama.text_y > obama.line_y);
}

#[test]
fn rtl_render_mirrors_ranges_without_changing_levels() {
    let ltr = render(2000.0, LevelScope::PerLine, Direction::Ltr);
    let rtl = render(2000.0, LevelScope::PerLine, Direction::Rtl);
    assert_eq!(ltr.lines.len(), rtl.lines.len());
    for (l, r) in ltr.lines.iter().zip(&rtl.lines) {
        for (gl, gr) in l.entities.iter().zip(&r.entities) {
            assert_eq!(gl.entity, gr.entity);
            assert_eq!(gl.line_y, gr.line_y);
            let wl = gl.ranges.first().map(|x| x.width());
            let wr = gr.ranges.first().map(|x| x.width());
            assert_eq!(wl, wr);
        }
    }
}

#[test]
fn crlf_document_splits_into_two_lines() {
    let doc = render(2000.0, LevelScope::PerLine, Direction::Ltr);
    let windows: Vec<_> = doc.lines.iter().map(|l| l.line.range()).collect();
    assert_eq!(windows, vec![0..35, 37..64]);
    // "Angela Merkel" is at 44..57 in the document, 7..20 on its line.
    let merkel = &doc.lines[1].entities[0];
    assert_eq!(merkel.ranges.first().map(|r| r.x1), Some(7.0 * 8.0));
}

#[test]
fn golden_json_shape_for_drawing_layer() {
    let doc = render(2000.0, LevelScope::PerLine, Direction::Ltr);
    let json = doc.to_json().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
    let first = &value["lines"][0];
    assert_eq!(first["line"]["start_offset"], 0);
    assert_eq!(first["line"]["end_offset"], 35);
    let geo = &first["entities"][0];
    assert_eq!(geo["entity"]["id"], 10);
    assert_eq!(geo["entity"]["label"], 1);
    assert_eq!(geo["ranges"]["direction"], "ltr");
    assert_eq!(geo["ranges"]["items"][0]["x1"], 0.0);
    assert_eq!(geo["ranges"]["items"][0]["x2"], 96.0);
    assert_eq!(geo["line_y"], 2.0);
    assert_eq!(geo["text_y"], 15.0);
}

#[test]
fn levels_are_left_for_inspection_after_per_line_render() {
    let opts = RenderEngineOptions::for_width(2000.0);
    let engine = RenderEngine::new(opts).with_text_measurer(MonoMeasurer::shared(8.0));
    let mut levels = LevelManager::new();
    engine
        .render_document(TEXT, &entities(), &labels(), &mut levels)
        .expect("render");
    // The last pass covered line two only.
    assert_eq!(levels.fetch_level(14), Ok(0));
    assert!(levels.fetch_level(10).is_err());
}
