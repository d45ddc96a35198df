use crate::config::CaseConfig;
use crate::model::{CaseLayout, SlotLayout};
use serde_json::{Value, json};

/// Serialize a layout as `{ kind, slots, extent, stats, config, ... }`.
/// Label rectangles are resolved to usable-area coordinates so consumers do not
/// need to repeat the label placement rules.
pub fn layout_to_json(layout: &CaseLayout, config: &CaseConfig) -> Value {
    let slots: Vec<Value> = layout
        .slots()
        .iter()
        .map(|s| {
            let label = s
                .label_rect(config.label_direction, config.divider_thickness)
                .map(|r| {
                    json!({
                        "x": r.x, "y": r.y, "w": r.w, "l": r.l,
                        "text": s.label_text,
                    })
                });
            json!({
                "x": s.x,
                "y": s.y,
                "w": s.width,
                "l": s.length,
                "h": s.height,
                "label": label,
            })
        })
        .collect();
    let (w, l) = layout.extent();
    let mut obj = serde_json::Map::new();
    match layout {
        CaseLayout::Grid(g) => {
            obj.insert("kind".into(), json!("grid"));
            obj.insert(
                "grid".into(),
                json!({
                    "cols": g.cols,
                    "rows": g.rows,
                    "cell": {"w": g.cell_width, "l": g.cell_length, "h": g.cell_height},
                    "rotated": g.rotated,
                }),
            );
        }
        CaseLayout::Mixed(m) => {
            obj.insert("kind".into(), json!("mixed"));
            obj.insert("rows".into(), json!(m.rows));
        }
    }
    obj.insert("slots".into(), Value::Array(slots));
    obj.insert("extent".into(), json!({"w": w, "l": l}));
    obj.insert("stats".into(), json!(layout.stats()));
    obj.insert("config".into(), json!(config));
    Value::Object(obj)
}
