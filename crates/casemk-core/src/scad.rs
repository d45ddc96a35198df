use crate::error::Result;
use crate::geometry::Shape;
use std::fs;
use std::path::Path;

/// Circle resolution used for rounded offsets and glyph curves.
pub const DEFAULT_FN: u32 = 64;

/// Render `shape` as OpenSCAD source with a header comment and `$fn`.
/// Output is deterministic for equal trees.
pub fn render_scad(shape: &Shape) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "// Generated by casemk {}\n$fn = {};\n\n",
        env!("CARGO_PKG_VERSION"),
        DEFAULT_FN
    ));
    write_node(&mut s, shape, 0);
    s
}

/// Render `shape` and write it to `path`.
pub fn write_scad(shape: &Shape, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, render_scad(shape))?;
    Ok(())
}

fn write_node(s: &mut String, shape: &Shape, depth: usize) {
    let pad = "  ".repeat(depth);
    match shape {
        Shape::Cube { size } => {
            s.push_str(&format!("{}cube({});\n", pad, vec3(size)));
        }
        Shape::Square { size } => {
            s.push_str(&format!(
                "{}square([{}, {}]);\n",
                pad,
                num(size[0]),
                num(size[1])
            ));
        }
        Shape::Text { text, size } => {
            s.push_str(&format!(
                "{}text(\"{}\", size = {}, halign = \"center\", valign = \"center\");\n",
                pad,
                scad_escape(text),
                num(*size)
            ));
        }
        Shape::Offset { r, child } => {
            s.push_str(&format!("{}offset(r = {})\n", pad, num(*r)));
            write_node(s, child, depth + 1);
        }
        Shape::LinearExtrude { height, child } => {
            s.push_str(&format!("{}linear_extrude(height = {})\n", pad, num(*height)));
            write_node(s, child, depth + 1);
        }
        Shape::Translate { v, child } => {
            s.push_str(&format!("{}translate({})\n", pad, vec3(v)));
            write_node(s, child, depth + 1);
        }
        Shape::Rotate { a, child } => {
            s.push_str(&format!("{}rotate({})\n", pad, vec3(a)));
            write_node(s, child, depth + 1);
        }
        Shape::Union { children } => write_block(s, "union", children, depth),
        Shape::Difference { children } => write_block(s, "difference", children, depth),
    }
}

fn write_block(s: &mut String, op: &str, children: &[Shape], depth: usize) {
    let pad = "  ".repeat(depth);
    s.push_str(&format!("{}{}() {{\n", pad, op));
    for c in children {
        write_node(s, c, depth + 1);
    }
    s.push_str(&format!("{}}}\n", pad));
}

fn vec3(v: &[f64; 3]) -> String {
    format!("[{}, {}, {}]", num(v[0]), num(v[1]), num(v[2]))
}

/// Fixed six decimals with trailing zeros trimmed; `-0` prints as `0`.
fn num(v: f64) -> String {
    let mut out = format!("{:.6}", v);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out == "-0" {
        out = "0".into();
    }
    out
}

fn scad_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
