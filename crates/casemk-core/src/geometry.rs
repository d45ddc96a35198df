//! Solid-model expression tree.
//!
//! The assembler builds a [`Shape`] and a serializer (see [`crate::scad`]) walks it.
//! 2D shapes (`Square`, `Text`, `Offset` of a 2D shape) only become solids through
//! `LinearExtrude`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Shape {
    /// Box with its near corner at the origin.
    Cube { size: [f64; 3] },
    /// 2D rectangle with its near corner at the origin.
    Square { size: [f64; 2] },
    /// 2D outline of `text` centred on the origin; `size` is the glyph height.
    Text { text: String, size: f64 },
    /// Rounded 2D offset; negative `r` shrinks.
    Offset { r: f64, child: Box<Shape> },
    LinearExtrude { height: f64, child: Box<Shape> },
    Translate { v: [f64; 3], child: Box<Shape> },
    /// Rotation in degrees about X, Y, Z.
    Rotate { a: [f64; 3], child: Box<Shape> },
    Union { children: Vec<Shape> },
    /// First child minus all others.
    Difference { children: Vec<Shape> },
}

impl Shape {
    pub fn cube(w: f64, l: f64, h: f64) -> Self {
        Shape::Cube { size: [w, l, h] }
    }

    pub fn square(w: f64, l: f64) -> Self {
        Shape::Square { size: [w, l] }
    }

    /// Centred text outline.
    pub fn text(text: impl Into<String>, size: f64) -> Self {
        Shape::Text {
            text: text.into(),
            size,
        }
    }

    pub fn union(children: Vec<Shape>) -> Self {
        Shape::Union { children }
    }

    pub fn offset(self, r: f64) -> Self {
        Shape::Offset {
            r,
            child: Box::new(self),
        }
    }

    pub fn extrude(self, height: f64) -> Self {
        Shape::LinearExtrude {
            height,
            child: Box::new(self),
        }
    }

    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        Shape::Translate {
            v: [x, y, z],
            child: Box::new(self),
        }
    }

    pub fn rotate_z(self, degrees: f64) -> Self {
        Shape::Rotate {
            a: [0.0, 0.0, degrees],
            child: Box::new(self),
        }
    }

    /// `self` minus `other`.
    pub fn difference(self, other: Shape) -> Self {
        Shape::Difference {
            children: vec![self, other],
        }
    }

    /// Union of `self` and `other`.
    pub fn and(self, other: Shape) -> Self {
        Shape::Union {
            children: vec![self, other],
        }
    }

    pub fn children(&self) -> &[Shape] {
        match self {
            Shape::Cube { .. } | Shape::Square { .. } | Shape::Text { .. } => &[],
            Shape::Offset { child, .. }
            | Shape::LinearExtrude { child, .. }
            | Shape::Translate { child, .. }
            | Shape::Rotate { child, .. } => std::slice::from_ref(child.as_ref()),
            Shape::Union { children } | Shape::Difference { children } => children,
        }
    }

    /// Number of nodes in the tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Shape::node_count).sum::<usize>()
    }

    /// Depth-first search for the first node matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Shape) -> bool) -> Option<&Shape> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    /// Collects every node matching `pred`, depth-first.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Shape) -> bool, out: &mut Vec<&'a Shape>) {
        if pred(self) {
            out.push(self);
        }
        for c in self.children() {
            c.find_all(pred, out);
        }
    }
}
