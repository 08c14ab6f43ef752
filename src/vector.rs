//! Declarative vector image model and its SVG serialization.
//!
//! A [`VectorImage`] is a flat list of groups, each holding rectangles, circles and
//! paths. Fills are either constant, inherited from the group, or bound to a
//! [`TraitSlot`]. Serialization is byte-for-byte deterministic.

use std::fmt::Write as _;

use crate::foundation::core::{BezPath, Canvas, Circle, DEFAULT_DISPLAY_SIZE, Rect};
use crate::traits::TraitSlot;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
    Path(BezPath),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fill {
    /// No `fill` attribute; the group style applies.
    Inherit,
    /// `fill="none"`.
    None,
    Constant(&'static str),
    /// Fill taken from a trait slot at render time.
    Slot { slot: TraitSlot, color: String },
}

impl Fill {
    fn attr_value(&self) -> Option<&str> {
        match self {
            Fill::Inherit => None,
            Fill::None => Some("none"),
            Fill::Constant(c) => Some(*c),
            Fill::Slot { color, .. } => Some(color.as_str()),
        }
    }

    pub fn slot(&self) -> Option<TraitSlot> {
        match self {
            Fill::Slot { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    /// Round line joins and caps.
    pub round: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub fill: Fill,
}

impl Primitive {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            shape: Shape::Rect(Rect::new(x, y, x + width, y + height)),
            fill: Fill::Inherit,
        }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            shape: Shape::Circle(Circle::new((cx, cy), r)),
            fill: Fill::Inherit,
        }
    }

    pub fn path(path: BezPath) -> Self {
        Self {
            shape: Shape::Path(path),
            fill: Fill::Inherit,
        }
    }

    pub fn filled(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: &'static str,
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    pub children: Vec<Primitive>,
}

impl Group {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            fill: Fill::Inherit,
            stroke: None,
            children: Vec::new(),
        }
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.children.push(primitive);
    }
}

/// Fixed-topology vector description of one character.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorImage {
    view_box: Canvas,
    display: Canvas,
    background: &'static str,
    root_id: &'static str,
    groups: Vec<Group>,
}

impl VectorImage {
    pub fn new(root_id: &'static str, background: &'static str, groups: Vec<Group>) -> Self {
        Self {
            view_box: Canvas::export(),
            display: Canvas::square(DEFAULT_DISPLAY_SIZE),
            background,
            root_id,
            groups,
        }
    }

    /// Same image with a different on-screen size. The view box is unchanged, so
    /// this only affects the `width`/`height` attributes of the serialized SVG.
    pub fn with_display_size(mut self, display: Canvas) -> Self {
        self.display = display;
        self
    }

    pub fn display_size(&self) -> Canvas {
        self.display
    }

    pub fn view_box(&self) -> Canvas {
        self.view_box
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.groups.iter().flat_map(|g| g.children.iter())
    }

    /// Every fill bound to `slot`, in document order.
    pub fn slot_fills(&self, slot: TraitSlot) -> Vec<&str> {
        self.primitives()
            .filter_map(|p| match &p.fill {
                Fill::Slot { slot: s, color } if *s == slot => Some(color.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Compare geometry and constant styling, ignoring slot-bound colors.
    pub fn same_topology(&self, other: &VectorImage) -> bool {
        fn strip(img: &VectorImage) -> Vec<Group> {
            let mut groups = img.groups.clone();
            for p in groups.iter_mut().flat_map(|g| g.children.iter_mut()) {
                if let Fill::Slot { color, .. } = &mut p.fill {
                    color.clear();
                }
            }
            groups
        }

        self.view_box == other.view_box
            && self.background == other.background
            && self.root_id == other.root_id
            && strip(self) == strip(other)
    }

    /// Serialize to standalone SVG text.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            r#"<svg viewBox="0 0 {vw} {vh}" width="{dw}" height="{dh}" xmlns="{SVG_NS}">"#,
            vw = self.view_box.width,
            vh = self.view_box.height,
            dw = self.display.width,
            dh = self.display.height,
        );
        let _ = write!(
            out,
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.view_box.width,
            self.view_box.height,
            escape_attr(self.background)
        );
        let _ = write!(out, r#"<g id="{}">"#, self.root_id);
        for group in &self.groups {
            write_group(&mut out, group);
        }
        out.push_str("</g></svg>");
        out
    }
}

fn write_group(out: &mut String, group: &Group) {
    let _ = write!(out, r#"<g id="{}""#, group.id);
    if let Some(fill) = group.fill.attr_value() {
        let _ = write!(out, r#" fill="{}""#, escape_attr(fill));
    }
    if let Some(stroke) = group.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color, stroke.width
        );
        if stroke.round {
            out.push_str(r#" stroke-linejoin="round" stroke-linecap="round""#);
        }
    }
    out.push('>');
    for p in &group.children {
        write_primitive(out, p);
    }
    out.push_str("</g>");
}

fn write_primitive(out: &mut String, p: &Primitive) {
    match &p.shape {
        Shape::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
        }
        Shape::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            );
        }
        Shape::Path(path) => {
            let _ = write!(out, r#"<path d="{}""#, path.to_svg());
        }
    }
    if let Some(fill) = p.fill.attr_value() {
        let _ = write!(out, r#" fill="{}""#, escape_attr(fill));
    }
    out.push_str("/>");
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> VectorImage {
        let mut g = Group::new("color");
        g.push(Primitive::rect(1.0, 2.0, 3.0, 4.0).filled(Fill::Slot {
            slot: TraitSlot::Nose,
            color: "#123456".to_owned(),
        }));
        g.push(Primitive::circle(5.0, 6.0, 2.0));
        VectorImage::new("root", "#ffffff", vec![g])
    }

    #[test]
    fn rect_and_circle_serialize_with_integer_coordinates() {
        let svg = tiny().to_svg();
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#123456"/>"##));
        assert!(svg.contains(r#"<circle cx="5" cy="6" r="2"/>"#));
        assert!(svg.starts_with(r#"<svg viewBox="0 0 400 400" width="300" height="300""#));
    }

    #[test]
    fn display_size_only_changes_width_and_height() {
        let small = tiny();
        let large = tiny().with_display_size(Canvas::square(400));
        assert!(large.to_svg().contains(r#"width="400" height="400""#));
        assert_eq!(small.view_box(), large.view_box());
        assert!(small.same_topology(&large));
    }

    #[test]
    fn fill_values_are_escaped() {
        let mut g = Group::new("color");
        g.push(Primitive::rect(0.0, 0.0, 1.0, 1.0).filled(Fill::Slot {
            slot: TraitSlot::Nose,
            color: r#"red" onload="x"#.to_owned(),
        }));
        let svg = VectorImage::new("root", "#fff", vec![g]).to_svg();
        assert!(svg.contains("fill=\"red&quot; onload=&quot;x\""));
    }

    #[test]
    fn group_styles_are_written() {
        let g = Group::new("outlines").fill(Fill::None).stroke(Stroke {
            color: "#000000",
            width: 7.0,
            round: true,
        });
        let svg = VectorImage::new("root", "#fff", vec![g]).to_svg();
        assert!(svg.contains(
            r##"<g id="outlines" fill="none" stroke="#000000" stroke-width="7" stroke-linejoin="round" stroke-linecap="round">"##
        ));
    }
}
