//! Sockybara geometry.
//!
//! The topology is constant: thirteen color rectangles bound to the nine trait
//! slots (each sock is an upright plus a toe), black outlines, and the nose details.

use crate::foundation::core::{BezPath, Canvas};
use crate::traits::{ColorTraits, TraitSlot};
use crate::vector::{Fill, Group, Primitive, Stroke, VectorImage};

const BACKGROUND: &str = "#ffffff";
const INK: &str = "#000000";
const OUTLINE_WIDTH: f64 = 7.0;

/// Build the vector image for `traits`. Never fails; trait values are used as fills verbatim.
pub fn render(traits: &ColorTraits) -> VectorImage {
    VectorImage::new(
        "sockybara",
        BACKGROUND,
        vec![color_group(traits), outline_group(), nose_detail_group()],
    )
}

/// [`render`] with an explicit on-screen size. Exports stay 400x400 either way.
pub fn render_at(traits: &ColorTraits, display: Canvas) -> VectorImage {
    render(traits).with_display_size(display)
}

fn slot_fill(traits: &ColorTraits, slot: TraitSlot) -> Fill {
    Fill::Slot {
        slot,
        color: traits.get(slot).to_owned(),
    }
}

fn color_group(traits: &ColorTraits) -> Group {
    let mut g = Group::new("color");

    // (slot, left edge) for the four socks, front to back.
    let socks = [
        (TraitSlot::FrontLeftSock, 260.0),
        (TraitSlot::FrontRightSock, 210.0),
        (TraitSlot::BackLeftSock, 140.0),
        (TraitSlot::BackRightSock, 90.0),
    ];
    for (slot, x) in socks {
        g.push(Primitive::rect(x, 265.0, 20.0, 35.0).filled(slot_fill(traits, slot)));
        g.push(Primitive::rect(x, 285.0, 33.0, 15.0).filled(slot_fill(traits, slot)));
    }

    // Ears, eyes and nose: one rect each.
    let features = [
        (TraitSlot::RightEar, (208.0, 112.0, 17.0, 12.0)),
        (TraitSlot::LeftEar, (256.0, 112.0, 17.0, 12.0)),
        (TraitSlot::RightEye, (234.0, 144.0, 10.0, 16.0)),
        (TraitSlot::LeftEye, (280.0, 144.0, 10.0, 16.0)),
        (TraitSlot::Nose, (257.0, 167.0, 80.0, 65.0)),
    ];
    for (slot, (x, y, w, h)) in features {
        g.push(Primitive::rect(x, y, w, h).filled(slot_fill(traits, slot)));
    }
    g
}

fn outline_group() -> Group {
    let mut g = Group::new("outlines").fill(Fill::None).stroke(Stroke {
        color: INK,
        width: OUTLINE_WIDTH,
        round: true,
    });

    // Head.
    g.push(Primitive::path(polyline(&[(194.0, 174.0), (194.0, 125.0)])));
    g.push(Primitive::path(polyline(&[(194.0, 124.0), (310.0, 124.0)])));
    g.push(Primitive::path(polyline(&[(310.0, 165.0), (310.0, 125.0)])));

    // Back, rounded at the rump.
    let mut back = BezPath::new();
    back.move_to((194.0, 175.0));
    back.line_to((100.0, 175.0));
    back.quad_to((90.0, 175.0), (90.0, 185.0));
    back.line_to((90.0, 245.0));
    g.push(Primitive::path(back));

    // Belly between the legs.
    g.push(Primitive::path(polyline(&[(110.0, 245.0), (209.0, 245.0)])));
    g.push(Primitive::path(polyline(&[(230.0, 245.0), (260.0, 245.0)])));

    // Legs down to the sock tops.
    for (x, top) in [
        (90.0, 239.0),
        (110.0, 247.0),
        (140.0, 247.0),
        (160.0, 245.0),
        (210.0, 245.0),
        (230.0, 245.0),
        (260.0, 245.0),
        (280.0, 235.0),
    ] {
        g.push(Primitive::path(polyline(&[(x, top), (x, 265.0)])));
    }

    // Socks, as closed boot shapes.
    for x in [90.0, 140.0, 210.0, 260.0] {
        g.push(Primitive::path(closed(&[
            (x + 20.0, 265.0),
            (x, 265.0),
            (x, 300.0),
            (x + 33.0, 300.0),
            (x + 33.0, 285.0),
            (x + 20.0, 285.0),
        ])));
    }

    g.push(Primitive::rect(257.0, 167.0, 80.0, 65.0));
    g.push(Primitive::rect(208.0, 112.0, 17.0, 12.0));
    g.push(Primitive::rect(256.0, 112.0, 17.0, 12.0));
    g
}

fn nose_detail_group() -> Group {
    let mut g = Group::new("nose-details").fill(Fill::Constant(INK));
    g.push(Primitive::circle(295.0, 190.0, 4.0));
    g.push(Primitive::circle(313.0, 190.0, 4.0));
    g.push(Primitive::rect(303.0, 206.0, 4.0, 28.0));
    g
}

fn polyline(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        path.move_to(first);
    }
    for p in iter {
        path.line_to(p);
    }
    path
}

fn closed(points: &[(f64, f64)]) -> BezPath {
    let mut path = polyline(points);
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_group_binds_thirteen_rects() {
        let img = render(&ColorTraits::default());
        let bound = img.primitives().filter(|p| p.fill.slot().is_some()).count();
        assert_eq!(bound, 13);
    }

    #[test]
    fn socks_bind_two_rects_each_and_the_rest_one() {
        let img = render(&ColorTraits::default());
        for slot in TraitSlot::ALL {
            let expected = match slot {
                TraitSlot::FrontLeftSock
                | TraitSlot::FrontRightSock
                | TraitSlot::BackLeftSock
                | TraitSlot::BackRightSock => 2,
                _ => 1,
            };
            assert_eq!(img.slot_fills(slot).len(), expected, "slot {slot}");
        }
    }

    #[test]
    fn outline_and_detail_groups_are_constant() {
        let img = render(&ColorTraits::default());
        let ids: Vec<_> = img.groups().iter().map(|g| g.id).collect();
        assert_eq!(ids, ["color", "outlines", "nose-details"]);

        let outlines = &img.groups()[1];
        assert_eq!(outlines.children.len(), 21);
        assert!(outlines.children.iter().all(|p| p.fill == Fill::Inherit));
    }

    #[test]
    fn back_path_keeps_its_curve() {
        let svg = render(&ColorTraits::default()).to_svg();
        assert!(svg.contains('Q'));
        assert!(svg.contains('Z'));
    }
}
