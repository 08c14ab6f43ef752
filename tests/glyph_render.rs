use sockybara::vector::Fill;
use sockybara::{Canvas, ColorTraits, DefaultTable, PartialTraits, TraitSlot, render, render_at};

fn sample_traits() -> ColorTraits {
    ColorTraits::from_raw_hex([
        "ff0000", "00ff00", "0000ff", "ffff00", "112233", "445566", "ff00ff", "00ffff", "808080",
    ])
}

#[test]
fn rendering_is_deterministic() {
    let traits = sample_traits();
    let a = render(&traits);
    let b = render(&traits);
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());
}

#[test]
fn every_slot_fill_equals_its_trait_value() {
    let traits = sample_traits();
    let img = render(&traits);
    for (slot, value) in traits.iter() {
        let fills = img.slot_fills(slot);
        assert!(!fills.is_empty(), "slot {slot} has no bound element");
        assert!(fills.iter().all(|f| *f == value), "slot {slot}: {fills:?}");
    }
}

#[test]
fn changing_one_slot_does_not_leak_into_others() {
    let base = sample_traits();
    let changed = base.with(TraitSlot::RightEar, "#123456");

    let before = render(&base);
    let after = render(&changed);
    assert!(before.same_topology(&after));

    for slot in TraitSlot::ALL {
        if slot == TraitSlot::RightEar {
            assert_eq!(after.slot_fills(slot), ["#123456"]);
        } else {
            assert_eq!(before.slot_fills(slot), after.slot_fills(slot), "slot {slot}");
        }
    }
}

#[test]
fn unset_slots_use_the_default_table() {
    let mut partial = PartialTraits::new();
    partial.set(TraitSlot::Nose, "#ff8800");
    let img = render(&partial.resolve(&DefaultTable::standard()));

    assert_eq!(img.slot_fills(TraitSlot::Nose), ["#ff8800"]);
    assert_eq!(img.slot_fills(TraitSlot::LeftEye), ["black"]);
    assert_eq!(img.slot_fills(TraitSlot::RightEye), ["black"]);
    assert_eq!(img.slot_fills(TraitSlot::FrontLeftSock), ["white", "white"]);
    assert_eq!(img.slot_fills(TraitSlot::LeftEar), ["white"]);
}

#[test]
fn malformed_colors_pass_through_without_failing() {
    let traits = ColorTraits::default().with(TraitSlot::Nose, "#zzzzzz");
    let img = render(&traits);
    assert_eq!(img.slot_fills(TraitSlot::Nose), ["#zzzzzz"]);
    assert!(img.to_svg().contains(r##"fill="#zzzzzz""##));
}

#[test]
fn attribute_breaking_values_are_escaped() {
    let traits = ColorTraits::default().with(TraitSlot::Nose, r#"red" onload="x"#);
    let svg = render(&traits).to_svg();
    assert!(!svg.contains(r#"red" onload"#));
    assert!(svg.contains("&quot;"));
}

#[test]
fn constant_groups_ignore_traits() {
    let img = render(&sample_traits());
    let outlines = &img.groups()[1];
    assert_eq!(outlines.id, "outlines");
    assert_eq!(outlines.fill, Fill::None);
    let stroke = outlines.stroke.unwrap();
    assert_eq!(stroke.color, "#000000");
    assert_eq!(stroke.width, 7.0);

    let details = &img.groups()[2];
    assert_eq!(details.fill, Fill::Constant("#000000"));
    assert!(details.children.iter().all(|p| p.fill.slot().is_none()));
}

#[test]
fn display_size_only_changes_width_and_height() {
    let traits = sample_traits();
    let small = render_at(&traits, Canvas::square(120));
    let default = render(&traits);

    assert_eq!(default.display_size(), Canvas::square(300));
    assert_eq!(small.view_box(), Canvas::square(400));
    assert!(small.same_topology(&default));

    let svg = small.to_svg();
    assert!(svg.starts_with(r#"<svg viewBox="0 0 400 400" width="120" height="120""#));
}
