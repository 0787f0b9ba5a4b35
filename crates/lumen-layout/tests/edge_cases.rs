//! Edge case tests for lumen-layout
//!
//! Occlusion, paint order and visibility over built documents.

use lumen_layout::overlap::text_fragments;
use lumen_layout::stacking::paints_above;
use lumen_layout::visibility::{cumulative_opacity, is_visible};
use lumen_layout::{DocumentBuilder, ElementSpec, OverlapDetector, Rect, VirtualNode};

// ============================================================================
// OCCLUSION
// ============================================================================

#[test]
fn test_positioned_sibling_occludes() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b
        .append(body, ElementSpec::new("div").id("target").style("color: black").bounds(0.0, 1.0, 60.0, 40.0))
        .unwrap();
    b.append_text(target, "Text").unwrap();
    b.append(
        body,
        ElementSpec::new("div")
            .id("overlay")
            .style("position: absolute; top: 0; width: 60px; height: 40px; background-color: #000")
            .bounds(0.0, 0.0, 60.0, 40.0),
    )
    .unwrap();
    let doc = b.build();

    let target = doc.element_by_id("target").unwrap();
    let detector = OverlapDetector::new(target).unwrap();
    assert_eq!(detector.find_occluder(), doc.element_by_id("overlay"));
}

#[test]
fn test_translucent_overlay_does_not_occlude() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b.append(body, ElementSpec::new("div").id("target").bounds(0.0, 0.0, 60.0, 20.0)).unwrap();
    b.append_text(target, "Text").unwrap();
    b.append(
        body,
        ElementSpec::new("div")
            .style("position: absolute; background-color: rgba(0, 0, 0, 0.5)")
            .bounds(0.0, 0.0, 60.0, 20.0),
    )
    .unwrap();
    let doc = b.build();

    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.find_occluder(), None);
}

#[test]
fn test_in_flow_descendant_does_not_occlude() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let label = b.append(body, ElementSpec::new("label").id("target").style("display: block").bounds(0.0, 0.0, 300.0, 20.0)).unwrap();
    b.append_text(label, "Label").unwrap();
    b.append(label, ElementSpec::new("input").style("background-color: white").bounds(50.0, 0.0, 200.0, 20.0)).unwrap();
    let doc = b.build();

    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.find_occluder(), None);
}

#[test]
fn test_positioned_descendant_occludes() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b.append(body, ElementSpec::new("div").id("target").style("position: relative").bounds(0.0, 0.0, 200.0, 100.0)).unwrap();
    b.append_text(target, "My text").unwrap();
    b.append(
        target,
        ElementSpec::new("div")
            .id("cover")
            .style("position: absolute; top: 0; left: 0; width: 100%; height: 100%; background: white")
            .bounds(0.0, 0.0, 200.0, 100.0),
    )
    .unwrap();
    let doc = b.build();

    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.find_occluder(), doc.element_by_id("cover"));
}

#[test]
fn test_second_line_occluded() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let p = b.append(body, ElementSpec::new("p").style("width: 50px").bounds(0.0, 0.0, 50.0, 40.0)).unwrap();
    let span = b
        .append(
            p,
            ElementSpec::new("span")
                .id("target")
                .fragments([Rect::from_xywh(20.0, 0.0, 30.0, 20.0), Rect::from_xywh(0.0, 20.0, 40.0, 20.0)]),
        )
        .unwrap();
    b.append_text(span, "Text that wraps").unwrap();
    b.append(
        body,
        ElementSpec::new("div")
            .id("cover")
            .style("position: absolute; background: #000")
            .bounds(0.0, 20.0, 50.0, 20.0),
    )
    .unwrap();
    let doc = b.build();

    let span = doc.element_by_id("target").unwrap();
    assert_eq!(text_fragments(span).unwrap().len(), 2);
    let detector = OverlapDetector::new(span).unwrap();
    assert_eq!(detector.find_occluder(), doc.element_by_id("cover"));
}

#[test]
fn test_no_geometry_no_detector() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(body, ElementSpec::new("div").id("target")).unwrap();
    let doc = b.build();
    assert!(OverlapDetector::new(doc.element_by_id("target").unwrap()).is_none());
}

#[test]
fn test_occluder_at_respects_edge_tolerance() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b.append(body, ElementSpec::new("div").id("target").bounds(0.0, 0.0, 200.0, 20.0)).unwrap();
    b.append_text(target, "Partly covered").unwrap();
    b.append(
        body,
        ElementSpec::new("div").id("cover").style("position: absolute; background: #fff").bounds(0.0, 0.0, 60.0, 40.0),
    )
    .unwrap();
    let doc = b.build();

    let cover = doc.element_by_id("cover");
    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.occluder_at((30.0, 10.0)), cover);
    assert_eq!(detector.occluder_at((60.4, 10.0)), cover);
    assert_eq!(detector.occluder_at((60.6, 10.0)), None);
    assert_eq!(detector.occluder_at((150.0, 10.0)), None);
    assert_eq!(detector.find_occluder(), cover);
}

#[test]
fn test_occluder_at_picks_topmost_cover() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b.append(body, ElementSpec::new("div").id("target").bounds(0.0, 0.0, 100.0, 20.0)).unwrap();
    b.append_text(target, "Text").unwrap();
    b.append(
        body,
        ElementSpec::new("div").id("top").style("position: absolute; z-index: 2; background: #000").bounds(0.0, 0.0, 100.0, 20.0),
    )
    .unwrap();
    b.append(
        body,
        ElementSpec::new("div").id("under").style("position: absolute; z-index: 1; background: #fff").bounds(0.0, 0.0, 100.0, 20.0),
    )
    .unwrap();
    let doc = b.build();

    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.occluder_at((50.0, 10.0)), doc.element_by_id("top"));
}

#[test]
fn test_translucent_sibling_is_an_overlay() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let target = b.append(body, ElementSpec::new("div").id("target").bounds(0.0, 0.0, 60.0, 20.0)).unwrap();
    b.append_text(target, "Text").unwrap();
    b.append(
        body,
        ElementSpec::new("div")
            .id("veil")
            .style("position: absolute; background-color: rgba(0, 0, 0, 0.9)")
            .bounds(0.0, 0.0, 60.0, 20.0),
    )
    .unwrap();
    b.append(body, ElementSpec::new("div").id("clear").style("position: absolute").bounds(0.0, 0.0, 60.0, 20.0)).unwrap();
    b.append(
        body,
        ElementSpec::new("div")
            .id("aside")
            .style("position: absolute; background-color: rgba(0, 0, 0, 0.5)")
            .bounds(0.0, 100.0, 60.0, 20.0),
    )
    .unwrap();
    let doc = b.build();

    let detector = OverlapDetector::new(doc.element_by_id("target").unwrap()).unwrap();
    assert_eq!(detector.find_occluder(), None);
    assert_eq!(detector.overlays(), vec![doc.element_by_id("veil").unwrap()]);
    assert!(detector.fixed_overlays().is_empty());
}

// ============================================================================
// FIXED OVERLAYS & PAINT ORDER
// ============================================================================

#[test]
fn test_fixed_overlay_only_when_overlapping() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(
        body,
        ElementSpec::new("header")
            .id("header")
            .style("position: fixed; top: 0; width: 100%; height: 40px; background: #f0f0f0")
            .bounds(0.0, 0.0, 800.0, 40.0),
    )
    .unwrap();
    let near = b.append(body, ElementSpec::new("span").id("near").fragments([Rect::from_xywh(0.0, 10.0, 80.0, 20.0)])).unwrap();
    b.append_text(near, "Covered").unwrap();
    let far = b.append(body, ElementSpec::new("span").id("far").fragments([Rect::from_xywh(0.0, 1200.0, 80.0, 20.0)])).unwrap();
    b.append_text(far, "Scrolled away").unwrap();
    let doc = b.build();

    let header = doc.element_by_id("header").unwrap();
    let near = OverlapDetector::new(doc.element_by_id("near").unwrap()).unwrap();
    let far = OverlapDetector::new(doc.element_by_id("far").unwrap()).unwrap();
    assert_eq!(near.fixed_overlays(), vec![header]);
    assert!(far.fixed_overlays().is_empty());
    // Fixed boxes are background layers, never occluders
    assert_eq!(near.find_occluder(), None);
}

#[test]
fn test_z_index_orders_positioned_boxes() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(body, ElementSpec::new("div").id("high").style("position: absolute; z-index: 5")).unwrap();
    b.append(body, ElementSpec::new("div").id("low").style("position: absolute; z-index: 1")).unwrap();
    b.append(body, ElementSpec::new("div").id("flow")).unwrap();
    b.append(body, ElementSpec::new("div").id("below").style("position: relative; z-index: -1")).unwrap();
    let doc = b.build();

    let node = |id: &str| doc.element_by_id(id).unwrap();
    assert!(paints_above(node("high"), node("low")));
    assert!(paints_above(node("low"), node("flow")));
    assert!(paints_above(node("flow"), node("below")));
}

#[test]
fn test_stacking_context_keeps_content_below_later_sibling() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let low = b.append(body, ElementSpec::new("div").id("low").style("position: relative; z-index: 1")).unwrap();
    b.append(low, ElementSpec::new("div").id("inner").style("position: absolute; z-index: 100")).unwrap();
    b.append(body, ElementSpec::new("div").id("mid").style("position: relative; z-index: 2")).unwrap();
    let doc = b.build();

    let node = |id: &str| doc.element_by_id(id).unwrap();
    assert!(paints_above(node("mid"), node("inner")));
    assert!(paints_above(node("inner"), node("low")));
}

#[test]
fn test_positioned_box_covers_text_inside_z_index_context() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let layer = b
        .append(
            body,
            ElementSpec::new("div").style("position: relative; z-index: 10; background: #fff").bounds(0.0, 0.0, 200.0, 60.0),
        )
        .unwrap();
    let p = b.append(layer, ElementSpec::new("p").id("target").style("color: #000").bounds(0.0, 0.0, 200.0, 20.0)).unwrap();
    b.append_text(p, "Hidden text").unwrap();
    b.append(
        layer,
        ElementSpec::new("div").id("cover").style("position: absolute; background: #000").bounds(0.0, 0.0, 200.0, 20.0),
    )
    .unwrap();
    let doc = b.build();

    let target = doc.element_by_id("target").unwrap();
    let cover = doc.element_by_id("cover").unwrap();
    assert!(paints_above(cover, target));
    assert_eq!(OverlapDetector::new(target).unwrap().find_occluder(), Some(cover));
}

#[test]
fn test_opacity_lifts_box_above_flow() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(body, ElementSpec::new("div").id("faded").style("opacity: 0.8")).unwrap();
    b.append(body, ElementSpec::new("div").id("flow")).unwrap();
    let doc = b.build();

    let node = |id: &str| doc.element_by_id(id).unwrap();
    assert!(paints_above(node("faded"), node("flow")));
}

// ============================================================================
// VISIBILITY
// ============================================================================

#[test]
fn test_hidden_states() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(body, ElementSpec::new("div").id("transparent").style("opacity: 0")).unwrap();
    let outer = b.append(body, ElementSpec::new("div").style("display: none")).unwrap();
    b.append(outer, ElementSpec::new("span").id("undisplayed")).unwrap();
    b.append(body, ElementSpec::new("div").id("invisible").style("visibility: hidden")).unwrap();
    let clip = b.append(body, ElementSpec::new("div").style("overflow: scroll; height: 0").bounds(0.0, 0.0, 100.0, 0.0)).unwrap();
    b.append(clip, ElementSpec::new("div").id("clipped").bounds(0.0, 0.0, 100.0, 20.0)).unwrap();
    b.append(body, ElementSpec::new("div").id("shown").style("opacity: 0.5")).unwrap();
    let doc = b.build();

    let node = |id: &str| doc.element_by_id(id).unwrap();
    assert!(!is_visible(node("transparent")));
    assert!(!is_visible(node("undisplayed")));
    assert!(!is_visible(node("invisible")));
    assert!(!is_visible(node("clipped")));
    assert!(is_visible(node("shown")));
    assert_eq!(cumulative_opacity(node("shown")), 0.5);
}

#[test]
fn test_text_node_follows_parent_visibility() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    let div = b.append(body, ElementSpec::new("div").style("visibility: hidden")).unwrap();
    let text = b.append_text(div, "hidden").unwrap();
    let doc = b.build();
    assert!(!is_visible(doc.node(text).unwrap()));
}
