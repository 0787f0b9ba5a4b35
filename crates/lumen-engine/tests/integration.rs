//! Integration tests - Auditing whole documents
//!
//! Builds documents the way a host would and checks how findings are bucketed.

use lumen_dom::Snapshot;
use lumen_engine::{Auditor, Config, MessageKey, Verdict};
use lumen_layout::{DocumentBuilder, ElementSpec, NodeId, Rect, RenderedDocument, SnapshotNode, VirtualNode};

fn page() -> RenderedDocument {
    let mut b = DocumentBuilder::new();
    let body = b.body();

    let ok = b
        .append(body, ElementSpec::new("div").id("ok").style("color: black; background-color: white").bounds(0.0, 0.0, 400.0, 20.0))
        .unwrap();
    b.append_text(ok, "Readable text").unwrap();

    let bad = b
        .append(body, ElementSpec::new("div").id("bad").style("color: yellow; background-color: white").bounds(0.0, 20.0, 400.0, 20.0))
        .unwrap();
    b.append_text(bad, "Faint text").unwrap();

    let img = b
        .append(body, ElementSpec::new("div").id("img").style("background-image: url(\"paper.png\")").bounds(0.0, 40.0, 400.0, 20.0))
        .unwrap();
    b.append_text(img, "Text over an image").unwrap();

    let p = b
        .append(body, ElementSpec::new("p").id("para").style("color: black; text-decoration: none").bounds(0.0, 60.0, 400.0, 20.0))
        .unwrap();
    b.append_text(p, "See the ").unwrap();
    let a = b
        .append(
            p,
            ElementSpec::new("a")
                .id("link")
                .attr("href", "/docs")
                .style("color: black; text-decoration: none")
                .fragments([Rect::from_xywh(60.0, 60.0, 40.0, 20.0)]),
        )
        .unwrap();
    b.append_text(a, "docs").unwrap();

    b.build()
}

fn all_nodes(doc: &RenderedDocument) -> Vec<lumen_layout::LiveNode<'_>> {
    let root = doc.root().unwrap();
    std::iter::once(root).chain(root.descendants()).collect()
}

// ============================================================================
// DOCUMENT AUDITS
// ============================================================================

#[test]
fn test_audit_buckets_findings() {
    let doc = page();
    let report = Auditor::default().audit(all_nodes(&doc)).unwrap();

    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].node, doc.element_by_id("bad").unwrap());
    assert_eq!(report.violations[0].check, "color-contrast");

    assert_eq!(report.incomplete.len(), 1);
    assert_eq!(report.incomplete[0].result.verdict, Verdict::CannotDetermine(MessageKey::BgImage));

    assert_eq!(report.passes.len(), 4);
    assert_eq!(report.for_check("link-in-text-block").count(), 1);
    assert_eq!(report.len(), 6);
}

#[test]
fn test_disabled_checks_are_skipped() {
    let doc = page();
    let config = Config::from_json(r#"{"checks": ["link-in-text-block"]}"#).unwrap();
    let report = Auditor::new(config).audit(all_nodes(&doc)).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.passes[0].node, doc.element_by_id("link").unwrap());
    assert_eq!(report.passes[0].result.related_nodes, vec![doc.element_by_id("para").unwrap()]);
}

#[test]
fn test_config_options_reach_checks() {
    let doc = page();
    let config = Config::from_json(
        r#"{"checks": ["color-contrast"], "colorContrast": {"contrastRatio": {"normal": {"expected": 1.05}}}}"#,
    )
    .unwrap();
    let report = Auditor::new(config).audit(all_nodes(&doc)).unwrap();
    assert!(report.violations.is_empty());
}

#[test]
fn test_serialized_snapshot_is_incomplete() {
    let tree = Snapshot::element("main")
        .with_child(Snapshot::element("p").with_child(Snapshot::text("Hello")))
        .to_tree()
        .unwrap();
    let root = SnapshotNode::root(&tree).unwrap();
    let nodes: Vec<_> = std::iter::once(root).chain(root.descendants()).collect();

    let report = Auditor::default().audit(nodes).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.incomplete[0].result.verdict, Verdict::CannotDetermine(MessageKey::NoLayout));
}

// ============================================================================
// FRAMES
// ============================================================================

struct Answering;

impl lumen_a11y::FrameProbe for Answering {
    fn ping(&self, _frame: NodeId, respond: lumen_a11y::FrameResponse) {
        respond();
    }
}

#[test]
fn test_audit_frames() {
    let mut b = DocumentBuilder::new();
    let body = b.body();
    b.append(body, ElementSpec::new("iframe").id("first")).unwrap();
    b.append(body, ElementSpec::new("frame").id("second")).unwrap();
    b.append(body, ElementSpec::new("div")).unwrap();
    let doc = b.build();

    let report = Auditor::default().audit_frames(Answering, all_nodes(&doc)).unwrap();
    assert_eq!(report.passes.len(), 2);
    assert!(report.passes.iter().all(|f| f.check == "frame-tested"));
}
