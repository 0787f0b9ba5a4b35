//! Example: Auditing a small rendered page
//!
//! Run with `RUST_LOG=debug` to see each resolution step.

use lumen_engine::{Auditor, Config};
use lumen_layout::{DocumentBuilder, ElementSpec, Rect, VirtualNode};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut b = DocumentBuilder::new();
    b.body_style("background-color: #fafafa; color: #222");
    let body = b.body();

    let header = b.append(
        body,
        ElementSpec::new("header")
            .style("position: fixed; top: 0; width: 100%; height: 48px; background: #003366; color: #fff")
            .bounds(0.0, 0.0, 800.0, 48.0),
    )?;
    b.append_text(header, "Lumen demo")?;

    let note = b.append(
        body,
        ElementSpec::new("p").style("color: #aaa").bounds(0.0, 64.0, 800.0, 20.0),
    )?;
    b.append_text(note, "Low contrast footnote with a ")?;
    let link = b.append(
        note,
        ElementSpec::new("a")
            .attr("href", "/more")
            .style("color: #999; text-decoration: none")
            .fragments([Rect::from_xywh(220.0, 64.0, 40.0, 20.0)]),
    )?;
    b.append_text(link, "link")?;

    let doc = b.build();
    let root = doc.root().ok_or_else(|| anyhow::anyhow!("document has no root"))?;
    let nodes: Vec<_> = std::iter::once(root).chain(root.descendants()).collect();

    let auditor = Auditor::new(Config::default());
    let report = auditor.audit(nodes)?;

    println!("Lumen Engine v{}", lumen_engine::VERSION);
    for (bucket, findings) in [("pass", &report.passes), ("violation", &report.violations), ("incomplete", &report.incomplete)] {
        for finding in findings {
            let data = serde_json::to_string(&finding.result.data)?;
            println!("{bucket:>10}  {:<20} {:<14} {data}", finding.check, finding.node.label());
        }
    }
    Ok(())
}
