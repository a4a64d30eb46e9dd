use crate::jdepend::xml::{AnalysisReport, PackageNode};
use crate::models::CycleFinding;

/// Lazily yield every package that lists itself among its dependencies.
///
/// JDepend already expands each cycle into the node's child list, so a
/// self reference is all that needs checking. Findings come out in document
/// order. A report without a cycles section yields nothing.
pub fn extract_cycles(report: &AnalysisReport) -> impl Iterator<Item = CycleFinding> + '_ {
    report
        .sections
        .iter()
        .flat_map(|section| section.packages.iter())
        .filter_map(package_cycle)
}

fn package_cycle(node: &PackageNode) -> Option<CycleFinding> {
    let package = node.name.as_deref()?;

    // A dependency without text never matches, not even an empty name.
    if !node
        .dependencies
        .iter()
        .any(|dep| dep.as_deref() == Some(package))
    {
        return None;
    }

    Some(CycleFinding {
        package: package.to_string(),
        chain: node.dependencies.iter().flatten().cloned().collect(),
    })
}
