//! Everything that talks to JDepend.
//!
//! - [`invoke`] — build and run the `jdepend.xmlui.JDepend` command line.
//! - [`xml`] — stream its XML report, keeping the `Cycles` sections.
//! - [`cycles`] — pick the self-referencing packages out of the `Cycles` section.

pub mod cycles;
pub mod invoke;
pub mod xml;

/// File name JDepend is told to write its report to.
pub const REPORT_FILE: &str = "jdepend_output.xml";

/// Section of the JDepend report that lists packages taking part in cycles.
pub const CYCLES_TAG: &str = "Cycles";

/// Attribute carrying the package name on each node of the cycles section.
pub const NAME_ATTRIBUTE: &str = "Name";
