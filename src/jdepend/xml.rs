use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::jdepend::{CYCLES_TAG, NAME_ATTRIBUTE};

/// The parts of a JDepend XML report this tool reads: its `Cycles` sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub sections: Vec<CycleSection>,
}

/// One `Cycles` element and the package nodes directly under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSection {
    pub packages: Vec<PackageNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageNode {
    /// Value of the `Name` attribute.
    pub name: Option<String>,
    /// Text of each child element in document order; `None` for a child
    /// without text.
    pub dependencies: Vec<Option<String>>,
}

/// Load the analyzer report at `path`.
///
/// Returns `Ok(None)` when the file does not exist or is empty: the analyzer
/// writes nothing when it has nothing to say. Any other file must be a
/// well-formed XML document.
pub fn load_report(path: &Path) -> Result<Option<AnalysisReport>> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "analyzer report not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(PipelineError::ReportRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if meta.len() == 0 {
        debug!(path = %path.display(), "analyzer report is empty");
        return Ok(None);
    }

    let bytes = std::fs::read(path).map_err(|source| PipelineError::ReportRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| PipelineError::MalformedReport {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_report(&content)
        .map(Some)
        .map_err(|message| PipelineError::MalformedReport {
            path: path.to_path_buf(),
            message,
        })
}

/// Parse a JDepend report with quick-xml's event API, keeping only the
/// `Cycles` sections. The whole document must still be well formed.
pub fn parse_report(xml: &str) -> std::result::Result<AnalysisReport, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut report = AnalysisReport::default();
    let mut buf = Vec::new();

    let mut depth: u32 = 0;
    let mut seen_root = false;
    // Depth of the open `Cycles` element and what it has collected so far.
    let mut cycles: Option<(u32, CycleSection)> = None;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("at byte {}: {}", reader.buffer_position(), e))?
        {
            Event::Start(ref e) => {
                open_element(e, &mut depth, &mut seen_root, &mut cycles)?;
            }
            Event::Empty(ref e) => {
                open_element(e, &mut depth, &mut seen_root, &mut cycles)?;
                close_element(&mut depth, &mut cycles, &mut report);
            }
            Event::End(_) => {
                close_element(&mut depth, &mut cycles, &mut report);
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                push_text(&text, depth, &mut cycles)?;
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e);
                push_text(&text, depth, &mut cycles)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the report needs.
            _ => {}
        }
        buf.clear();
    }

    if depth > 0 {
        return Err("unexpected end of document inside an open element".to_string());
    }
    if !seen_root {
        return Err("document has no root element".to_string());
    }

    Ok(report)
}

fn open_element(
    e: &BytesStart<'_>,
    depth: &mut u32,
    seen_root: &mut bool,
    cycles: &mut Option<(u32, CycleSection)>,
) -> std::result::Result<(), String> {
    if *depth == 0 {
        if *seen_root {
            return Err("document has more than one root element".to_string());
        }
        *seen_root = true;
    }
    *depth += 1;

    let tag = e.name();
    let Some((section_depth, section)) = cycles.as_mut() else {
        if tag.local_name().as_ref() == CYCLES_TAG.as_bytes() {
            *cycles = Some((*depth, CycleSection::default()));
        }
        return Ok(());
    };

    if *depth == *section_depth + 1 {
        section.packages.push(PackageNode {
            name: name_attribute(e)?,
            dependencies: Vec::new(),
        });
    } else if *depth == *section_depth + 2 {
        if let Some(node) = section.packages.last_mut() {
            node.dependencies.push(None);
        }
    }
    Ok(())
}

fn close_element(
    depth: &mut u32,
    cycles: &mut Option<(u32, CycleSection)>,
    report: &mut AnalysisReport,
) {
    if cycles.as_ref().is_some_and(|(section_depth, _)| *section_depth == *depth) {
        if let Some((_, section)) = cycles.take() {
            report.sections.push(section);
        }
    }
    *depth = depth.saturating_sub(1);
}

fn push_text(
    text: &str,
    depth: u32,
    cycles: &mut Option<(u32, CycleSection)>,
) -> std::result::Result<(), String> {
    if depth == 0 {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err("text outside of the root element".to_string());
    }

    if let Some((section_depth, section)) = cycles {
        if depth == *section_depth + 2 {
            if let Some(dep) = section
                .packages
                .last_mut()
                .and_then(|node| node.dependencies.last_mut())
            {
                dep.get_or_insert_with(String::new).push_str(text);
            }
        }
    }
    Ok(())
}

fn name_attribute(e: &BytesStart<'_>) -> std::result::Result<Option<String>, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref() == NAME_ATTRIBUTE.as_bytes() {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REPORT: &str = r#"<?xml version="1.0"?>
<JDepend>
  <Packages>
    <Package name="com.a">
      <DependsUpon><Package>com.b</Package></DependsUpon>
    </Package>
  </Packages>
  <Cycles>
    <Package Name="com.a">
      <Package>com.b</Package>
      <Package>com.a</Package>
    </Package>
  </Cycles>
</JDepend>"#;

    #[test]
    fn test_parse_report_collects_cycles_section() {
        let report = parse_report(REPORT).unwrap();
        assert_eq!(
            report.sections,
            vec![CycleSection {
                packages: vec![PackageNode {
                    name: Some("com.a".to_string()),
                    dependencies: vec![Some("com.b".to_string()), Some("com.a".to_string())],
                }],
            }]
        );
    }

    #[test]
    fn test_parse_report_without_cycles_section() {
        let report = parse_report("<JDepend><Packages/></JDepend>").unwrap();
        assert!(report.sections.is_empty());

        let report = parse_report("<JDepend><Cycles/></JDepend>").unwrap();
        assert_eq!(report.sections, vec![CycleSection::default()]);
    }

    #[test]
    fn test_dependency_without_text_stays_none() {
        let report =
            parse_report(r#"<JDepend><Cycles><Package Name=""><Package/><Package></Package></Package></Cycles></JDepend>"#)
                .unwrap();
        let node = &report.sections[0].packages[0];
        assert_eq!(node.name.as_deref(), Some(""));
        assert_eq!(node.dependencies, vec![None, None]);
    }

    #[test]
    fn test_parse_report_unescapes_entities() {
        let report = parse_report(
            r#"<JDepend><Cycles><Package Name="a&amp;b"><Package>x &lt; y</Package></Package></Cycles></JDepend>"#,
        )
        .unwrap();
        let node = &report.sections[0].packages[0];
        assert_eq!(node.name.as_deref(), Some("a&b"));
        assert_eq!(node.dependencies, vec![Some("x < y".to_string())]);
    }

    #[test]
    fn test_parse_report_rejects_malformed_input() {
        assert!(parse_report("this is not xml").is_err());
        assert!(parse_report("<JDepend><Cycles></JDepend>").is_err());
        assert!(parse_report("<JDepend><Cycles>").is_err());
        assert!(parse_report("<a/><b/>").is_err());
        assert!(parse_report("<?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn test_load_report_missing_file_is_empty_signal() {
        let dir = tempfile::tempdir().unwrap();
        let report = load_report(&dir.path().join("jdepend_output.xml")).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_load_report_zero_length_file_is_empty_signal() {
        let f = NamedTempFile::new().unwrap();
        assert!(load_report(f.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_report_malformed_file_is_fatal() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "<JDepend><Cycles>").unwrap();
        let err = load_report(f.path()).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedReport { .. }));
    }

    #[test]
    fn test_load_report_reads_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", REPORT).unwrap();
        let report = load_report(f.path()).unwrap().unwrap();
        assert_eq!(report.sections.len(), 1);
    }
}
