use crate::models::{CycleFinding, Issue, Locale, RuleSet, PACKAGE_CYCLE_RULE, PROJECT_SUMMARY_PATH};

/// Turn a cycle finding into a project-level issue.
///
/// Returns `None` when the cycle rule is not enabled for this run.
pub fn map_finding(finding: &CycleFinding, rules: &RuleSet, locale: Locale) -> Option<Issue> {
    if !rules.contains(PACKAGE_CYCLE_RULE) {
        return None;
    }

    Some(Issue {
        path: PROJECT_SUMMARY_PATH.to_string(),
        line: 0,
        column: 0,
        msg: cycle_message(finding, locale),
        rule: PACKAGE_CYCLE_RULE.to_string(),
        refs: Vec::new(),
    })
}

pub fn cycle_message(finding: &CycleFinding, locale: Locale) -> String {
    let chain = finding.render_chain();
    match locale {
        Locale::En => format!("Package({}) has a dependency cycle: {}", finding.package, chain),
        Locale::Zh => format!("Package({})存在依赖循环: {}", finding.package, chain),
    }
}
