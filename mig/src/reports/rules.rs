//! Rules command report data structures.

use super::output::{Output, Report};

#[derive(Debug)]
pub struct RuleInfo {
    pub name: &'static str,
    pub directory: &'static str,
    pub description: &'static str,
}

/// Report data listing the upgrade rules.
#[derive(Debug)]
pub struct RulesReport {
    pub rules: Vec<RuleInfo>,
}

impl Report for RulesReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} upgrade rules", self.rules.len()));
        for rule in &self.rules {
            if rule.directory.is_empty() {
                out.list_item(rule.name);
            } else {
                out.list_item(&format!("{} ({})", rule.name, rule.directory));
            }
            out.detail(rule.description);
        }
    }
}
