//! Preview rendering of a discovered hierarchy

use std::fmt::Write;

use super::{Application, HierarchyRoot, Organization};
use crate::sanitize::Sanitizer;

const INDENT: &str = " -- ";

/// Render the hierarchy as an indented tree showing the target name of every node.
pub fn render_tree(root: &HierarchyRoot, sanitizer: &Sanitizer) -> String {
    let mut out = String::new();
    for org in &root.organizations {
        render_organization(&mut out, org, sanitizer, 0);
    }
    out
}

fn render_organization(out: &mut String, org: &Organization, sanitizer: &Sanitizer, depth: usize) {
    let _ = writeln!(
        out,
        "{}ORG: {} (to be created as {})",
        INDENT.repeat(depth),
        org.name,
        org.safe_name(sanitizer)
    );
    for app in &org.applications {
        render_application(out, app, sanitizer, depth + 1);
    }
    for sub in &org.sub_organizations {
        render_organization(out, sub, sanitizer, depth + 1);
    }
}

fn render_application(out: &mut String, app: &Application, sanitizer: &Sanitizer, depth: usize) {
    let _ = writeln!(
        out,
        "{}APP: {} (to be created as {})",
        INDENT.repeat(depth),
        app.name,
        app.safe_name(sanitizer)
    );
}
