use std::collections::{HashMap, HashSet};
use std::fmt;

use mixwise_mix::is_uuid_shaped;
use serde::Serialize;

use crate::{CatalogImport, validate_slug};

/// Cocktails with fewer lines than this look truncated.
pub const MIN_INGREDIENT_LINES: usize = 2;
/// Cocktails with more lines than this look like a parsing accident.
pub const MAX_INGREDIENT_LINES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub findings: Vec<Finding>,
}

impl CatalogReport {
    fn push(&mut self, severity: Severity, subject: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            severity,
            subject: subject.into(),
            message: message.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Rejects ingredient text that is a placeholder or garbage from a bad scrape.
pub fn validate_ingredient_line(line: &str) -> Result<(), &'static str> {
    let line = line.trim();

    if line.is_empty() {
        return Err("empty ingredient");
    }

    if line.contains("???") {
        return Err("contains placeholder '???'");
    }

    if line == "null" || line == "None" {
        return Err("null ingredient");
    }

    if line.chars().count() < 2 {
        return Err("ingredient too short");
    }

    if line.contains('|') {
        return Err("contains '|' separator");
    }

    if !line.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("no letters in ingredient");
    }

    Ok(())
}

/// Data-quality pass over a catalog document before it is imported.
pub fn check_catalog(catalog: &CatalogImport) -> CatalogReport {
    let mut report = CatalogReport::default();
    let mut ingredient_ids = HashSet::new();
    let mut names: HashMap<String, &str> = HashMap::new();

    for ingredient in &catalog.ingredients {
        let id = ingredient.id.as_str();

        if !ingredient_ids.insert(id) {
            report.push(Severity::Error, id, "duplicate ingredient id");
        }

        if !is_uuid_shaped(id) {
            report.push(Severity::Warning, id, "ingredient id is not UUID-shaped");
        }

        if let Err(message) = validate_ingredient_line(&ingredient.name) {
            report.push(Severity::Error, id, message);
        }

        if let Some(previous) = names.insert(ingredient.name.to_lowercase(), id) {
            if previous != id {
                report.push(
                    Severity::Warning,
                    id,
                    format!("name '{}' is also used by {previous}", ingredient.name),
                );
            }
        }
    }

    let mut cocktail_ids = HashSet::new();
    let mut slugs = HashSet::new();

    for cocktail in &catalog.cocktails {
        let subject = cocktail.id.as_str();

        if !cocktail_ids.insert(subject) {
            report.push(Severity::Error, subject, "duplicate cocktail id");
        }

        for issue in validate_slug(&cocktail.slug) {
            let severity = if issue.is_error() {
                Severity::Error
            } else {
                Severity::Warning
            };
            report.push(severity, subject, issue.message());
        }

        if !cocktail.slug.is_empty() && !slugs.insert(cocktail.slug.as_str()) {
            report.push(
                Severity::Error,
                subject,
                format!("duplicate slug '{}'", cocktail.slug),
            );
        }

        let lines = cocktail.requirements.len();
        if lines < MIN_INGREDIENT_LINES {
            report.push(
                Severity::Warning,
                subject,
                format!("only {lines} ingredient(s)"),
            );
        } else if lines > MAX_INGREDIENT_LINES {
            report.push(
                Severity::Warning,
                subject,
                format!("{lines} ingredients, check for parsing errors"),
            );
        }

        for requirement in &cocktail.requirements {
            if !ingredient_ids.contains(requirement.ingredient_id.as_str()) {
                report.push(
                    Severity::Error,
                    subject,
                    format!("unknown ingredient '{}'", requirement.ingredient_id),
                );
            }
        }
    }

    report
}
