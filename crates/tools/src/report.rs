//! Markdown research reports.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

/// A titled report made of ordered sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub title: String,
    /// The token or contract the report is about.
    pub subject: Option<String>,
    /// `(heading, body)` pairs, rendered in order.
    pub sections: Vec<(String, String)>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Append a section. An empty heading renders the body alone.
    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push((heading.into(), body.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        if let Some(subject) = &self.subject {
            out.push_str(&format!("## Token: {subject}\n\n"));
        }

        let sections: Vec<String> = self
            .sections
            .iter()
            .map(|(heading, body)| {
                if heading.is_empty() {
                    body.clone()
                } else {
                    format!("## {heading}\n\n{body}")
                }
            })
            .collect();
        out.push_str(&sections.join("\n\n"));
        out
    }

    /// Render into `dir`, named by [`report_filename`]. Returns the path.
    pub fn write<Tz>(&self, dir: &Path, prefix: &str, now: &DateTime<Tz>) -> Result<PathBuf>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report directory {}", dir.display()))?;
        let path = dir.join(report_filename(prefix, now));
        fs::write(&path, self.render())
            .with_context(|| format!("failed to write report {}", path.display()))?;
        Ok(path)
    }
}

/// `{prefix}_{YYYY-MM-DD}_{HH-MM-SS}.md`
pub fn report_filename<Tz>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{prefix}_{}.md", now.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sections_render_in_order() {
        let report = Report::new("Swarm Agent Research Report")
            .subject("0xf1fc9580784335b2613c1392a530c1aa2a69ba3d")
            .section("Market", "up only")
            .section("Social", "very loud")
            .section("", "closing words");

        assert_eq!(
            report.render(),
            "# Swarm Agent Research Report\n\n\
             ## Token: 0xf1fc9580784335b2613c1392a530c1aa2a69ba3d\n\n\
             ## Market\n\nup only\n\n\
             ## Social\n\nvery loud\n\n\
             closing words"
        );
    }

    #[test]
    fn no_subject_no_token_line() {
        let text = Report::new("Notes").section("A", "b").render();
        assert_eq!(text, "# Notes\n\n## A\n\nb");
    }

    #[test]
    fn filename_uses_the_clock() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            report_filename("swarm_report", &now),
            "swarm_report_2025-03-07_09-05-02.md"
        );
    }

    #[test]
    fn write_creates_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("reports");
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();

        let path = Report::new("T").write(&dir, "r", &now).unwrap();
        assert_eq!(path, dir.join("r_2025-12-31_23-59-59.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# T\n\n");
    }
}
