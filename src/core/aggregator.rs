use crate::domain::model::{Artifact, GroupReport, HostsArtifacts};

pub const DEFAULT_UPDATE_BASE_URL: &str = "https://raw.githubusercontent.com/oopsunix/hosts/main";
pub const COMBINED_FILE_NAME: &str = "hosts";

/// `hosts_<lower-cased group name>`
pub fn group_file_name(group: &str) -> String {
    format!("hosts_{}", group.to_lowercase())
}

/// Renders resolution reports into hosts-file text. One renderer per run, so
/// every artifact carries the same timestamp.
pub struct HostsRenderer<'a> {
    base_url: &'a str,
    timestamp: &'a str,
}

impl<'a> HostsRenderer<'a> {
    pub fn new(base_url: &'a str, timestamp: &'a str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            timestamp,
        }
    }

    fn start_marker(name: &str) -> String {
        format!("# {} Hosts Start\n", name)
    }

    fn end_marker(name: &str) -> String {
        format!("# {} Hosts End", name)
    }

    fn time_line(&self) -> String {
        format!("# Update Time: {} (UTC+8) \n", self.timestamp)
    }

    // 未解析的網域不輸出任何行
    fn address_lines(report: &GroupReport) -> String {
        let mut lines = String::new();
        for entry in &report.entries {
            for ip in entry.result.addresses() {
                lines.push_str(&format!("{}\t\t{}\n", ip, entry.domain));
            }
        }
        lines
    }

    /// Stand-alone block for one group, with its own update trailer.
    pub fn render_group(&self, report: &GroupReport) -> String {
        let mut content = Self::start_marker(&report.name);
        content.push_str(&Self::address_lines(report));
        content.push_str(&self.time_line());
        content.push_str(&format!(
            "# Update URL: {}/host_{}\n",
            self.base_url,
            report.name.to_lowercase()
        ));
        content.push_str(&Self::end_marker(&report.name));
        content
    }

    /// Every group block followed by one shared trailer.
    pub fn render_combined(&self, reports: &[GroupReport]) -> String {
        let mut content = String::new();
        for report in reports {
            content.push_str(&Self::start_marker(&report.name));
            content.push_str(&Self::address_lines(report));
            content.push_str(&Self::end_marker(&report.name));
            content.push_str("\n\n");
        }
        content.push_str(&self.time_line());
        content.push_str(&format!(
            "# Update URL: {}/{}\n",
            self.base_url, COMBINED_FILE_NAME
        ));
        content
    }

    pub fn build_artifacts(&self, reports: &[GroupReport]) -> HostsArtifacts {
        HostsArtifacts {
            groups: reports
                .iter()
                .map(|report| Artifact {
                    name: group_file_name(&report.name),
                    contents: self.render_group(report),
                })
                .collect(),
            combined: Artifact {
                name: COMBINED_FILE_NAME.to_string(),
                contents: self.render_combined(reports),
            },
        }
    }
}
