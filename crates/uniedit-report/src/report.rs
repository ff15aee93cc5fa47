//! Renders the accumulated change log into a Markdown change report.
//!
//! The document structure is fixed: a title followed by the deleted,
//! outdated, and added-alias sections, in that order. The report is meant
//! to be pasted into the pull request that carries the regenerated data
//! files, so the wording matches the dataset's language.

use uniedit_model::{ChangeKind, ChangeLog};

const TITLE: &str = "# 修改日志\n以下是此PR的修改记录：";
const DELETED_HEADING: &str = "## 删除记录";
const OUTDATED_HEADING: &str = "## 标记过时";
const ADDED_HEADING: &str = "## 添加别名";

/// Placeholder rendered for a section with no entries.
const EMPTY_SECTION: &str = "无";

/// Renders the change log as a Markdown document.
///
/// Pure function of the log: record edits appear in first-insertion order
/// of their IDs, alias entries in invocation order. Never fails; an empty
/// log renders all three sections as the empty placeholder.
#[must_use]
pub fn generate_report(log: &ChangeLog) -> String {
    let mut deleted = Vec::new();
    let mut outdated = Vec::new();
    for entry in log.edits() {
        let line = match entry.kind {
            ChangeKind::Deletion => format!("删除了A{}", entry.id),
            ChangeKind::Outdate => format!("将A{}标记为过期", entry.id),
        };
        let line = with_attribution(line, &entry.issue_ids);
        match entry.kind {
            ChangeKind::Deletion => deleted.push(line),
            ChangeKind::Outdate => outdated.push(line),
        }
    }
    let added: Vec<String> = log
        .aliases()
        .iter()
        .map(|entry| {
            with_attribution(
                format!("添加了新的别名，{} -> {}", entry.old_name, entry.new_name),
                &entry.issue_ids,
            )
        })
        .collect();

    format!(
        "{TITLE}\n{DELETED_HEADING}\n{}\n{OUTDATED_HEADING}\n{}\n{ADDED_HEADING}\n{}\n",
        section(&deleted),
        section(&outdated),
        section(&added),
    )
}

/// Appends the attribution clause when issue IDs are present.
fn with_attribution(base: String, issue_ids: &[String]) -> String {
    if issue_ids.is_empty() {
        return base;
    }
    let refs: Vec<String> = issue_ids.iter().map(|id| format!("#{id}")).collect();
    format!("{base}，由于{}的反馈", refs.join(", "))
}

fn section(lines: &[String]) -> String {
    if lines.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_renders_placeholders() {
        let report = generate_report(&ChangeLog::new());
        assert_eq!(
            report,
            "# 修改日志\n以下是此PR的修改记录：\n\
             ## 删除记录\n无\n\
             ## 标记过时\n无\n\
             ## 添加别名\n无\n"
        );
    }

    #[test]
    fn test_example_scenario() {
        let mut log = ChangeLog::new();
        log.record_deletion("2", vec!["101".to_string(), "102".to_string()]);
        log.record_outdate("3", vec![]);
        log.record_alias("Old U", "New U", vec!["55".to_string()]);

        let report = generate_report(&log);
        assert!(report.contains("删除了A2，由于#101, #102的反馈"));
        assert!(report.contains("将A3标记为过期\n"));
        assert!(!report.contains("将A3标记为过期，"));
        assert!(report.contains("添加了新的别名，Old U -> New U，由于#55的反馈"));
    }

    #[test]
    fn test_last_edit_kind_wins() {
        let mut log = ChangeLog::new();
        log.record_deletion("7", vec![]);
        log.record_outdate("7", vec![]);

        let report = generate_report(&log);
        assert!(report.contains("将A7标记为过期"));
        assert!(!report.contains("删除了A7"));
        // The deleted section falls back to the placeholder.
        assert!(report.contains("## 删除记录\n无\n"));
    }

    #[test]
    fn test_repeated_aliases_all_rendered_in_order() {
        let mut log = ChangeLog::new();
        log.record_alias("A", "B", vec![]);
        log.record_alias("A", "C", vec![]);

        let report = generate_report(&log);
        let first = report.find("添加了新的别名，A -> B").unwrap();
        let second = report.find("添加了新的别名，A -> C").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_edits_render_in_first_insertion_order() {
        let mut log = ChangeLog::new();
        log.record_deletion("9", vec![]);
        log.record_deletion("1", vec![]);
        log.record_deletion("9", vec!["3".to_string()]);

        let report = generate_report(&log);
        let nine = report.find("删除了A9").unwrap();
        let one = report.find("删除了A1").unwrap();
        assert!(nine < one);
    }
}
