//! Completion candidates for the interactive prompt.
//!
//! Pure computation with no effect on command semantics: the prompt asks
//! for candidates for the text typed so far and renders them however it
//! likes. Command names complete case-insensitively; after `load`/`dump`
//! the discovered data-file names complete, up to the two-file argument
//! limit.

/// Returns the candidate completions for `input`.
#[must_use]
pub fn completion_candidates(
    input: &str,
    commands: &[&str],
    file_names: &[String],
) -> Vec<String> {
    if input.trim().is_empty() {
        return commands.iter().map(|cmd| (*cmd).to_string()).collect();
    }

    let ends_with_space = input.ends_with(' ');
    let Some(parts) = shlex::split(input) else {
        // Unmatched quotes: nothing sensible to offer.
        return Vec::new();
    };

    // Still typing the command word itself.
    if !input.contains(' ') {
        let prefix = input.to_lowercase();
        return commands
            .iter()
            .filter(|cmd| cmd.to_lowercase().starts_with(&prefix))
            .map(|cmd| (*cmd).to_string())
            .collect();
    }

    let Some((command, used)) = parts.split_first() else {
        return Vec::new();
    };
    if !matches!(command.to_lowercase().as_str(), "load" | "dump") {
        return Vec::new();
    }
    // Both file slots filled.
    if used.len() >= 2 {
        return Vec::new();
    }

    let last_word = if ends_with_space {
        ""
    } else {
        used.last().map(String::as_str).unwrap_or("")
    };
    file_names
        .iter()
        .filter(|name| !used.contains(*name))
        .filter(|name| last_word.is_empty() || name.starts_with(last_word))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMANDS: &[&str] = &[
        "load", "dump", "alias", "del", "outdate", "view", "generate", "exit", "help", "?",
    ];

    fn files() -> Vec<String> {
        vec![
            "results_desensitized.csv".to_string(),
            "alias.txt".to_string(),
        ]
    }

    #[test]
    fn test_empty_input_lists_all_commands() {
        let candidates = completion_candidates("", COMMANDS, &files());
        assert_eq!(candidates.len(), COMMANDS.len());
    }

    #[test]
    fn test_command_prefix_matching() {
        let candidates = completion_candidates("d", COMMANDS, &files());
        assert_eq!(candidates, ["dump", "del"]);
        // Case-insensitive.
        let candidates = completion_candidates("LO", COMMANDS, &files());
        assert_eq!(candidates, ["load"]);
    }

    #[test]
    fn test_file_completion_after_load() {
        let candidates = completion_candidates("load ", COMMANDS, &files());
        assert_eq!(candidates.len(), 2);

        let candidates = completion_candidates("load res", COMMANDS, &files());
        assert_eq!(candidates, ["results_desensitized.csv"]);
    }

    #[test]
    fn test_used_file_excluded() {
        let candidates = completion_candidates("load results_desensitized.csv ", COMMANDS, &files());
        assert_eq!(candidates, ["alias.txt"]);
    }

    #[test]
    fn test_no_file_completion_for_other_commands() {
        let candidates = completion_candidates("del ", COMMANDS, &files());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_two_file_limit() {
        let candidates =
            completion_candidates("load results_desensitized.csv alias.txt ", COMMANDS, &files());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_unmatched_quote_yields_nothing() {
        let candidates = completion_candidates("load \"unfinished", COMMANDS, &files());
        assert!(candidates.is_empty());
    }
}
