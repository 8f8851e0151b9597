// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance task list parsing.

/// Separator used in the "Maintenance Tasks" column.
pub const TASK_DELIMITER: char = '-';

/// Split a delimited task cell into trimmed, non-empty task names.
pub fn split_tasks(cell: &str, delimiter: char) -> Vec<String> {
    cell.split(delimiter)
        .map(str::trim)
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            split_tasks("Inspect - Lubricate -  Replace", TASK_DELIMITER),
            ["Inspect", "Lubricate", "Replace"]
        );
    }

    #[test]
    fn drops_empty_pieces() {
        assert_eq!(
            split_tasks("- Inspect --  - Replace -", TASK_DELIMITER),
            ["Inspect", "Replace"]
        );
        assert!(split_tasks("   ", TASK_DELIMITER).is_empty());
        assert!(split_tasks("", TASK_DELIMITER).is_empty());
    }

    #[test]
    fn custom_delimiter() {
        assert_eq!(split_tasks("Clean; Test", ';'), ["Clean", "Test"]);
    }
}
