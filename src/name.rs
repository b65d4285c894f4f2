//! Display names for executables.

/// File-name component of `path` with a case-insensitive `.exe` suffix removed.
///
/// Both `\` and `/` separate components and a leading volume (`C:` or
/// `\\host\share`) is ignored, so `C:\Program Files\Tool.EXE` becomes `Tool`.
pub fn display_name(path: &str) -> &str {
    let name = base_name(path);
    match name.len().checked_sub(4).and_then(|at| name.get(at..)) {
        Some(ext) if ext.eq_ignore_ascii_case(".exe") => &name[..name.len() - 4],
        _ => name,
    }
}

fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let path = strip_volume(path).trim_end_matches(is_separator);
    if path.is_empty() {
        return "\\";
    }
    path.rsplit(is_separator).next().unwrap_or(path)
}

fn strip_volume(path: &str) -> &str {
    match path.as_bytes() {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => &path[2..],
        [a, b, c, ..]
            if is_separator_byte(a) && is_separator_byte(b) && !is_separator_byte(c) && *c != b'.' =>
        {
            &path[unc_volume_len(path.as_bytes())..]
        }
        _ => path,
    }
}

/// Length of a leading `\\host\share`, or 0 when the share is missing.
fn unc_volume_len(bytes: &[u8]) -> usize {
    let Some(host_end) = bytes[2..].iter().position(is_separator_byte) else {
        return 0;
    };
    let share = host_end + 3;
    match bytes.get(share) {
        Some(c) if !is_separator_byte(c) && *c != b'.' => bytes[share..]
            .iter()
            .position(is_separator_byte)
            .map_or(bytes.len(), |end| share + end),
        _ => 0,
    }
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn is_separator_byte(b: &u8) -> bool {
    *b == b'\\' || *b == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_and_exe() {
        assert_eq!(display_name(r"C:\Program Files\Tool.exe"), "Tool");
        assert_eq!(display_name("/usr/bin/tool"), "tool");
        assert_eq!(display_name(r"bin/sub\agent.exe"), "agent");
    }

    #[test]
    fn exe_suffix_is_case_insensitive() {
        assert_eq!(display_name("Tool.EXE"), "Tool");
        assert_eq!(display_name("tool.ExE"), "tool");
    }

    #[test]
    fn other_extensions_are_kept() {
        assert_eq!(display_name(r"C:\scripts\run.cmd"), "run.cmd");
        assert_eq!(display_name("archive.exe.bak"), "archive.exe.bak");
        assert_eq!(display_name("exe"), "exe");
    }

    #[test]
    fn bare_exe_suffix_leaves_empty_name() {
        assert_eq!(display_name(".exe"), "");
    }

    #[test]
    fn drive_and_trailing_separators() {
        assert_eq!(display_name("C:tool.exe"), "tool");
        assert_eq!(display_name(r"C:\tools\"), "tools");
        assert_eq!(display_name(r"C:\"), "\\");
    }

    #[test]
    fn unc_volume_is_not_a_name() {
        assert_eq!(display_name(r"\\server\share"), "\\");
        assert_eq!(display_name(r"\\server\share\"), "\\");
        assert_eq!(display_name(r"\\server\share\bin\Agent.exe"), "Agent");
        assert_eq!(display_name("//server/share/tool.exe"), "tool");
    }

    #[test]
    fn incomplete_unc_prefix_is_an_ordinary_path() {
        assert_eq!(display_name(r"\\server"), "server");
        assert_eq!(display_name(r"\\server\"), "server");
    }

    #[test]
    fn degenerate_paths() {
        assert_eq!(display_name(""), ".");
        assert_eq!(display_name("//"), "\\");
    }

    #[test]
    fn multibyte_names_do_not_split_chars() {
        assert_eq!(display_name("ツール.exe"), "ツール");
        assert_eq!(display_name("ツール"), "ツール");
    }
}
