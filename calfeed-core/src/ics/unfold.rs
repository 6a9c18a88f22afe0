//! Line unfolding.

/// Join physically wrapped lines into logical lines.
///
/// Lines are split on LF, with a trailing CR dropped. A line starting with a
/// space or horizontal tab continues the previous logical line: its first
/// character is removed and the rest is appended. A continuation with nothing
/// before it is dropped.
pub fn unfold_lines(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for raw in input.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            if let Some(acc) = current.as_mut() {
                acc.push_str(rest);
            }
            continue;
        }

        if let Some(done) = current.replace(line.to_string()) {
            lines.push(done);
        }
    }

    if let Some(done) = current {
        lines.push(done);
    }

    lines
}
