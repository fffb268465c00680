use std::io::BufRead;

/// Resolves a process's cgroup membership path from its `/proc/<pid>/cgroup`
/// content.
///
/// Each line has the form `<hierarchy-id>:<controller-list>:<path>`. The v2
/// unified entry (`0::<path>`) is preferred; on a pure v1 host the first
/// line carrying a non-empty path is used instead. Returns `Ok(None)` when
/// no line yields a path.
///
/// # Errors
///
/// Returns an error if reading from `buf` fails.
pub fn membership_path<R: BufRead>(buf: &mut R) -> std::io::Result<Option<String>> {
    let mut fallback = None;

    let mut line = String::new();
    while buf.read_line(&mut line)? != 0 {
        let mut parts = line.trim_end().splitn(3, ':');
        if let (Some(hierarchy), Some(_controllers), Some(path)) =
            (parts.next(), parts.next(), parts.next())
        {
            if hierarchy == "0" {
                return Ok(Some(path.to_owned()));
            }
            if fallback.is_none() && !path.is_empty() {
                fallback = Some(path.to_owned());
            }
        }

        line.clear();
    }

    Ok(fallback)
}
