/// A raw record: optional name line, then line 1 and line 2.
pub type TleRecord = (Option<String>, String, String);

/// Splits text holding any number of 2- or 3-line records. Lines that do
/// not belong to a record are skipped.
pub fn parse_multi_tle(content: &str) -> Vec<TleRecord> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].trim_start_matches("0 ").trim().to_string();
            result.push((Some(name), lines[i + 1].to_string(), lines[i + 2].to_string()));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
