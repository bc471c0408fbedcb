//! Minimal CSV reading for the threshold source file.
//!
//! Handles quoted fields and escaped quotes; that is all the threshold
//! table format needs.

/// Parse CSV text into a header row and data rows.
///
/// Expects the first line to be a header. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<(Vec<String>, Vec<Vec<String>>), String> {
    let mut lines = text.lines();

    let header_line = lines.next().ok_or("CSV is empty")?;
    let headers = parse_csv_line(header_line);

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err("CSV header row is empty".into());
    }

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_csv_line(line));
    }

    Ok((headers, rows))
}

/// Parse a single CSV line, handling quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote.
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(current.clone());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}
