//! Interactive stdin prompts for values not supplied as flags.

use std::io::{self, Write};

/// Default result count when the user enters nothing usable.
pub const DEFAULT_RESULT_COUNT: usize = 10;

/// Prints a prompt and reads one trimmed line from stdin.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Prompts for the desired result count.
///
/// Invalid or empty input falls back to [`DEFAULT_RESULT_COUNT`];
/// entered values are clamped to the API ceiling.
pub fn read_count(max: usize) -> io::Result<usize> {
    let input = read_line(&format!(
        "Enter number of results to retrieve (default {DEFAULT_RESULT_COUNT}, max {max}): "
    ))?;
    let count = input
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_RESULT_COUNT);
    Ok(count.min(max))
}

/// Prompts for a yes/no confirmation; only "yes" (case-insensitive) confirms.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let answer = read_line(prompt)?;
    Ok(answer.eq_ignore_ascii_case("yes"))
}
