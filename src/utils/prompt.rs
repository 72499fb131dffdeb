use std::io::{self, BufRead, Write};

/// Print `question` and read one line from `input`. Only `y` or `Y` confirms;
/// end of input counts as no.
pub fn confirm<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
