use std::io::{self, BufRead, Write};

use crate::scanner;

/// Run the interactive token dump. Each line is scanned on its own, so a
/// block comment cannot span lines here.
pub fn run_repl() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().expect("flush stdout");

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // Ctrl-D / EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("read error: {e}");
                break;
            }
        }

        for row in render_line(line.trim_end_matches(['\n', '\r'])) {
            println!("{row}");
        }
    }
}

/// Token lines followed by diagnostic lines for one REPL input.
fn render_line(line: &str) -> Vec<String> {
    let mut rows: Vec<String> = scanner::lex(line).map(|t| t.to_string()).collect();
    rows.extend(
        scanner::diagnostics(line)
            .into_iter()
            .map(|e| format!("warning @{}: {e}", e.offset())),
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tokens_then_warnings() {
        assert_eq!(
            render_line("x = 1 /*"),
            vec![
                "Identifier 'x' @0",
                "Operator '=' @2",
                "NumericLiteral '1' @4",
                "warning @6: unterminated block comment",
            ]
        );
    }

    #[test]
    fn blank_line_renders_nothing() {
        assert!(render_line("   ").is_empty());
    }
}
