//! Shell-style tokenizer for `alias transport command...` lines.

use crate::advisor::domain::AdvisorDomainError;

/// Splits a command line on whitespace, honouring quotes.
///
/// Single and double quotes group whitespace into one token; a backslash
/// inside quotes escapes the next character and outside quotes is kept
/// verbatim, so Windows-style paths survive.
///
/// # Errors
///
/// Returns [`AdvisorDomainError::UnterminatedQuote`] when the input ends
/// inside a quoted value.
pub fn split_command_line(input: &str) -> Result<Vec<String>, AdvisorDomainError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes: Option<char> = None;
    let mut escaped = false;

    for character in input.chars() {
        if let Some(quote_char) = in_quotes {
            if escaped {
                current.push(character);
                escaped = false;
                continue;
            }

            match character {
                '\\' if quote_char == '"' => escaped = true,
                _ if character == quote_char => in_quotes = None,
                _ => current.push(character),
            }
            continue;
        }

        match character {
            '"' | '\'' => {
                in_quotes = Some(character);
                in_token = true;
            }
            _ if character.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(character);
                in_token = true;
            }
        }
    }

    if in_quotes.is_some() || escaped {
        return Err(AdvisorDomainError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
