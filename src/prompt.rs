// Line-oriented prompting over an injected reader/writer pair, plus the
// field validators used by the add and edit flows. Nothing here touches
// the data-access layer.

use crate::error::PromptError;
use crossterm::style::{style, Color, Stylize};
use regex::Regex;
use std::io::{BufRead, Write};
use std::sync::LazyLock;
use thiserror::Error;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("country code pattern"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z ]*$").expect("country name pattern"));

pub const MAX_CODE_LEN: usize = 3;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRejection {
    #[error("The country code must contain only letters, and must not be blank.")]
    NotAlphabetic,
    #[error("The country code must contain at most three letters.")]
    TooLong,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    #[error("The country name must start with a letter and contain only letters and spaces.")]
    Invalid,
}

/// Accepts 1-3 ASCII letters and returns them uppercased.
pub fn validate_code(input: &str) -> Result<String, CodeRejection> {
    if !CODE_RE.is_match(input) {
        return Err(CodeRejection::NotAlphabetic);
    }
    if input.len() > MAX_CODE_LEN {
        return Err(CodeRejection::TooLong);
    }
    Ok(input.to_ascii_uppercase())
}

/// Accepts letters and spaces, starting with a letter; first character
/// upper, the rest lower.
pub fn validate_name(input: &str) -> Result<String, NameRejection> {
    if !NAME_RE.is_match(input) {
        return Err(NameRejection::Invalid);
    }
    let (head, tail) = input.split_at(1);
    Ok(format!(
        "{}{}",
        head.to_ascii_uppercase(),
        tail.to_ascii_lowercase()
    ))
}

/// `Y` or `YES`, any case. Everything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Parse a decimal typed by the user. A malformed value is an input error
/// for the menu loop to report; range checking is left to the caller.
pub fn parse_decimal(input: &str) -> Result<f64, PromptError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| PromptError::Input(NUMERIC_ONLY.to_string()))
}

pub fn is_valid_percent(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

pub const NUMERIC_ONLY: &str = "You are only allowed to pass in numerical values.";

/// Reads answers from `reader` and writes prompts and messages to `writer`.
///
/// Every read goes through [`Prompter::read_line`], so a closed or broken
/// input stream always surfaces as a fatal [`PromptError`].
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter {
            reader,
            writer,
            styled: false,
        }
    }

    /// Enable ANSI colours for warnings and errors (only useful on a terminal).
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// One line of input without its line terminator.
    pub fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.writer, "\n{prompt}  ")?;
        self.writer.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.writer, "\n{message}")?;
        Ok(())
    }

    pub fn warn(&mut self, message: &str) -> Result<(), PromptError> {
        let text = self.paint(message, Color::Yellow);
        self.say(&text)
    }

    pub fn error(&mut self, message: &str) -> Result<(), PromptError> {
        let text = self.paint(message, Color::Red);
        self.say(&text)
    }

    fn paint(&self, message: &str, color: Color) -> String {
        if self.styled {
            style(message).with(color).to_string()
        } else {
            message.to_string()
        }
    }

    /// Yes/no question; see [`is_affirmative`].
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.ask(&format!("{question} (YES/any other value)"))?;
        Ok(is_affirmative(&answer))
    }

    /// Re-prompts until a valid country code is entered.
    pub fn country_code(&mut self) -> Result<String, PromptError> {
        loop {
            let input = self.ask("Enter a country code (it must be of the form AZB, ROM and so on):")?;
            match validate_code(&input) {
                Ok(code) => return Ok(code),
                Err(rejection) => self.warn(&rejection.to_string())?,
            }
        }
    }

    /// Re-prompts until a valid country name is entered.
    pub fn country_name(&mut self) -> Result<String, PromptError> {
        loop {
            let input = self.ask("Enter a country name:")?;
            match validate_name(&input) {
                Ok(name) => return Ok(name),
                Err(rejection) => self.warn(&rejection.to_string())?,
            }
        }
    }

    /// Optional percentage for `column`. `action` is the verb shown in the
    /// question ("enter" or "edit"). Declining, or typing a value outside
    /// 0-100, leaves the field unknown.
    pub fn percent(&mut self, column: &str, action: &str) -> Result<Option<f64>, PromptError> {
        if !self.confirm(&format!("Do you want to {action} the value for the {column} column?"))? {
            return Ok(None);
        }

        let input = self.ask(&format!(
            "Enter the {column} value (must be a decimal value between 0 and 100):"
        ))?;
        let value = parse_decimal(&input)?;
        if !is_valid_percent(value) {
            self.warn(&format!(
                "The value you entered is not between the 0.0-100.0 range.\n\
                 It is assumed that you didn't enter a value at all for the {column} column."
            ))?;
            return Ok(None);
        }
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_writer()).unwrap()
    }

    #[test]
    fn code_validation() {
        assert_eq!(validate_code("fra"), Ok("FRA".to_string()));
        assert_eq!(validate_code("Us"), Ok("US".to_string()));
        assert_eq!(validate_code("x"), Ok("X".to_string()));
        assert_eq!(validate_code(""), Err(CodeRejection::NotAlphabetic));
        assert_eq!(validate_code("F1"), Err(CodeRejection::NotAlphabetic));
        assert_eq!(validate_code(" FR"), Err(CodeRejection::NotAlphabetic));
        assert_eq!(validate_code("FRAN"), Err(CodeRejection::TooLong));
    }

    #[test]
    fn name_validation() {
        assert_eq!(validate_name("gERMANY"), Ok("Germany".to_string()));
        assert_eq!(validate_name("united KINGDOM"), Ok("United kingdom".to_string()));
        assert_eq!(validate_name(""), Err(NameRejection::Invalid));
        assert_eq!(validate_name("   "), Err(NameRejection::Invalid));
        assert_eq!(validate_name(" france"), Err(NameRejection::Invalid));
        assert_eq!(validate_name("south sudan "), Ok("South sudan ".to_string()));
        assert_eq!(validate_name("C0te"), Err(NameRejection::Invalid));
        assert_eq!(validate_name("Cote-d'Ivoire"), Err(NameRejection::Invalid));
    }

    #[test]
    fn affirmative_answers() {
        for yes in ["y", "Y", "yes", "YeS"] {
            assert!(is_affirmative(yes), "{yes}");
        }
        for no in ["", "n", "no", "yep", " yes"] {
            assert!(!is_affirmative(no), "{no}");
        }
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        assert!(is_valid_percent(0.0));
        assert!(is_valid_percent(100.0));
        assert!(!is_valid_percent(-0.1));
        assert!(!is_valid_percent(100.01));
        assert!(!is_valid_percent(f64::NAN));
    }

    #[test]
    fn code_prompt_reprompts_until_valid() {
        let mut p = prompter("france\n12\nfra\n");
        assert_eq!(p.country_code().unwrap(), "FRA");
        let out = output(p);
        assert!(out.contains("at most three letters"));
        assert!(out.contains("only letters, and must not be blank"));
    }

    #[test]
    fn name_prompt_capitalizes() {
        let mut p = prompter("\nfrance\n");
        assert_eq!(p.country_name().unwrap(), "France");
    }

    #[test]
    fn percent_declined_is_unknown() {
        let mut p = prompter("no\n");
        assert_eq!(p.percent("Internet Users", "enter").unwrap(), None);
    }

    #[test]
    fn percent_out_of_range_is_unknown_with_message() {
        let mut p = prompter("YES\n150\n");
        assert_eq!(p.percent("Internet Users", "enter").unwrap(), None);
        assert!(output(p).contains("not between the 0.0-100.0 range"));
    }

    #[test]
    fn percent_accepted() {
        let mut p = prompter("yes\n55.5\n");
        assert_eq!(p.percent("Adult Literacy", "edit").unwrap(), Some(55.5));
        assert!(output(p).contains("Do you want to edit the value for the Adult Literacy column?"));
    }

    #[test]
    fn malformed_percent_is_recoverable() {
        let mut p = prompter("y\nabc\n");
        let err = p.percent("Internet Users", "enter").unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), NUMERIC_ONLY);
    }

    #[test]
    fn exhausted_input_is_fatal() {
        let mut p = prompter("toolong\n");
        let err = p.country_code().unwrap_err();
        assert!(matches!(err, PromptError::EndOfInput));
    }

    #[test]
    fn line_endings_are_stripped() {
        let mut p = prompter("abc\r\n");
        assert_eq!(p.read_line().unwrap(), "abc");
    }

    #[test]
    fn styled_output_is_colored() {
        // crossterm drops colours entirely when NO_COLOR is set
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let mut p = prompter("").styled(true);
        p.warn("careful").unwrap();
        let out = output(p);
        assert!(out.contains("careful"));
        assert!(out.contains("\u{1b}["));
        assert_ne!(out, "\ncareful\n");
    }

    #[test]
    fn unstyled_output_is_plain_text() {
        let mut p = prompter("");
        p.error("boom").unwrap();
        assert_eq!(output(p), "\nboom\n");
    }
}
