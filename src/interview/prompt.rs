use std::io::{BufRead, Write};

use super::PromptError;

/// One selectable answer. `key` is what the scorers expect.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Choice {
    pub key: &'static str,
    pub label: &'static str,
}

/// Line-oriented prompts over any reader/writer pair. Every question
/// re-asks until it gets a usable answer; end of input aborts.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn into_output(self) -> W {
        self.output
    }

    pub(crate) fn say(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        match default {
            Some(default) => write!(self.output, "{prompt} [{default}]: ")?,
            None => write!(self.output, "{prompt}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Aborted);
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn retry(&mut self, hint: &str) -> Result<(), PromptError> {
        writeln!(self.output, "  {hint}")?;
        Ok(())
    }

    /// Free text; blank input yields the default (possibly empty).
    pub(crate) fn text(&mut self, prompt: &str, default: &str) -> Result<String, PromptError> {
        let default = (!default.is_empty()).then_some(default);
        self.ask(prompt, default)
    }

    pub(crate) fn list(&mut self, prompt: &str, default: &str) -> Result<Vec<String>, PromptError> {
        let raw = self.text(prompt, default)?;
        Ok(split_list(&raw))
    }

    pub(crate) fn yes_no(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "Y/n" } else { "y/N" };
        let prompt = format!("{prompt} ({hint})");
        loop {
            let answer = self.ask(&prompt, None)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => self.retry("Please answer yes or no.")?,
            }
        }
    }

    pub(crate) fn count(&mut self, prompt: &str, default: u32) -> Result<u32, PromptError> {
        let default = default.to_string();
        loop {
            let answer = self.ask(prompt, Some(&default))?;
            match answer.replace(',', "").parse::<u32>() {
                Ok(value) => return Ok(value),
                Err(_) => self.retry("Please enter a whole number.")?,
            }
        }
    }

    /// Non-negative number; blank input means unknown unless a default is given.
    pub(crate) fn number(
        &mut self,
        prompt: &str,
        default: Option<f64>,
    ) -> Result<Option<f64>, PromptError> {
        let default = default.map(|value| value.to_string());
        loop {
            let answer = self.ask(prompt, default.as_deref())?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(Some(value)),
                _ => self.retry("Please enter a non-negative number, or leave blank if unknown.")?,
            }
        }
    }

    pub(crate) fn rating(&mut self, prompt: &str, max: u8) -> Result<u8, PromptError> {
        let prompt = format!("{prompt} (1-{max})");
        loop {
            let answer = self.ask(&prompt, None)?;
            match answer.parse::<u8>() {
                Ok(value) if (1..=max).contains(&value) => return Ok(value),
                _ => self.retry(&format!("Please enter a rating from 1 to {max}."))?,
            }
        }
    }

    pub(crate) fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Lists the options, then accepts an option number, key, or label.
    pub(crate) fn choice(
        &mut self,
        prompt: &str,
        options: &[Choice],
    ) -> Result<&'static str, PromptError> {
        self.choice_or(prompt, options, None)
    }

    /// Like `choice`, but a blank line selects `default` (an option key).
    pub(crate) fn choice_or(
        &mut self,
        prompt: &str,
        options: &[Choice],
        default: Option<&str>,
    ) -> Result<&'static str, PromptError> {
        writeln!(self.output, "{prompt}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", index + 1, option.label)?;
        }

        loop {
            let answer = self.ask("Select option", default)?;
            match pick(options, &answer) {
                Some(key) => return Ok(key),
                None => self.retry(&format!(
                    "Please enter a number between 1 and {}.",
                    options.len()
                ))?,
            }
        }
    }
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "1" | "true" => Some(true),
        "n" | "no" | "0" | "false" => Some(false),
        _ => None,
    }
}

fn pick(options: &[Choice], answer: &str) -> Option<&'static str> {
    let answer = answer.trim();
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(|option| option.key);
    }

    let normalized = answer.to_ascii_lowercase().replace([' ', '-'], "_");
    options
        .iter()
        .find(|option| {
            option.key == normalized || option.label.eq_ignore_ascii_case(answer)
        })
        .map(|option| option.key)
}
