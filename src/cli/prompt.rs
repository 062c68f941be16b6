//! Interactive prompts for missing credentials and confirmation

use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::error::Result;

/// Source of values the user did not supply up front
pub trait Prompter {
    /// Ask for a visible value
    fn input(&self, prompt: &str) -> Result<String>;

    /// Ask for a hidden value
    fn secret(&self, prompt: &str) -> Result<String>;
}

/// Terminal prompts via dialoguer
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn secret(&self, prompt: &str) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }
}

/// Yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(answer)
}
