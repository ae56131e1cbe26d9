//! Thin wrappers over the dialoguer prompts. A cancelled prompt
//! (Ctrl+C or a closed terminal) exits the wizard cleanly instead of
//! bubbling an error through every menu.

use std::sync::OnceLock;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use vidflow_core::locale::Locale;

use crate::ui;

fn theme() -> &'static ColorfulTheme {
    static THEME: OnceLock<ColorfulTheme> = OnceLock::new();
    THEME.get_or_init(ColorfulTheme::default)
}

fn cancelled() -> ! {
    ui::goodbye();
    std::process::exit(0);
}

pub fn select(prompt: &str, items: &[&str], default: usize) -> usize {
    match Select::with_theme(theme())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
    {
        Ok(choice) => choice,
        Err(_) => cancelled(),
    }
}

pub fn multi_select(prompt: &str, items: &[&str]) -> Vec<usize> {
    match MultiSelect::with_theme(theme())
        .with_prompt(prompt)
        .items(items)
        .interact()
    {
        Ok(choices) => choices,
        Err(_) => cancelled(),
    }
}

pub fn input(prompt: &str, default: Option<&str>) -> String {
    let mut builder = Input::<String>::with_theme(theme()).with_prompt(prompt);
    builder = match default {
        Some(value) => builder.default(value.to_string()),
        None => builder.allow_empty(true),
    };
    match builder.interact_text() {
        Ok(value) => value.trim().to_string(),
        Err(_) => cancelled(),
    }
}

/// Free-text input where an empty answer means "skip".
pub fn optional_input(prompt: &str) -> Option<String> {
    let value = input(prompt, None);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn select_locale(prompt: &str, current: Locale) -> Locale {
    let labels: Vec<&str> = Locale::ALL.iter().map(|l| l.label()).collect();
    let default = Locale::ALL.iter().position(|l| *l == current).unwrap_or(0);
    Locale::ALL[select(prompt, &labels, default)]
}

pub fn confirm(prompt: &str, default: bool) -> bool {
    match Confirm::with_theme(theme())
        .with_prompt(prompt)
        .default(default)
        .interact()
    {
        Ok(answer) => answer,
        Err(_) => cancelled(),
    }
}

/// Wait for Enter before returning to the menu.
pub fn pause(prompt: &str) {
    let _ = Input::<String>::with_theme(theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text();
}
