//! Terminal output helpers: styling, the banner, and the tiny
//! two-language text switch used across the menus.

use console::{style, Term};
use vidflow_core::locale::Locale;

/// Pick the string for the active interface language.
pub fn tr<'a>(lang: Locale, en: &'a str, zh: &'a str) -> &'a str {
    match lang {
        Locale::En => en,
        Locale::Zh => zh,
    }
}

pub fn banner() {
    let term = Term::stdout();
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{}",
        style("  vidflow · video script workspace wizard").cyan().bold()
    ));
    let _ = term.write_line(&format!(
        "  {}",
        style(format!("v{}", vidflow_core::version())).dim()
    ));
    let _ = term.write_line("");
}

pub fn section(label: &str) {
    println!();
    println!("{}", style(format!("── {label} ──")).cyan().bold());
}

pub fn success(msg: &str) {
    println!("{} {msg}", style("✔").green().bold());
}

pub fn warn(msg: &str) {
    println!("{} {msg}", style("!").yellow().bold());
}

pub fn error(msg: &str) {
    eprintln!("{} {msg}", style("✘").red().bold());
}

pub fn info(msg: &str) {
    println!("{} {msg}", style("·").dim());
}

pub fn item(msg: &str) {
    println!("  {msg}");
}

/// Farewell printed on quit and on Ctrl+C, in both languages since the
/// interrupt path has no locale at hand.
pub fn goodbye() {
    println!();
    println!("{}", style("再见！ Bye!").cyan());
}

pub fn noninteractive_notice() {
    println!("vidflow v{}", vidflow_core::version());
    println!("This tool is an interactive wizard and needs a terminal.");
    println!("Run it from an interactive shell, optionally with --root <dir>.");
}
