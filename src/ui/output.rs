//! Output helpers for consistent CLI formatting
//!
//! Fancy output routes through cliclack so banners line up with its
//! prompts; non-interactive runs get plain tagged lines on stdout.

use super::context::UiContext;
use console::{style, Style};

/// Severity of a step or outro line
#[derive(Clone, Copy)]
enum Tone {
    Ok,
    Warn,
    Error,
    Info,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Ok => "[OK]",
            Tone::Warn => "[WARN]",
            Tone::Error => "[ERROR]",
            Tone::Info => "[INFO]",
        }
    }

    fn color(self) -> Style {
        match self {
            Tone::Ok => Style::new().green(),
            Tone::Warn => Style::new().yellow(),
            Tone::Error => Style::new().red(),
            Tone::Info => Style::new().cyan(),
        }
    }
}

fn step(ctx: &UiContext, tone: Tone, message: &str) {
    if ctx.use_fancy_output() {
        let result = match tone {
            Tone::Ok => cliclack::log::success(message),
            Tone::Warn => cliclack::log::warning(message),
            Tone::Error => cliclack::log::error(message),
            Tone::Info => cliclack::log::info(message),
        };
        result.ok();
    } else {
        println!("  {} {}", tone.color().apply_to(tone.tag()), message);
    }
}

fn outro(ctx: &UiContext, tone: Tone, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(tone.color().bold().apply_to(message)).ok();
    } else {
        println!();
        println!("{} {}", tone.color().apply_to(tone.tag()), message);
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
        println!();
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Ok, message);
}

/// Display error outro
pub fn outro_error(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Error, message);
}

/// Display warning outro
pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Warn, message);
}

/// Display a section header
pub fn section(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        println!();
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!();
        println!("{}", style(title).bold());
    }
}

/// Display a success step with a dimmed detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    step(
        ctx,
        Tone::Ok,
        &format!("{} ({})", message, style(detail).dim()),
    );
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    step(ctx, Tone::Warn, message);
}

/// Display an info step
pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Tone::Info, message);
}

/// Display a remark/hint
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}

/// Print styled key-value with status color
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    let tone = if ok { Tone::Ok } else { Tone::Warn };
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), tone.color().apply_to(value));
    } else {
        println!("  {} {}: {}", tone.tag(), key, value);
    }
}
