//! Interactive confirmation for destructive commands.

use dialoguer::{theme::ColorfulTheme, Confirm};

use super::output;
use crate::error::Result;

/// Ask before removing `what`. `--yes` and `--json` skip the prompt.
pub fn confirm_removal(what: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes || output::is_json() {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Remove {what}?"))
        .default(false)
        .interact()?;
    if !confirmed {
        output::note("Nothing removed.");
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_skips_prompt() {
        assert!(confirm_removal("template 1", true).unwrap());
    }
}
