//! Terminal session: raw mode on the alternate screen for as long as a
//! [`Tui`] is alive.

use color_eyre::eyre::Result;
use ratatui::{DefaultTerminal, Frame};

/// Owns the terminal while the UI runs. Dropping it restores the shell.
pub struct Tui {
    terminal: DefaultTerminal,
}

impl Tui {
    /// Enable raw mode, switch to the alternate screen and clear it.
    ///
    /// ratatui also chains a panic hook here that restores the terminal
    /// before any previously installed hook runs.
    pub fn enter() -> Result<Self> {
        let mut terminal = ratatui::try_init()?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Current size as (columns, rows).
    pub fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Route errors and panics through color-eyre reports.
///
/// Call before [`Tui::enter`] so the terminal is restored before a report
/// is printed.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .panic_section("The log file (--log-file, default /tmp/atlas.log) has the details.")
        .into_hooks();

    eyre_hook.install()?;
    panic_hook.install();
    Ok(())
}
