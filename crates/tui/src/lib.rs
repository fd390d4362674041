//! # Groundwork terminal UI
//!
//! Interactive front end for the lead-intake client: a home screen with the
//! business's services and contact details, the public contact and quote
//! forms with address suggestions, and the admin prospect list.
//!
//! ## Architecture
//!
//! - `app`: the state machine. Keys and completed work in, effects out.
//! - `cmd`: runs effects against the prospect backend on spawned tasks.
//! - `ui`: stateless rendering plus the runtime that owns the terminal.

mod app;
mod cmd;
mod theme;
mod ui;

use anyhow::Result;
use groundwork_util::SiteConfig;

/// Run the terminal UI until the user quits.
///
/// # Errors
///
/// Fails when the HTTP clients cannot be built from `config` or the
/// terminal cannot be switched into raw mode.
pub async fn run(config: SiteConfig) -> Result<()> {
    ui::runtime::run_app(config).await
}
