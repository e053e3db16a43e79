//! CLI argument parsing using clap.

use clap::Parser;

/// `ticketsum` - write tickets by answering questions
///
/// Walks through a short questionnaire for an incident, pull request,
/// service request or development ticket and has an LLM backend turn the
/// answers into a finished summary.
///
/// The configuration directory defaults to `$XDG_CONFIG_HOME/ticketsum` and
/// can be overridden with `TICKETSUM_CONFIG_DIR`. Log verbosity is read from
/// `TICKETSUM_LOG`.
#[derive(Parser, Debug)]
#[command(name = "ticketsum", version, about, long_about = None)]
pub struct Args {}
