// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the excerpta command-line interface.
//!
//! One surface, three spellings: no argument or the literal token `all`
//! processes every collection directory under the working directory; a
//! single path argument processes that collection alone. Anything else is
//! rejected by clap with a non-zero exit before any work starts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "excerpta",
    about = "Persona-driven PDF section ranking and excerpt refinement",
    version
)]
pub struct Cli {
    /// Collection directory to process, or "all" (the default) to process
    /// every subdirectory named collection* under the working directory
    pub collection: Option<String>,
}

impl Cli {
    /// Does this invocation mean "process everything"?
    pub fn wants_all(&self) -> bool {
        match self.collection.as_deref() {
            None => true,
            Some(arg) => arg.eq_ignore_ascii_case("all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_argument_means_all() {
        let cli = Cli::parse_from(["excerpta"]);
        assert!(cli.wants_all());
    }

    #[test]
    fn literal_all_means_all_any_case() {
        assert!(Cli::parse_from(["excerpta", "all"]).wants_all());
        assert!(Cli::parse_from(["excerpta", "ALL"]).wants_all());
    }

    #[test]
    fn a_path_selects_one_collection() {
        let cli = Cli::parse_from(["excerpta", "Collection 1"]);
        assert!(!cli.wants_all());
        assert_eq!(cli.collection.as_deref(), Some("Collection 1"));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["excerpta", "a", "b"]).is_err());
    }
}
