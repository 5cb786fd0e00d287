//! Command-line interface definitions for wsdlbatch.

use clap::Parser;
use std::path::PathBuf;
use wsdlbatch_core::batch::{INPUT_DIR_ROLE, OUTPUT_DIR_ROLE};
use wsdlbatch_core::{BatchError, Result};

pub const USAGE: &str = "\
Usage:  wsdlbatch wsdldir <dir> jardir <dir>
        wsdldir = The directory into which the upstream generator has placed all the wsdl files it creates. Every .wsdl file therein is passed to the WSDL compiler.
        jardir  = The directory to which the resulting jars will be written.";

/// wsdlbatch - run the WSDL compiler over every .wsdl file in a directory
///
/// The invocation is exactly four positionals, so help and version flags
/// are disabled and every argument is taken as a value, hyphen or not.
#[derive(Parser, Debug)]
#[command(name = "wsdlbatch", about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(override_usage = "wsdlbatch wsdldir <dir> jardir <dir>")]
pub struct Cli {
    /// The literal keyword `wsdldir`
    #[arg(value_name = "wsdldir", allow_hyphen_values = true)]
    pub input_keyword: String,

    /// Directory holding the .wsdl files
    #[arg(value_name = "WSDL_DIR", allow_hyphen_values = true)]
    pub input_dir: PathBuf,

    /// The literal keyword `jardir`
    #[arg(value_name = "jardir", allow_hyphen_values = true)]
    pub output_keyword: String,

    /// Directory the artifacts are written to
    #[arg(value_name = "JAR_DIR", allow_hyphen_values = true)]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Both keywords must be present, in any letter case.
    pub fn check_keywords(&self) -> Result<()> {
        for (given, expected) in [
            (&self.input_keyword, INPUT_DIR_ROLE),
            (&self.output_keyword, OUTPUT_DIR_ROLE),
        ] {
            if !given.eq_ignore_ascii_case(expected) {
                return Err(BatchError::usage(format!(
                    "expected keyword '{expected}', found '{given}'"
                )));
            }
        }
        Ok(())
    }
}
