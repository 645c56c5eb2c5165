//! Command-line argument parsing.
//!
//! Options follow imagemagick conventions: they are prefixed by a single `-`, not `--`,
//! so an argument parsing library would not handle them. The parser is hand-rolled instead.

use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use crate::{
    arg_parse_err::ArgParseErr, arg_parsers::parse_quality, error::OrientateError, orientate_err,
    plan::ExecutionPlan,
};

use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Arg {
    Quality,
    Verbose,
}

impl Arg {
    pub fn needs_value(&self) -> bool {
        match self {
            Arg::Quality => true,
            Arg::Verbose => false,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Quality => "JPEG/PNG compression level for rotated images",
            Arg::Verbose => "print the outcome for every file",
        }
    }
}

impl ExecutionPlan {
    pub fn apply_arg(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), OrientateError> {
        let arg_string: &'static str = arg.into();
        if arg.needs_value() != value.is_some() {
            return Err(orientate_err!("argument requires a value: {}", arg_string));
        };

        self.apply_arg_inner(arg, value).map_err(|arg_err| {
            orientate_err!(arg_err.display_with_arg(arg_string, value.unwrap_or_default()))
        })
    }

    /// Split out so that parse errors can be decorated with the option name in one place.
    fn apply_arg_inner(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), ArgParseErr> {
        match (arg, value) {
            (Arg::Quality, Some(value)) => self.modifiers.quality = Some(parse_quality(value)?),
            (Arg::Verbose, None) => self.modifiers.verbose = true,
            _ => return Err(ArgParseErr::new()),
        }
        Ok(())
    }
}

/// Turns `argv` (including the binary name) into a plan.
pub fn parse_args(args: Vec<OsString>) -> Result<ExecutionPlan, OrientateError> {
    let mut plan = ExecutionPlan::default();

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if starts_with_sign(&raw_arg) {
            // A file named "-foobar.jpg" will be parsed as an option,
            // same as in imagemagick. Use "./-foobar.jpg" instead.
            let string_arg = arg_name(raw_arg)?;
            let arg = Arg::try_from(string_arg.as_str())
                .map_err(|_| orientate_err!("unrecognized option `{}'", string_arg))?;
            let value = if arg.needs_value() {
                Some(
                    iter.next()
                        .ok_or_else(|| orientate_err!("argument requires a value: {}", string_arg))?,
                )
            } else {
                None
            };
            plan.apply_arg(arg, value.as_deref())?;
        } else {
            plan.add_input_file(PathBuf::from(raw_arg));
        }
    }
    if plan.input_files.is_empty() {
        return Err(orientate_err!("no images defined")); // mimics imagemagick
    }
    Ok(plan)
}

/// Checks if the string starts with a `-` or a `+`
fn starts_with_sign(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    // a lone "-" or anything starting with two dashes is treated as a filename
    matches!(bytes.first(), Some(b'-' | b'+')) && bytes.len() > 1 && bytes.get(1) != Some(&b'-')
}

/// Strips the sign off an option
fn arg_name(raw_arg: OsString) -> Result<String, OrientateError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| orientate_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    string.remove(0);
    Ok(string)
}
