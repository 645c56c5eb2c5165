use std::{ffi::OsStr, str::FromStr};

use crate::arg_parse_err::ArgParseErr;

/// Parses a number, ignoring surrounding whitespace like imagemagick does.
pub fn parse_numeric_arg<T>(input: &OsStr) -> Result<T, ArgParseErr>
where
    T: FromStr,
{
    let input = input.to_str().ok_or_else(ArgParseErr::new)?;
    input.trim().parse::<T>().map_err(|_| ArgParseErr::new())
}

/// Parses the value of `-quality`, which must be a finite number from 1 to 100.
pub fn parse_quality(input: &OsStr) -> Result<f64, ArgParseErr> {
    let quality: f64 = parse_numeric_arg(input)?;
    if !quality.is_finite() {
        return Err(ArgParseErr::new());
    }
    if !(1.0..=100.0).contains(&quality) {
        return Err(ArgParseErr::with_msg(format!(
            "quality must be between 1 and 100, got {quality}"
        )));
    }
    Ok(quality)
}
