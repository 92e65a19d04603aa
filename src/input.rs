//! Parsing of raw user input into setting values.
//!
//! This is the boundary where ranges are enforced: percentages are clamped into
//! `[0, 1]` and every spelling of "no limit" becomes [`Limit::Unlimited`] before a
//! value is assigned to the settings tree.

use thiserror::Error;

use crate::settings::Limit;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no value was entered")]
    Empty,

    #[error("'{input}' is not a number")]
    NotANumber { input: String },
}


const SUFFIXES: [char; 4] = ['K', 'M', 'G', 'T'];

fn parse_number(input: &str) -> Result<f64, InputError> {
    let value = input
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            input: input.to_string(),
        })?;

    if value.is_nan() {
        return Err(InputError::NotANumber {
            input: input.to_string(),
        });
    }

    Ok(value)
}


/// Parses a percentage entered as a fraction and clamps it into `[0, 1]`.
///
/// ```
/// use kitten_config::input::parse_percentage;
///
/// assert_eq!(parse_percentage("1.5"), Ok(1.0));
/// assert_eq!(parse_percentage("-0.2"), Ok(0.0));
/// assert_eq!(parse_percentage(" 0.35 "), Ok(0.35));
/// ```
pub fn parse_percentage(raw: &str) -> Result<f64, InputError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(parse_number(input)?.clamp(0.0, 1.0))
}


/// Parses a maximum or stock amount.
///
/// Accepts plain integers (fractions are cut off), exponent notation (`2e6`) and a
/// `K`/`M`/`G`/`T` suffix multiplying by powers of 1000. Negative amounts, infinity
/// and `∞` all mean "no limit".
pub fn parse_limit(raw: &str) -> Result<Limit, InputError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    if input == "∞" {
        return Ok(Limit::Unlimited);
    }

    let (base, multiplier) = match input.chars().last() {
        Some(suffix) if SUFFIXES.contains(&suffix) => {
            let exponent = SUFFIXES
                .iter()
                .position(|candidate| *candidate == suffix)
                .map_or(0, |index| index as i32 + 1);

            (&input[..input.len() - suffix.len_utf8()], 1000f64.powi(exponent))
        }
        _ => (input, 1.0),
    };

    let value = parse_number(base.trim())? * multiplier;

    Limit::try_from(value).map_err(|_| InputError::NotANumber {
        input: input.to_string(),
    })
}


/// Formats a limit for display, with a magnitude suffix for large amounts.
pub fn render_limit(limit: Limit) -> String {
    let count = match limit {
        Limit::Unlimited => return "∞".to_string(),
        Limit::Count(count) => count,
    };

    let mut scaled = count as f64;
    let mut suffix = None;
    for candidate in SUFFIXES {
        if scaled < 1000.0 {
            break;
        }
        scaled /= 1000.0;
        suffix = Some(candidate);
    }

    match suffix {
        None => count.to_string(),
        Some(suffix) => {
            let formatted = format!("{scaled:.2}");
            let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
            format!("{formatted}{suffix}")
        }
    }
}


/// Formats a trigger value with three decimals.
pub fn render_percentage(value: f64) -> String {
    format!("{value:.3}")
}
