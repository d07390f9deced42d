//! Parsing user-entered colors and custom color names.

use colorant_harmony::{color, Rgb255};

use crate::{Error, Result};

pub const MAX_COLOR_NAME_LENGTH: usize = 50;

/// Parses `"120,85,45"`, spaces allowed around each channel.
pub fn parse_rgb(input: &str) -> Result<Rgb255> {
    let channels: Vec<&str> = input.split(',').map(str::trim).collect();

    let [r, g, b] = channels.as_slice() else {
        return Err(Error::InvalidCustomColor(format!(
            "`{}` needs three comma-separated channels",
            input
        )));
    };

    let channel = |value: &str| {
        value.parse::<u8>().map_err(|_| {
            Error::InvalidCustomColor(format!(
                "`{}` is not a channel value between 0 and 255",
                value
            ))
        })
    };

    Ok(Rgb255::new(channel(r)?, channel(g)?, channel(b)?))
}

/// Accepts either `r,g,b` or a hex color.
pub fn parse_color(input: &str) -> Result<Rgb255> {
    let input = input.trim();

    if input.contains(',') {
        parse_rgb(input)
    } else {
        Ok(Rgb255::from_srgb(color::parse_hex(input)?))
    }
}

/// Whether `input` looks like a color literal rather than a dye or custom color name.
pub fn is_color_literal(input: &str) -> bool {
    let input = input.trim();
    input.starts_with('#') || parse_rgb(input).is_ok()
}

/// Trims the name and checks it is between 1 and [`MAX_COLOR_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidCustomColor("Enter a name".to_owned()));
    }

    if trimmed.chars().count() > MAX_COLOR_NAME_LENGTH {
        return Err(Error::InvalidCustomColor(format!(
            "Names can be at most {} characters",
            MAX_COLOR_NAME_LENGTH
        )));
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_strings() {
        assert_eq!(parse_rgb("120,85,45").unwrap(), Rgb255::new(120, 85, 45));
        assert_eq!(parse_rgb(" 120, 85 , 45 ").unwrap(), Rgb255::new(120, 85, 45));
    }

    #[test]
    fn rejects_bad_rgb_strings() {
        for input in ["120,85", "1,2,3,4", "256,0,0", "-1,0,0", "a,b,c", "1.5,2,3", ""] {
            assert!(
                matches!(parse_rgb(input), Err(Error::InvalidCustomColor(_))),
                "{}",
                input
            );
        }
    }

    #[test]
    fn parses_hex_or_rgb() {
        assert_eq!(parse_color("#7F3300").unwrap(), Rgb255::new(127, 51, 0));
        assert_eq!(parse_color("#fff").unwrap(), Rgb255::new(255, 255, 255));
        assert_eq!(parse_color("1, 2, 3").unwrap(), Rgb255::new(1, 2, 3));
        assert!(matches!(parse_color("#12"), Err(Error::Harmony(_))));
    }

    #[test]
    fn tells_literals_from_names() {
        assert!(is_color_literal("#112233"));
        assert!(is_color_literal("1,2,3"));
        assert!(!is_color_literal("dye_001"));
        assert!(!is_color_literal("Snow White"));
    }

    #[test]
    fn validates_names() {
        assert_eq!(validate_name("  Mint  ").unwrap(), "Mint");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(50)).is_ok());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }
}
