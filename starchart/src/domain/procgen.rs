//! Procedurally generated system names.

use std::fmt;

/// Error returned when parsing an invalid procedural system name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a procedurally generated system name: {reason}")]
pub struct InvalidProcGenName {
    reason: &'static str,
}

/// A valid procedurally generated system name.
///
/// Systems outside the curated catalog carry names that encode an
/// approximate galactic position, of the form
/// `<sector> XY-Z m<n>` or `<sector> XY-Z m<n>-<n>`, for example
/// `Oevasy SG-Y D0` or `Dryau Aowsy AB-C D1-234`: a sector name, a
/// three-letter cube identifier, a mass code letter `a`-`h` and a running
/// number. This type guarantees the shape by construction; whether the
/// sector actually exists is only known to the procedural calculator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcGenName {
    sector: String,
    cube: [char; 3],
    mass_code: char,
    major: Option<u32>,
    minor: u32,
}

impl ProcGenName {
    /// Parse a procedural system name.
    ///
    /// Leading/trailing/repeated whitespace is tolerated; letter case is
    /// preserved but not significant for validity.
    pub fn parse(name: &str) -> Result<Self, InvalidProcGenName> {
        let tokens: Vec<&str> = name.split_whitespace().collect();

        // Sector (>= 1 token), cube identifier, mass code block.
        if tokens.len() < 3 {
            return Err(InvalidProcGenName {
                reason: "expected sector, cube identifier and mass code block",
            });
        }

        let (mass_code, major, minor) = parse_mass_block(tokens[tokens.len() - 1])?;
        let cube = parse_cube_id(tokens[tokens.len() - 2])?;
        let sector = tokens[..tokens.len() - 2].join(" ");

        Ok(Self {
            sector,
            cube,
            mass_code,
            major,
            minor,
        })
    }

    /// The sector name, e.g. `Oevasy`.
    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// The mass code letter, `a` through `h` (case preserved).
    pub fn mass_code(&self) -> char {
        self.mass_code
    }
}

/// Parse the `XY-Z` cube identifier.
fn parse_cube_id(token: &str) -> Result<[char; 3], InvalidProcGenName> {
    let chars: Vec<char> = token.chars().collect();

    if chars.len() != 4 || chars[2] != '-' {
        return Err(InvalidProcGenName {
            reason: "cube identifier must be two letters, a dash and a letter",
        });
    }

    for &c in [&chars[0], &chars[1], &chars[3]] {
        if !c.is_ascii_alphabetic() {
            return Err(InvalidProcGenName {
                reason: "cube identifier must be two letters, a dash and a letter",
            });
        }
    }

    Ok([chars[0], chars[1], chars[3]])
}

/// Parse the `m<n>` / `m<n>-<n>` mass code block.
fn parse_mass_block(token: &str) -> Result<(char, Option<u32>, u32), InvalidProcGenName> {
    let mut chars = token.chars();

    let mass_code = chars.next().ok_or(InvalidProcGenName {
        reason: "empty mass code block",
    })?;
    if !matches!(mass_code.to_ascii_lowercase(), 'a'..='h') {
        return Err(InvalidProcGenName {
            reason: "mass code must be a letter a-h",
        });
    }

    let numbers = chars.as_str();
    if numbers.is_empty() {
        return Err(InvalidProcGenName {
            reason: "mass code must be followed by a number",
        });
    }

    let parse_number = |s: &str| {
        s.parse::<u32>().map_err(|_| InvalidProcGenName {
            reason: "mass code numbers must be decimal digits",
        })
    };

    match numbers.split_once('-') {
        Some((major, minor)) => Ok((mass_code, Some(parse_number(major)?), parse_number(minor)?)),
        None => Ok((mass_code, None, parse_number(numbers)?)),
    }
}

impl fmt::Display for ProcGenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}-{} {}",
            self.sector, self.cube[0], self.cube[1], self.cube[2], self.mass_code
        )?;
        if let Some(major) = self.major {
            write!(f, "{}-", major)?;
        }
        write!(f, "{}", self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert!(ProcGenName::parse("Oevasy SG-Y D0").is_ok());
        assert!(ProcGenName::parse("Oevasy AB-C D0-1").is_ok());
        assert!(ProcGenName::parse("Lysoorb AA-A b0").is_ok());
        assert!(ProcGenName::parse("Dryau Aowsy AB-C D1-234").is_ok());
        assert!(ProcGenName::parse("Dryau Aowsy DC-B A4-321").is_ok());
    }

    #[test]
    fn reject_truncated_names() {
        // Missing mass code block entirely.
        assert!(ProcGenName::parse("Oevasy SG-Y").is_err());
        // Mass code letter without a number.
        assert!(ProcGenName::parse("Oevasy SG-Y D").is_err());
        // Number without a mass code letter.
        assert!(ProcGenName::parse("Oevasy SG-Y 0").is_err());
    }

    #[test]
    fn reject_catalog_style_names() {
        assert!(ProcGenName::parse("Sol").is_err());
        assert!(ProcGenName::parse("Beagle Point").is_err());
        assert!(ProcGenName::parse("Epsilon Indi").is_err());
    }

    #[test]
    fn reject_malformed_blocks() {
        // Cube identifier must be exactly XY-Z.
        assert!(ProcGenName::parse("Oevasy SGY D0").is_err());
        assert!(ProcGenName::parse("Oevasy S-GY D0").is_err());
        assert!(ProcGenName::parse("Oevasy 1G-Y D0").is_err());
        // Mass code outside a-h.
        assert!(ProcGenName::parse("Oevasy SG-Y Z0").is_err());
        // Garbage in the running number.
        assert!(ProcGenName::parse("Oevasy SG-Y D0-x").is_err());
    }

    #[test]
    fn multi_word_sectors() {
        let name = ProcGenName::parse("Dryau Aowsy AB-C D1-234").unwrap();
        assert_eq!(name.sector(), "Dryau Aowsy");
        assert_eq!(name.mass_code(), 'D');
    }

    #[test]
    fn display_roundtrip() {
        for s in ["Oevasy SG-Y D0", "Oevasy AB-C D0-1", "Dryau Aowsy DC-B A4-321"] {
            assert_eq!(ProcGenName::parse(s).unwrap().to_string(), s);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for syntactically valid procedural names.
    fn valid_name() -> impl Strategy<Value = String> {
        (
            "[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?",
            "[A-Z]{2}-[A-Z]",
            "[a-h]",
            proptest::option::of(0u32..10_000),
            0u32..10_000,
        )
            .prop_map(|(sector, cube, mass, major, minor)| match major {
                Some(major) => format!("{sector} {cube} {mass}{major}-{minor}"),
                None => format!("{sector} {cube} {mass}{minor}"),
            })
    }

    proptest! {
        /// Valid names always parse, and display reproduces them.
        #[test]
        fn valid_names_roundtrip(name in valid_name()) {
            let parsed = ProcGenName::parse(&name).unwrap();
            prop_assert_eq!(parsed.to_string(), name);
        }

        /// Dropping the mass code block always breaks a valid name.
        #[test]
        fn truncation_rejected(name in valid_name()) {
            let truncated = name.rsplit_once(' ').unwrap().0;
            prop_assert!(ProcGenName::parse(truncated).is_err());
        }
    }
}
