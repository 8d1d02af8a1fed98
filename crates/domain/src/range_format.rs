use crate::config::ConfigError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Decimal,
    LowerHex,
    UpperHex,
    Octal,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conversion {
    zero_pad: bool,
    width: usize,
    radix: Radix,
}

/// printf-style format for range values.
///
/// Accepts literal text, `%%`, and exactly one `%[0][width](d|x|X|o|b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFormat {
    pattern: String,
    prefix: String,
    suffix: String,
    conversion: Conversion,
}

impl RangeFormat {
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRangeFormat {
            format: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conversion: Option<Conversion> = None;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                if conversion.is_some() {
                    suffix.push(c);
                } else {
                    prefix.push(c);
                }
                continue;
            }

            if chars.peek() == Some(&'%') {
                chars.next();
                if conversion.is_some() {
                    suffix.push('%');
                } else {
                    prefix.push('%');
                }
                continue;
            }

            if conversion.is_some() {
                return Err(invalid("more than one conversion"));
            }

            let zero_pad = chars.peek() == Some(&'0');
            if zero_pad {
                chars.next();
            }

            let mut width = 0usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                width = width
                    .checked_mul(10)
                    .and_then(|w| w.checked_add(d as usize))
                    .ok_or_else(|| invalid("width too large"))?;
                chars.next();
            }

            let radix = match chars.next() {
                Some('d') => Radix::Decimal,
                Some('x') => Radix::LowerHex,
                Some('X') => Radix::UpperHex,
                Some('o') => Radix::Octal,
                Some('b') => Radix::Binary,
                Some(other) => return Err(invalid(&format!("unsupported verb %{}", other))),
                None => return Err(invalid("dangling %")),
            };

            conversion = Some(Conversion {
                zero_pad,
                width,
                radix,
            });
        }

        let conversion = conversion.ok_or_else(|| invalid("no conversion"))?;

        Ok(Self {
            pattern: pattern.to_string(),
            prefix,
            suffix,
            conversion,
        })
    }

    pub fn format(&self, value: u64) -> String {
        let Conversion {
            zero_pad,
            width,
            radix,
        } = self.conversion;

        let digits = match radix {
            Radix::Decimal => value.to_string(),
            Radix::LowerHex => format!("{:x}", value),
            Radix::UpperHex => format!("{:X}", value),
            Radix::Octal => format!("{:o}", value),
            Radix::Binary => format!("{:b}", value),
        };

        let body = if zero_pad {
            format!("{:0>width$}", digits, width = width)
        } else {
            format!("{:>width$}", digits, width = width)
        };

        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Default for RangeFormat {
    fn default() -> Self {
        Self {
            pattern: "%d".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            conversion: Conversion {
                zero_pad: false,
                width: 0,
                radix: Radix::Decimal,
            },
        }
    }
}

impl fmt::Display for RangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Parses `first-last` into an inclusive range of unsigned integers.
pub fn parse_range(range: &str) -> Result<(u64, u64), ConfigError> {
    let invalid = || ConfigError::InvalidRange(range.to_string());

    let (first, last) = range.trim().split_once('-').ok_or_else(invalid)?;
    let first: u64 = first.trim().parse().map_err(|_| invalid())?;
    let last: u64 = last.trim().parse().map_err(|_| invalid())?;

    if first > last {
        return Err(invalid());
    }

    Ok((first, last))
}
