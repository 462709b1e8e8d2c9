//! Day 1: Trebuchet?!
//!
//! Each line hides a calibration value made out of its first and last digit.

use bstr::ByteSlice;
use lib::input::ErrorKind;
use lib::prelude::*;

/// Digits spelled out, where the position in the array plus one is the value.
const WORDS: [&[u8]; 9] = [
    b"one", b"two", b"three", b"four", b"five", b"six", b"seven", b"eight", b"nine",
];

/// Decode a literal ascii digit.
#[inline]
fn digit(b: u8) -> Option<u32> {
    b.is_ascii_digit().then(|| u32::from(b - b'0'))
}

/// Decode either a literal digit or a spelled out digit starting at the
/// beginning of `rest`.
#[inline]
fn token(rest: &[u8]) -> Option<u32> {
    let &first = rest.first()?;

    if let Some(d) = digit(first) {
        return Some(d);
    }

    let n = WORDS.iter().position(|word| rest.starts_with(word))?;
    Some(n as u32 + 1)
}

/// The first literal digit in the line.
pub fn first_digit(line: &[u8]) -> Option<u32> {
    line.iter().find_map(|&b| digit(b))
}

/// The last literal digit in the line.
pub fn last_digit(line: &[u8]) -> Option<u32> {
    line.iter().rev().find_map(|&b| digit(b))
}

/// The first digit or spelled out digit in the line.
pub fn first_token(line: &[u8]) -> Option<u32> {
    (0..line.len()).find_map(|n| token(&line[n..]))
}

/// The last digit or spelled out digit in the line.
///
/// Every starting position is tried from the back, so words overlapping an
/// earlier match like the `one` in `twone` are still found.
pub fn last_token(line: &[u8]) -> Option<u32> {
    (0..line.len()).rev().find_map(|n| token(&line[n..]))
}

/// Combine the first and last value found by `first` and `last` into a two
/// digit calibration value.
pub fn calibration(
    line: &[u8],
    first: fn(&[u8]) -> Option<u32>,
    last: fn(&[u8]) -> Option<u32>,
) -> Option<u32> {
    Some(first(line)? * 10 + last(line)?)
}

pub fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut o1 = 0;
    let mut o2 = 0;

    while let Some(istr) = input.try_line::<IStr>()? {
        let line = istr.as_data();

        if line.is_empty() {
            continue;
        }

        // Lines with only spelled out digits carry no literal ones.
        o1 += calibration(line, first_digit, last_digit).unwrap_or_default();

        let Some(value) = calibration(line, first_token, last_token) else {
            let error = format!("no digit in line `{}`", istr.as_bstr());
            return Err(istr.error(ErrorKind::Boxed(error.into())).into());
        };

        debug!("{}: {value}", line.as_bstr());
        o2 += value;
    }

    Ok((o1, o2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(data: &'static str) -> IStr {
        IStr::new(data.as_bytes(), Size::ZERO)
    }

    #[test]
    fn test_digits() {
        let tests: [(&str, u32, u32); 3] = [("abcd1234", 1, 4), ("0", 0, 0), ("abbddaa7", 7, 7)];

        for (line, first, last) in tests {
            assert_eq!(first_digit(line.as_bytes()), Some(first), "{line}");
            assert_eq!(last_digit(line.as_bytes()), Some(last), "{line}");
        }

        assert_eq!(first_digit(b"twone"), None);
    }

    #[test]
    fn test_all_digit_lines() {
        for line in ["5", "90210", "1234567890", "77"] {
            let bytes = line.as_bytes();
            let first = u32::from(bytes[0] - b'0');
            let last = u32::from(bytes[bytes.len() - 1] - b'0');

            assert_eq!(first_digit(bytes), Some(first));
            assert_eq!(last_digit(bytes), Some(last));
            assert_eq!(first_token(bytes), Some(first));
            assert_eq!(last_token(bytes), Some(last));
        }
    }

    #[test]
    fn test_tokens() {
        let tests: [(&str, u32, u32); 6] = [
            ("abcd1234", 1, 4),
            ("0", 0, 0),
            ("abbddaa7", 7, 7),
            ("ddddoneseven", 1, 7),
            // "zero" is not a spelled out digit.
            ("zero7five", 7, 5),
            ("twone", 2, 1),
        ];

        for (line, first, last) in tests {
            assert_eq!(first_token(line.as_bytes()), Some(first), "{line}");
            assert_eq!(last_token(line.as_bytes()), Some(last), "{line}");
        }
    }

    #[test]
    fn test_calibration() {
        let tests: [(&str, u32); 5] = [
            ("abcd1234", 14),
            ("abbddaa7", 77),
            ("zero7five", 75),
            ("twone", 21),
            ("ddddoneseven", 17),
        ];

        for (line, expected) in tests {
            assert_eq!(
                calibration(line.as_bytes(), first_token, last_token),
                Some(expected),
                "{line}"
            );
        }

        assert_eq!(calibration(b"nothing", first_token, last_token), None);
    }

    #[test]
    fn test_examples() {
        let part1 = input("1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n");
        assert_eq!(solve(part1).unwrap(), (142, 142));

        let part2 = input(concat!(
            "two1nine\n",
            "eightwothree\n",
            "abcone2threexyz\n",
            "xtwone3four\n",
            "4nineeightseven2\n",
            "zoneight234\n",
            "7pqrstsixteen\n",
        ));

        assert_eq!(solve(part2).unwrap(), (209, 281));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(solve(input("\n1abc2\n\n\nxtwone3\n")).unwrap(), (12 + 33, 12 + 23));
    }

    #[test]
    fn test_missing_digit() {
        let data = input("1abc2\nnothing here\n");
        let error = solve(data).unwrap_err();
        let error = lib::cli::error_context(std::path::Path::new("d01.txt"), data, error);
        assert_eq!(error.to_string(), "d01.txt:2:0");
    }
}
