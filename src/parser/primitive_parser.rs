use encoding_rs::{Encoding, WINDOWS_1252};
use nom::bytes::complete::{take_till1, take_while1};
use nom::character::complete::{char, space0, space1, u32 as parse_u32};
use nom::combinator::{opt, rest};
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use nom::{IResult, Parser};

/// Materialize properly encoded chart text.
///
/// A BOM decides the encoding when present, otherwise UTF-8 is tried first
/// and Windows-1252 is the fallback.
pub fn decode_chart_bytes(i: &[u8]) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(i) {
        log::debug!("Decoding chart with {} BOM", encoding.name());
        let (cow, had_errors) = encoding.decode_without_bom_handling(&i[bom_length..]);
        if had_errors {
            log::debug!("Malformed {} sequences replaced", encoding.name());
        }
        return cow.into_owned();
    }
    match std::str::from_utf8(i) {
        Ok(s) => s.to_string(),
        Err(e) => {
            log::debug!("Chart is not valid UTF-8 ({e}), falling back to Windows-1252");
            let (cow, _had_errors) = WINDOWS_1252.decode_without_bom_handling(i);
            cow.into_owned()
        }
    }
}

/// Parse `[SectionName]`
pub fn parse_section_header(i: &str) -> IResult<&str, &str> {
    delimited(char('['), take_till1(|c: char| c == ']'), char(']')).parse(i)
}

/// Parse the ` = ` separator of a chart line
fn parse_equals(i: &str) -> IResult<&str, char> {
    delimited(space0, char('='), space0).parse(i)
}

/// Parse `<tick> = `, the prefix of every timed line
pub fn parse_tick_prefix(i: &str) -> IResult<&str, u32> {
    terminated(parse_u32, parse_equals).parse(i)
}

/// Parse the upper case tag of a timed line (`N`, `S`, `E`, `B`, `TS`, ...)
pub fn parse_event_tag(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic()).parse(i)
}

/// Parse a space separated unsigned integer argument
pub fn parse_uint_arg(i: &str) -> IResult<&str, u32> {
    preceded(space1, parse_u32).parse(i)
}

/// Parse an optional space separated unsigned integer argument
pub fn parse_opt_uint_arg(i: &str) -> IResult<&str, Option<u32>> {
    opt(parse_uint_arg).parse(i)
}

/// Parse `Key = Value` with the raw value kept untouched
pub fn parse_key_value(i: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c: char| c.is_whitespace() || c == '='),
        parse_equals,
        rest,
    )
    .parse(i)
}

/// Parse a whole value as an unsigned integer, anything left over is an error
pub fn parse_whole_uint(i: &str) -> Option<u32> {
    match parse_u32::<_, nom::error::Error<&str>>(i.trim()) {
        Ok(("", value)) => Some(value),
        _ => None,
    }
}

/// Remove one pair of surrounding double quotes
pub fn unquote(i: &str) -> &str {
    i.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_header() {
        assert_eq!(parse_section_header("[ExpertSingle]"), Ok(("", "ExpertSingle")));
        assert!(parse_section_header("ExpertSingle").is_err());
        assert!(parse_section_header("[]").is_err());
    }

    #[test]
    fn test_tick_prefix_and_args() {
        let (i, tick) = parse_tick_prefix("768 = N 0 96").unwrap();
        assert_eq!(tick, 768);
        let (i, tag) = parse_event_tag(i).unwrap();
        assert_eq!(tag, "N");
        let (i, fret) = parse_uint_arg(i).unwrap();
        let (i, length) = parse_uint_arg(i).unwrap();
        assert_eq!((fret, length), (0, 96));
        assert_eq!(parse_opt_uint_arg(i), Ok(("", None)));
    }

    #[test]
    fn test_key_value() {
        assert_eq!(
            parse_key_value("Name = \"Some Song\""),
            Ok(("", ("Name", "\"Some Song\"")))
        );
        assert_eq!(parse_key_value("Resolution=480"), Ok(("", ("Resolution", "480"))));
    }

    #[test]
    fn test_whole_uint() {
        assert_eq!(parse_whole_uint("480"), Some(480));
        assert_eq!(parse_whole_uint(" 200 "), Some(200));
        assert_eq!(parse_whole_uint("\"480\""), None);
        assert_eq!(parse_whole_uint("480abc"), None);
        assert_eq!(parse_whole_uint("-1"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"section Intro\""), "section Intro");
        assert_eq!(unquote("solo"), "solo");
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let data = b"\xEF\xBB\xBF[Song]";
        assert_eq!(decode_chart_bytes(data), "[Song]");
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let data: Vec<u8> = vec![0xFF, 0xFE, b'[', 0x00, b'S', 0x00, b']', 0x00];
        assert_eq!(decode_chart_bytes(&data), "[S]");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte
        let data: Vec<u8> = vec![b'C', b'a', b'f', 0xE9];
        assert_eq!(decode_chart_bytes(&data), "Café");
    }
}
