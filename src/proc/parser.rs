//! Generic parsing for `Key: value [unit]` style procfs files.
//!
//! Files such as `/proc/<pid>/status` and `/proc/meminfo` share one line
//! format: a field name, a colon, a numeric value and an optional unit
//! suffix (`kB`). Implementors declare the fields they care about through a
//! handler map; everything else in the file is ignored, and parsing stops
//! early once every known field has been seen.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// A trait for parsing colon-separated procfs key-value files into
/// structured types.
///
/// Implementors define a set of known keys and how to apply their values.
/// Unknown keys are skipped, as are known keys whose value field is not
/// numeric (procfs mixes numeric and textual fields in the same file).
/// Absent fields keep their `Default` value, which is how a kernel thread's
/// missing `VmRSS` naturally reads as zero.
pub trait KeyValueFile: Default
where
    Self: 'static,
{
    /// Returns a map of known field names and corresponding handler
    /// functions that apply parsed values to the struct's fields.
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)>;

    /// Parses a procfs key-value file from a buffered reader.
    ///
    /// The value is the first whitespace-separated token after the colon;
    /// a trailing unit suffix is ignored. Only the first occurrence of a
    /// key is applied.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading from `buf` fails; malformed lines
    /// are skipped.
    fn from_reader<R: BufRead>(buf: &mut R) -> std::io::Result<Self> {
        let mut parsed = Self::default();
        let handlers = Self::field_handlers();
        let mut seen = HashSet::with_capacity(handlers.len());

        let mut line = String::new();
        while buf.read_line(&mut line)? != 0 {
            if let Some((key, rest)) = line.split_once(':') {
                if let Some((key, handler)) = handlers.get_key_value(key.trim()) {
                    let value = rest
                        .split_whitespace()
                        .next()
                        .and_then(|v| v.parse::<u64>().ok());
                    if let Some(value) = value {
                        if seen.insert(*key) {
                            handler(&mut parsed, value);
                            if seen.len() == handlers.len() {
                                break;
                            }
                        }
                    }
                }
            }

            line.clear();
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    #[derive(Debug, Default, PartialEq, Eq)]
    struct TwoFields {
        foo: u64,
        bar: u64,
    }

    static HANDLERS: LazyLock<HashMap<&'static str, fn(&mut TwoFields, u64)>> =
        LazyLock::new(|| {
            let mut m: HashMap<&'static str, fn(&mut TwoFields, u64)> = HashMap::new();
            m.insert("Foo", |s, v| s.foo = v);
            m.insert("Bar", |s, v| s.bar = v);
            m
        });

    impl KeyValueFile for TwoFields {
        fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
            &HANDLERS
        }
    }

    #[test]
    fn test_parses_known_fields_with_unit() {
        let data = "Name:\tbash\nFoo:\t  1234 kB\nBar:\t8 kB\n";
        let parsed = TwoFields::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(parsed, TwoFields { foo: 1234, bar: 8 });
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let data = "Name:\tkthreadd\nState:\tS (sleeping)\n";
        let parsed = TwoFields::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(parsed, TwoFields::default());
    }

    #[test]
    fn test_non_numeric_value_is_skipped() {
        let data = "Foo:\tnot-a-number\nBar:\t5\n";
        let parsed = TwoFields::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(parsed, TwoFields { foo: 0, bar: 5 });
    }

    #[test]
    fn test_first_occurrence_wins() {
        let data = "Foo:\t1\nFoo:\t2\nBar:\t3\n";
        let parsed = TwoFields::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(parsed, TwoFields { foo: 1, bar: 3 });
    }

    #[test]
    fn test_empty_input() {
        let parsed = TwoFields::from_reader(&mut "".as_bytes()).unwrap();
        assert_eq!(parsed, TwoFields::default());
    }
}
