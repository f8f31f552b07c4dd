//! Conversion between cell text and typed values
//!
//! Every supported value kind implements [`CellConvert`]. The trait's default
//! methods report [`CsvDocError::NoConverter`], so a custom type can opt in by
//! implementing only the direction it supports.

use crate::error::{CsvDocError, Result};
use crate::params::ConverterParams;

/// A value kind that can be read from and written to a cell
pub trait CellConvert: Sized {
    /// Name of the kind for error messages
    fn kind() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Parse a value from cell text
    ///
    /// # Arguments
    /// - `text` - The raw cell text
    /// - `params` - The invalid-value policy
    fn from_cell(text: &str, params: &ConverterParams) -> Result<Self> {
        let _ = (text, params);
        Err(CsvDocError::NoConverter(Self::kind()))
    }

    /// Format a value as cell text
    fn to_cell(&self) -> Result<String> {
        Err(CsvDocError::NoConverter(Self::kind()))
    }
}

fn conversion_error(text: &str, kind: &'static str) -> CsvDocError {
    CsvDocError::Conversion {
        text: text.to_string(),
        kind,
    }
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {$(
        impl CellConvert for $t {
            fn kind() -> &'static str {
                stringify!($t)
            }

            fn from_cell(text: &str, params: &ConverterParams) -> Result<Self> {
                match text.trim().parse::<$t>() {
                    Ok(value) => Ok(value),
                    Err(_) if params.has_default_converter => <$t>::try_from(params.default_integer)
                        .map_err(|_| conversion_error(text, Self::kind())),
                    Err(_) => Err(conversion_error(text, Self::kind())),
                }
            }

            fn to_cell(&self) -> Result<String> {
                Ok(self.to_string())
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {$(
        impl CellConvert for $t {
            fn kind() -> &'static str {
                stringify!($t)
            }

            fn from_cell(text: &str, params: &ConverterParams) -> Result<Self> {
                match text.trim().parse::<$t>() {
                    Ok(value) => Ok(value),
                    Err(_) if params.has_default_converter => Ok(params.default_float as $t),
                    Err(_) => Err(conversion_error(text, Self::kind())),
                }
            }

            fn to_cell(&self) -> Result<String> {
                Ok(self.to_string())
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

impl CellConvert for char {
    fn kind() -> &'static str {
        "char"
    }

    /// The first character of the cell. Empty cells are an error whatever the policy
    fn from_cell(text: &str, _params: &ConverterParams) -> Result<Self> {
        text.chars()
            .next()
            .ok_or_else(|| conversion_error(text, Self::kind()))
    }

    fn to_cell(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl CellConvert for String {
    fn kind() -> &'static str {
        "String"
    }

    fn from_cell(text: &str, _params: &ConverterParams) -> Result<Self> {
        Ok(text.to_string())
    }

    fn to_cell(&self) -> Result<String> {
        Ok(self.clone())
    }
}

/// Write-only: borrowed text cannot be produced from a cell
impl CellConvert for &str {
    fn kind() -> &'static str {
        "&str"
    }

    fn to_cell(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

/// Converter bound to a document's invalid-value policy
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    params: &'a ConverterParams,
}

impl<'a> Converter<'a> {
    pub fn new(params: &'a ConverterParams) -> Self {
        Self { params }
    }

    /// Convert cell text to a value
    pub fn to_val<T: CellConvert>(&self, text: &str) -> Result<T> {
        T::from_cell(text, self.params)
    }

    /// Convert a value to cell text
    pub fn to_str<T: CellConvert>(&self, value: &T) -> Result<String> {
        value.to_cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        let params = ConverterParams::default();
        let conv = Converter::new(&params);

        assert_eq!(conv.to_val::<i32>("42").unwrap(), 42);
        assert_eq!(conv.to_val::<i64>(" -7 ").unwrap(), -7);
        assert_eq!(conv.to_val::<u8>("255").unwrap(), 255);
        assert!(matches!(
            conv.to_val::<u8>("256"),
            Err(CsvDocError::Conversion { kind: "u8", .. })
        ));
        assert!(matches!(
            conv.to_val::<i32>(""),
            Err(CsvDocError::Conversion { .. })
        ));
        assert!(matches!(
            conv.to_val::<u32>("-1"),
            Err(CsvDocError::Conversion { .. })
        ));
    }

    #[test]
    fn test_floats() {
        let params = ConverterParams::default();
        let conv = Converter::new(&params);

        assert_eq!(conv.to_val::<f64>("1.5").unwrap(), 1.5);
        assert_eq!(conv.to_val::<f32>("-0.25").unwrap(), -0.25);
        assert!(conv.to_val::<f64>("abc").is_err());
        assert_eq!(conv.to_str(&0.1f64).unwrap(), "0.1");
        assert_eq!(conv.to_str(&2.0f32).unwrap(), "2");
    }

    #[test]
    fn test_default_converter() {
        let params = ConverterParams::with_defaults(-1.0, 7);
        let conv = Converter::new(&params);

        assert_eq!(conv.to_val::<i32>("").unwrap(), 7);
        assert_eq!(conv.to_val::<u64>("x").unwrap(), 7);
        assert_eq!(conv.to_val::<f32>("").unwrap(), -1.0);
        assert_eq!(conv.to_val::<i32>("3").unwrap(), 3);

        // The integer default does not fit an unsigned kind
        let params = ConverterParams::with_defaults(0.0, -1);
        let conv = Converter::new(&params);
        assert!(conv.to_val::<u16>("x").is_err());
        assert_eq!(conv.to_val::<i16>("x").unwrap(), -1);

        // NaN default
        let params = ConverterParams {
            has_default_converter: true,
            ..ConverterParams::default()
        };
        assert!(Converter::new(&params).to_val::<f64>("n/a").unwrap().is_nan());
    }

    #[test]
    fn test_char_and_string() {
        let params = ConverterParams::with_defaults(0.0, 0);
        let conv = Converter::new(&params);

        assert_eq!(conv.to_val::<char>("xyz").unwrap(), 'x');
        assert_eq!(conv.to_val::<char>("é").unwrap(), 'é');
        assert!(conv.to_val::<char>("").is_err());
        assert_eq!(conv.to_val::<String>("").unwrap(), "");
        assert_eq!(conv.to_val::<String>(" a b ").unwrap(), " a b ");
        assert_eq!(conv.to_str(&'q').unwrap(), "q");
        assert_eq!(conv.to_str(&-12i16).unwrap(), "-12");
    }

    #[derive(Debug, PartialEq)]
    struct Opaque;

    impl CellConvert for Opaque {}

    #[derive(Debug, PartialEq)]
    struct Flag(bool);

    impl CellConvert for Flag {
        fn kind() -> &'static str {
            "Flag"
        }

        fn from_cell(text: &str, _params: &ConverterParams) -> Result<Self> {
            Ok(Flag(text == "yes"))
        }
    }

    #[test]
    fn test_custom_kinds() {
        let params = ConverterParams::default();
        let conv = Converter::new(&params);

        assert!(matches!(
            conv.to_val::<Opaque>("x"),
            Err(CsvDocError::NoConverter(_))
        ));
        assert!(matches!(conv.to_str(&Opaque), Err(CsvDocError::NoConverter(_))));

        assert_eq!(conv.to_str(&"text").unwrap(), "text");
        assert!(matches!(
            conv.to_val::<&str>("text"),
            Err(CsvDocError::NoConverter("&str"))
        ));

        assert_eq!(conv.to_val::<Flag>("yes").unwrap(), Flag(true));
        assert!(matches!(
            conv.to_str(&Flag(true)),
            Err(CsvDocError::NoConverter("Flag"))
        ));
    }
}
