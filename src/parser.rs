//! Record Parser
//!
//! Turns one `;`-delimited line into a typed record or a [`RecordError`].
//! A rejection never escapes the line it was produced for: callers log it
//! and move on to the next line.

use std::io::{self, BufRead};

use crate::domain::{
    LineItem, MoneyError, Price, ProductRecord, RecordError, SalespersonKey, SalespersonRecord,
};

/// Field delimiter shared by every input format
pub const FIELD_DELIMITER: char = ';';

/// Lines of a record file, decoded one at a time.
///
/// The outer `Err` is an I/O failure. A line that is not UTF-8 comes back as
/// `Ok(Err(RecordError::InvalidEncoding))` so only that line is lost.
/// `\n` and `\r\n` endings are stripped.
pub struct RecordLines<R> {
    reader: R,
    buf: Vec<u8>,
}

pub fn record_lines<R: BufRead>(reader: R) -> RecordLines<R> {
    RecordLines {
        reader,
        buf: Vec::new(),
    }
}

impl<R: BufRead> Iterator for RecordLines<R> {
    type Item = io::Result<Result<String, RecordError>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                let line = String::from_utf8(self.buf.clone()).map_err(|_| RecordError::InvalidEncoding);
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Split `line` into fields, requiring at least `min_fields` of them.
///
/// Trailing empty fields are dropped before counting, so `"1;"` has one
/// field. Fields are not trimmed.
pub fn split_fields(line: &str, min_fields: usize) -> Result<Vec<&str>, RecordError> {
    let mut fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    if fields.len() < min_fields {
        return Err(RecordError::TooFewFields {
            expected: min_fields,
            found: fields.len(),
        });
    }

    Ok(fields)
}

/// A record that can be built from the fields of one line
pub trait FromRecord: Sized {
    /// Minimum number of fields a line must split into
    const MIN_FIELDS: usize;

    /// Build the record; `fields` holds at least `MIN_FIELDS` entries
    fn from_fields(fields: &[&str]) -> Result<Self, RecordError>;
}

/// Parse one line into `T`
pub fn parse_record<T: FromRecord>(line: &str) -> Result<T, RecordError> {
    let fields = split_fields(line, T::MIN_FIELDS)?;
    T::from_fields(&fields)
}

/// Sales file header: `docType;docNumber`
impl FromRecord for SalespersonKey {
    const MIN_FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Result<Self, RecordError> {
        SalespersonKey::from_fields(fields[0], fields[1])
    }
}

/// `docType;docNumber;firstName;lastName`
impl FromRecord for SalespersonRecord {
    const MIN_FIELDS: usize = 4;

    fn from_fields(fields: &[&str]) -> Result<Self, RecordError> {
        let key = SalespersonKey::from_fields(fields[0], fields[1])?;
        Ok(SalespersonRecord::new(key, fields[2], fields[3]))
    }
}

/// `id;name;price`
impl FromRecord for ProductRecord {
    const MIN_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Result<Self, RecordError> {
        let id = parse_product_id(fields[0])?;
        let price = fields[2].parse::<Price>().map_err(|e| match e {
            MoneyError::Negative(value) => RecordError::NegativePrice(value.to_string()),
            _ => RecordError::invalid_number("price", fields[2]),
        })?;
        Ok(ProductRecord::new(id, fields[1], price))
    }
}

/// `productId;quantity`
impl FromRecord for LineItem {
    const MIN_FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Result<Self, RecordError> {
        let product_id = parse_product_id(fields[0])?;
        let quantity = fields[1]
            .parse()
            .map_err(|_| RecordError::invalid_number("quantity", fields[1]))?;
        Ok(LineItem {
            product_id,
            quantity,
        })
    }
}

fn parse_product_id(raw: &str) -> Result<u32, RecordError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(RecordError::ZeroProductId),
        Ok(id) => Ok(id),
        Err(_) => Err(RecordError::invalid_number("product_id", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_split_fields_exact() {
        let fields = split_fields("1;Producto1;10.00", 3).unwrap();
        assert_eq!(fields, vec!["1", "Producto1", "10.00"]);
    }

    #[test]
    fn test_split_fields_extra_fields_kept() {
        let fields = split_fields("1;2;3;4", 2).unwrap();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_split_fields_too_few() {
        let result = split_fields("1", 2);
        assert_eq!(
            result,
            Err(RecordError::TooFewFields {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_split_fields_trailing_empty_dropped() {
        let result = split_fields("1;;", 2);
        assert!(matches!(result, Err(RecordError::TooFewFields { found: 1, .. })));
    }

    #[test]
    fn test_split_fields_blank_line() {
        let result = split_fields("", 2);
        assert!(matches!(result, Err(RecordError::TooFewFields { found: 0, .. })));
    }

    #[test]
    fn test_split_fields_interior_empty_kept() {
        let fields = split_fields("CC;1000;;Gomez", 4).unwrap();
        assert_eq!(fields[2], "");
    }

    #[test]
    fn test_parse_salesperson() {
        let record: SalespersonRecord = parse_record("CC;1000;Juan;Gomez").unwrap();
        assert_eq!(record.key, SalespersonKey::new(DocumentType::NationalId, 1000));
        assert_eq!(record.full_name(), "Juan Gomez");
    }

    #[test]
    fn test_parse_salesperson_unknown_document() {
        let result = parse_record::<SalespersonRecord>("XX;1000;Juan;Gomez");
        assert!(matches!(result, Err(RecordError::UnknownDocumentType(_))));
    }

    #[test]
    fn test_parse_product() {
        let record: ProductRecord = parse_record("7;Producto7;45.123456789").unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Producto7");
        assert_eq!(record.price.value(), Decimal::from_str("45.123456789").unwrap());
    }

    #[test]
    fn test_parse_product_negative_price() {
        let result = parse_record::<ProductRecord>("1;Producto1;-3.5");
        assert!(matches!(result, Err(RecordError::NegativePrice(_))));
    }

    #[test]
    fn test_parse_product_bad_price() {
        let result = parse_record::<ProductRecord>("1;Producto1;diez");
        assert!(matches!(result, Err(RecordError::InvalidNumber { field: "price", .. })));
    }

    #[test]
    fn test_parse_product_zero_id() {
        let result = parse_record::<ProductRecord>("0;Producto0;1.00");
        assert_eq!(result, Err(RecordError::ZeroProductId));
    }

    #[test]
    fn test_parse_line_item() {
        let item: LineItem = parse_record("3;10").unwrap();
        assert_eq!(
            item,
            LineItem {
                product_id: 3,
                quantity: 10
            }
        );
    }

    #[test]
    fn test_parse_line_item_embedded_space_rejected() {
        let result = parse_record::<LineItem>("3; 10");
        assert!(matches!(
            result,
            Err(RecordError::InvalidNumber { field: "quantity", .. })
        ));
    }

    #[test]
    fn test_parse_line_item_negative_quantity_rejected() {
        let result = parse_record::<LineItem>("3;-2");
        assert!(matches!(
            result,
            Err(RecordError::InvalidNumber { field: "quantity", .. })
        ));
    }

    #[test]
    fn test_parse_line_item_explicit_plus_accepted() {
        let item: LineItem = parse_record("3;+3").unwrap();
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_parse_product_underscore_price_rejected() {
        let result = parse_record::<ProductRecord>("1;P;1_0.5");
        assert!(matches!(result, Err(RecordError::InvalidNumber { field: "price", .. })));
    }

    #[test]
    fn test_record_lines_strip_endings() {
        let lines: Vec<_> = record_lines(&b"CC;1000\r\n1;2\n\n3;4"[..])
            .map(|line| line.unwrap().unwrap())
            .collect();
        assert_eq!(lines, vec!["CC;1000", "1;2", "", "3;4"]);
    }

    #[test]
    fn test_record_lines_bad_utf8_is_one_line() {
        let lines: Vec<_> = record_lines(&b"1;1\n\xff\xfe;1\r\n1;5\n"[..])
            .map(|line| line.unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                Ok("1;1".to_string()),
                Err(RecordError::InvalidEncoding),
                Ok("1;5".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_header() {
        let key: SalespersonKey = parse_record("TI;9999").unwrap();
        assert_eq!(key, SalespersonKey::new(DocumentType::MinorId, 9999));
    }
}
