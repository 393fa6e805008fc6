//! Range text parsing (`A1:B10`).

use super::cell_ref::CellRef;

/// Parse `START:END` into its endpoint references. The first two
/// `:`-separated parts are used; extra parts are ignored. Either endpoint
/// failing to parse yields `None`, which aggregate evaluation treats as an
/// empty range.
pub fn parse_range(range: &str) -> Option<(CellRef, CellRef)> {
    let mut parts = range.splitn(3, ':');
    let start = CellRef::parse(parts.next()?.trim())?;
    let end = CellRef::parse(parts.next()?.trim())?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::parse_range;
    use crate::engine::CellRef;

    #[test]
    fn test_parse_range_basic() {
        assert_eq!(
            parse_range("A1:B10"),
            Some((CellRef::new(0, 0), CellRef::new(9, 1)))
        );
    }

    #[test]
    fn test_parse_range_trims_endpoints() {
        assert_eq!(
            parse_range(" A1 : B2 "),
            Some((CellRef::new(0, 0), CellRef::new(1, 1)))
        );
    }

    #[test]
    fn test_parse_range_reversed_endpoints_are_preserved() {
        // Normalization to min/max corners happens at evaluation time.
        assert_eq!(
            parse_range("B2:A1"),
            Some((CellRef::new(1, 1), CellRef::new(0, 0)))
        );
    }

    #[test]
    fn test_parse_range_extra_parts_ignored() {
        assert_eq!(
            parse_range("A1:B2:C3"),
            Some((CellRef::new(0, 0), CellRef::new(1, 1)))
        );
    }

    #[test]
    fn test_parse_range_malformed() {
        assert_eq!(parse_range("A1"), None);
        assert_eq!(parse_range("A1:"), None);
        assert_eq!(parse_range(":B2"), None);
        assert_eq!(parse_range("A1:XYZ"), None);
        assert_eq!(parse_range(""), None);
    }
}
