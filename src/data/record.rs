use csv::StringRecord;
use genescan::{GenescanError, Peak};

pub const SAMPLE_COLUMN: &str = "Sample File Name";
pub const SIZE_COLUMN: &str = "Size";
pub const AREA_COLUMN: &str = "Area";
pub const PERCENTAGE_COLUMN: &str = "Percentage";

pub const REQUIRED_COLUMNS: [&str; 3] = [SAMPLE_COLUMN, SIZE_COLUMN, AREA_COLUMN];

/// Positions of the columns the pipeline reads within a GeneScan datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub sample: usize,
    pub size: usize,
    pub area: usize,
    pub percentage: Option<usize>,
}

impl ColumnLayout {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, GenescanError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        match (find(SAMPLE_COLUMN), find(SIZE_COLUMN), find(AREA_COLUMN)) {
            (Some(sample), Some(size), Some(area)) => Ok(Self {
                sample,
                size,
                area,
                percentage: find(PERCENTAGE_COLUMN),
            }),
            _ => Err(GenescanError::malformed_row(
                1,
                format!(
                    "Unexpected column header detected. Expected columns {:?}, found {:?}",
                    REQUIRED_COLUMNS,
                    headers.iter().collect::<Vec<&str>>()
                ),
            )),
        }
    }
}

/// Reads the sample, size and area fields of a datasheet row into a [`Peak`].
/// `row` is the index of the record among the data rows, `line` its line in
/// the file for error reporting.
pub fn parse_to_peak(
    record: &StringRecord,
    layout: &ColumnLayout,
    row: usize,
    line: usize,
) -> Result<Peak, GenescanError> {
    let sample_id = record
        .get(layout.sample)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            GenescanError::malformed_row(line, format!("Missing {}", SAMPLE_COLUMN))
        })?;

    let position = parse_number(record, layout.size, SIZE_COLUMN, line)?;
    let area = parse_number(record, layout.area, AREA_COLUMN, line)?;

    if area < 0.0 {
        return Err(GenescanError::malformed_row(
            line,
            format!("Negative {} '{}'", AREA_COLUMN, area),
        ));
    }

    Ok(Peak::new(sample_id, position, area, row))
}

fn parse_number(
    record: &StringRecord,
    index: usize,
    column: &str,
    line: usize,
) -> Result<f64, GenescanError> {
    let field = record
        .get(index)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| GenescanError::malformed_row(line, format!("Missing {}", column)))?;

    let value: f64 = field.parse().map_err(|_| {
        GenescanError::malformed_row(line, format!("Invalid {} '{}'", column, field))
    })?;

    if !value.is_finite() {
        return Err(GenescanError::malformed_row(
            line,
            format!("Invalid {} '{}'", column, field),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(vec![
            "Dye/Sample Peak",
            "Sample File Name",
            "Marker",
            "Size",
            "Height",
            "Area",
        ])
    }

    #[test]
    fn test_layout_from_headers() -> anyhow::Result<()> {
        let layout = ColumnLayout::from_headers(&headers())?;
        assert_eq!(
            layout,
            ColumnLayout {
                sample: 1,
                size: 3,
                area: 5,
                percentage: None
            }
        );
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let headers = StringRecord::from(vec!["Sample File Name", "Size", "Height"]);
        let result = ColumnLayout::from_headers(&headers);
        assert!(matches!(
            result,
            Err(GenescanError::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_peak_trims_sample_name() -> anyhow::Result<()> {
        let layout = ColumnLayout::from_headers(&headers())?;
        let record = StringRecord::from(vec!["B,1", "  S1 ", "", "100.5", "800", "1234.5"]);

        let peak = parse_to_peak(&record, &layout, 7, 9)?;
        assert_eq!(peak, Peak::new("S1", 100.5, 1234.5, 7));
        Ok(())
    }

    #[test]
    fn test_non_numeric_size() -> anyhow::Result<()> {
        let layout = ColumnLayout::from_headers(&headers())?;
        let record = StringRecord::from(vec!["B,1", "S1", "", "abc", "800", "12"]);

        let result = parse_to_peak(&record, &layout, 0, 2);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Malformed row at line 2: Invalid Size 'abc'"
        );
        Ok(())
    }

    #[test]
    fn test_missing_area() -> anyhow::Result<()> {
        let layout = ColumnLayout::from_headers(&headers())?;
        let record = StringRecord::from(vec!["B,1", "S1", "", "100", "800", ""]);

        let result = parse_to_peak(&record, &layout, 0, 4);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Malformed row at line 4: Missing Area"
        );
        Ok(())
    }

    #[test]
    fn test_negative_area() -> anyhow::Result<()> {
        let layout = ColumnLayout::from_headers(&headers())?;
        let record = StringRecord::from(vec!["B,1", "S1", "", "100", "800", "-3"]);
        assert!(parse_to_peak(&record, &layout, 0, 2).is_err());
        Ok(())
    }
}
