use anyhow::{Context, Result};
use bytesize::ByteSize;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::data::{
    record::{parse_to_peak, ColumnLayout},
    GeneScanTable, GeneScanTableBuilder,
};

pub fn load_genescan<P: AsRef<Path>>(path: P) -> Result<GeneScanTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open GeneScan datasheet at: {:?}", path))?;

    if let Ok(metadata) = file.metadata() {
        info!(
            "Reading GeneScan datasheet {:?} ({})",
            path,
            ByteSize::b(metadata.len())
        );
    }

    load_genescan_from_reader(BufReader::new(file))
        .with_context(|| format!("Error loading GeneScan datasheet from: {:?}", path))
}

pub fn load_genescan_from_reader<R: Read>(reader: R) -> Result<GeneScanTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| "Failed to read header line")?
        .clone();
    let layout = ColumnLayout::from_headers(&headers)?;
    debug!("Column layout: {:?}", layout);

    let mut builder = GeneScanTableBuilder::new(headers);
    let mut record = StringRecord::new();
    let mut row = 0;

    while rdr
        .read_record(&mut record)
        .with_context(|| format!("Failed to read record after data row {}", row))?
    {
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row + 2);

        let peak = parse_to_peak(&record, &layout, row, line)?;
        builder.add_row(record.clone(), peak)?;
        row += 1;
    }

    let table = builder.build();
    info!(
        "Loaded {} peaks from {} samples",
        table.len(),
        table.n_samples()
    );
    Ok(table)
}
