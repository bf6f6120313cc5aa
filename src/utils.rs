use csv_core::{ReadFieldResult, WriteResult};

/// Splits one CSV row into its fields.
///
/// Returns `None` when a field does not fit the field buffer.
pub(crate) fn parse_csv_row(row: &str) -> Option<Vec<String>> {
    let mut fields = vec![];
    let mut reader = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = reader.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::OutputFull => return None,
        };
        if result != ReadFieldResult::End {
            fields.push(String::from_utf8_lossy(&output[..nout]).into_owned());
        }
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Some(fields)
}

/// Appends `field` to `out`, quoting it when it contains separators or quotes.
pub(crate) fn push_csv_field(out: &mut String, field: &str) {
    let mut data = field.as_bytes();
    let mut buffer = Vec::with_capacity(data.len() + 2);
    let mut output = [0; 4096];
    let mut writer = csv_core::Writer::new();
    loop {
        let (result, nin, nout) = writer.field(data, &mut output);
        buffer.extend_from_slice(&output[..nout]);
        data = &data[nin..];
        if result == WriteResult::InputEmpty {
            break;
        }
    }
    let (_, nout) = writer.finish(&mut output);
    buffer.extend_from_slice(&output[..nout]);
    out.push_str(&String::from_utf8_lossy(&buffer));
}

/// Byte offset of every char boundary in `text`, including the end.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}
