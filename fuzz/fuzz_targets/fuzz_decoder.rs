#![no_main]
use jsonpull::{Decoder, Document, Error, ValueKind};
use libfuzzer_sys::fuzz_target;

fn read_value(doc: &mut Document) -> Result<(), Error> {
    match doc.peek() {
        Some(ValueKind::Null) => doc.read_null(),
        Some(ValueKind::Boolean) => doc.read_bool().map(|_| ()),
        Some(ValueKind::String) => doc.read_string().map(|_| ()),
        Some(ValueKind::Number) => doc.read_number().map(|_| ()),
        Some(ValueKind::Array) => {
            doc.enter_array()?;
            while doc.more() {
                read_value(doc)?;
            }
            doc.exit_array()
        }
        Some(ValueKind::Object) => {
            doc.enter_object()?;
            while doc.more() {
                doc.read_string()?;
                read_value(doc)?;
            }
            doc.exit_object()
        }
        None => Err(Error::InvalidJson),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(64);
    let mut doc = decoder.begin_read(data);
    let walked = read_value(&mut doc);
    let _ = walked.and(doc.end_read());

    // Exercise the reusable path with the reference parser's rendering of
    // the same input, which must always decode cleanly.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let text = serde_json::to_string(&value).unwrap();
        if text.len() < 1 << 16 {
            let mut doc = decoder.begin_read(text.as_bytes());
            let walked = read_value(&mut doc);
            if serde_depth(&value) <= 64 {
                walked.and(doc.end_read()).unwrap();
            }
        }
    }
});

fn serde_depth(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Array(items) => {
            1 + items.iter().map(serde_depth).max().unwrap_or(0)
        }
        serde_json::Value::Object(map) => {
            1 + map.values().map(serde_depth).max().unwrap_or(0)
        }
        _ => 0,
    }
}
