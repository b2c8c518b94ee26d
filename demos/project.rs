use nested_dict::{NestedMap, Scalar, TableOptions};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct Reading {
    site: String,
    sensor: String,
    hour: i64,
    value: f64,
}

const READINGS: &str = r#"[
    {"site": "north", "sensor": "temp", "hour": 0, "value": 11.5},
    {"site": "north", "sensor": "temp", "hour": 1, "value": 12.0},
    {"site": "north", "sensor": "wind", "hour": 0, "value": 3.2},
    {"site": "south", "sensor": "temp", "hour": 0, "value": 18.1},
    {"site": "south", "sensor": "temp", "hour": 1, "value": 19.4},
    {"site": "south", "sensor": "wind", "hour": 0, "value": 1.0},
    {"site": "south", "sensor": "wind", "hour": 1, "value": 1.5}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let readings: Vec<Reading> = serde_json::from_str(READINGS)?;

    let mut map = NestedMap::new();
    for reading in &readings {
        map.at(reading.site.as_str())
            .at(reading.sensor.as_str())
            .at(reading.hour)
            .set(reading.value);
    }

    println!("{}", map.structure(true));
    println!("json: {}", serde_json::to_string(&map)?);

    // north has no wind reading for hour 1
    match map.to_array(None) {
        Ok(array) => println!("dense: {array}"),
        Err(e) => println!("dense projection failed: {e}"),
    }

    let padded = map.to_f64_array(Some(f64::NAN))?;
    println!("padded shape {:?}:\n{padded}", padded.shape());

    let labeled = map.to_labeled_array(Some(Scalar::Null))?;
    for axis in 0..labeled.shape().len() {
        if let Some(labels) = labeled.labels(axis) {
            let labels = labels.map(ToString::to_string).collect::<Vec<_>>();
            println!("axis {axis}: {}", labels.join(", "));
        }
    }

    let options = TableOptions::default();
    let table = map.to_wide_table(&options);
    println!("{}", table.columns().collect::<Vec<_>>().join("\t"));
    for (row, cells) in table.rows() {
        let cells = cells
            .iter()
            .map(|cell| cell.as_ref().map_or_else(String::new, ToString::to_string))
            .collect::<Vec<_>>();
        println!("{}\t{}", row[0], cells.join("\t"));
    }

    Ok(())
}
