use crate::domain::model::{ResponseDocument, TollRow};
use crate::domain::services::field_lookup::lookup_str;
use serde_json::Value;

/// Flattens every crossing in `doc.tolls`. Absent, `null`, empty or non-array `tolls` yields no rows.
pub fn rows_for_document(doc: &ResponseDocument) -> Vec<TollRow> {
    let tolls = match doc.body.get("tolls").and_then(Value::as_array) {
        Some(tolls) if !tolls.is_empty() => tolls,
        _ => return Vec::new(),
    };

    let unit = lookup_str(&doc.body, &["unit"]);

    tolls
        .iter()
        .map(|toll| TollRow {
            unit: unit.clone(),
            trip_id: doc.file_name.clone(),
            toll_loc_id_start: lookup_str(toll, &["start", "id"]),
            toll_loc_id_end: lookup_str(toll, &["end", "id"]),
            toll_loc_name_start: lookup_str(toll, &["start", "name"]),
            toll_loc_name_end: lookup_str(toll, &["end", "name"]),
            toll_system_type: lookup_str(toll, &["systemType"]),
            entry_time: lookup_str(toll, &["entryTime"]),
            exit_time: lookup_str(toll, &["exitTime"]),
            tag_cost: lookup_str(toll, &["cost", "tag"]),
            cash_cost: lookup_str(toll, &["cost", "cash"]),
            license_plate_cost: lookup_str(toll, &["cost", "licensePlate"]),
        })
        .collect()
}
