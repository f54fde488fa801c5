use crate::domain::model::response_name_for;
use std::collections::HashSet;

/// Track files whose response file is not among `responses`, in input order.
pub fn missing_responses(tracks: &[String], responses: &[String]) -> Vec<String> {
    let present: HashSet<&str> = responses.iter().map(String::as_str).collect();

    tracks
        .iter()
        .filter(|track| !present.contains(response_name_for(track).as_str()))
        .cloned()
        .collect()
}
