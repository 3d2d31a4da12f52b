/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Resolution of dotted paths in JSON documents.

use serde_json::Value;

/** Collect every value at the dotted `path`, the way search engines index it.

Arrays are flattened at each step and at the leaf, so `a.b` resolves both
`{"a": {"b": 1}}` and `{"a": [{"b": [1, 2]}]}`. Missing segments yield
nothing. Record accessors and search filter evaluation both resolve paths
here, so a record selected by a filter is one its accessors agree on.
*/
pub fn values_at<'a>(document: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![document];
    for segment in path.split('.') {
        current = current
            .into_iter()
            .flat_map(flatten)
            .filter_map(|value| value.get(segment))
            .collect();
    }
    current.into_iter().flat_map(flatten).collect()
}

fn flatten(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        value => vec![value],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_are_flattened_on_the_way() {
        let document = json!({
            "plain": {"flag": false},
            "wrapped": [{"flag": [false, true]}, {"flag": "x"}],
            "missing": {}
        });
        assert_eq!(values_at(&document, "plain.flag"), [&json!(false)]);
        assert_eq!(
            values_at(&document, "wrapped.flag"),
            [&json!(false), &json!(true), &json!("x")]
        );
        assert!(values_at(&document, "missing.flag").is_empty());
        assert!(values_at(&document, "plain.flag.deeper").is_empty());
    }
}
