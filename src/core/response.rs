use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One answer option of a choice-bearing question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub option: String,
    pub value: String,
    /// Pins the option in place under option rotation.
    #[serde(default)]
    pub anchor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKey {
    Option,
    Value,
}

impl Response {
    pub fn new(option: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            value: value.into(),
            anchor: false,
        }
    }

    /// Default entry appended by the "+ Add" control; `n` is one-based.
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("Option {n}"), format!("value_{n}"))
    }

    /// Seeded choice used when a radio question is created.
    pub fn choice(n: usize) -> Self {
        Self::new(format!("Choice {n}"), format!("choice_{n}"))
    }
}

/// Letter label shown before an option: A, B, ... Z, AA, AB, ...
pub fn letter_label(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Values appearing more than once, in first-seen order.
pub fn duplicate_values(responses: &[Response]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for response in responses {
        let value = response.value.as_str();
        if !seen.insert(value) && !dupes.contains(&value) {
            dupes.push(value);
        }
    }
    dupes
}

/// Returns a new list with `index` replaced; every other entry is carried over untouched.
pub fn edit(responses: &[Response], index: usize, key: ResponseKey, text: &str) -> Vec<Response> {
    responses
        .iter()
        .enumerate()
        .map(|(idx, response)| {
            if idx != index {
                return response.clone();
            }
            let mut next = response.clone();
            match key {
                ResponseKey::Option => next.option = text.to_string(),
                ResponseKey::Value => next.value = text.to_string(),
            }
            next
        })
        .collect()
}

pub fn toggle_anchor(responses: &[Response], index: usize) -> Vec<Response> {
    responses
        .iter()
        .enumerate()
        .map(|(idx, response)| {
            let mut next = response.clone();
            if idx == index {
                next.anchor = !next.anchor;
            }
            next
        })
        .collect()
}

pub fn append(responses: &[Response]) -> Vec<Response> {
    let mut next = responses.to_vec();
    next.push(Response::numbered(responses.len() + 1));
    next
}

pub fn remove(responses: &[Response], index: usize) -> Vec<Response> {
    responses
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != index)
        .map(|(_, response)| response.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Response> {
        (1..=3).map(Response::choice).collect()
    }

    #[test]
    fn letter_labels_roll_over() {
        assert_eq!(letter_label(0), "A");
        assert_eq!(letter_label(2), "C");
        assert_eq!(letter_label(25), "Z");
        assert_eq!(letter_label(26), "AA");
    }

    #[test]
    fn edit_changes_only_target_index() {
        let before = sample();
        let after = edit(&before, 1, ResponseKey::Value, "b");

        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].value, "b");
        assert_eq!(after[1].option, "Choice 2");
        assert_eq!(before[1].value, "choice_2");
    }

    #[test]
    fn edit_out_of_range_is_a_copy() {
        let before = sample();
        assert_eq!(edit(&before, 9, ResponseKey::Option, "x"), before);
    }

    #[test]
    fn append_numbers_by_length() {
        let next = append(&sample());
        assert_eq!(next.len(), 4);
        assert_eq!(next[3], Response::new("Option 4", "value_4"));
    }

    #[test]
    fn remove_reindexes() {
        let next = remove(&sample(), 0);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].option, "Choice 2");
        assert_eq!(letter_label(0), "A");
    }

    #[test]
    fn duplicates_reported_once() {
        let mut list = sample();
        list.push(Response::new("Again", "choice_1"));
        list.push(Response::new("Thrice", "choice_1"));
        assert_eq!(duplicate_values(&list), vec!["choice_1"]);
    }

    #[test]
    fn anchor_toggles_in_place() {
        let next = toggle_anchor(&sample(), 2);
        assert!(next[2].anchor);
        assert!(!next[0].anchor);
    }
}
