use std::cmp::Ordering;

use serde_json::Value;

use crate::domain::entities::column::Column;
use crate::domain::entities::row::{cell, cell_text, Row};
use crate::domain::entities::sort::{SortDirection, SortState};
use crate::domain::values::cell_number;

/// Single-field sort. Clicking cycles asc/desc; only `clear` unsorts.
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    state: SortState,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Returns false, leaving the state untouched, for unsortable columns.
    pub fn toggle(&mut self, column: &Column) -> bool {
        if !column.is_sortable() {
            return false;
        }
        if self.state.field.as_deref() == Some(column.id.as_str()) {
            self.state.direction = self.state.direction.flipped();
        } else {
            self.state.field = Some(column.id.clone());
            self.state.direction = SortDirection::Asc;
        }
        true
    }

    pub fn clear(&mut self) {
        self.state = SortState::default();
    }

    pub fn sort<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        self.sorted_indices(rows)
            .into_iter()
            .map(|idx| &rows[idx])
            .collect()
    }

    /// Positions into `rows` in display order. Stable.
    pub fn sorted_indices(&self, rows: &[Row]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        let Some(field) = self.state.field.as_deref() else {
            return indices;
        };
        let direction = self.state.direction;

        indices.sort_by(|&a, &b| {
            match (cell(&rows[a], field), cell(&rows[b], field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(left), Some(right)) => {
                    let ordering = compare_values(left, right);
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                }
            }
        });
        indices
    }
}

/// Numeric cells (JSON numbers or numeric strings) rank before text cells, so
/// a column mixing both still sorts under one total order.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (cell_number(left), cell_number(right)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => {
            let left = cell_text(left).unwrap_or_default();
            let right = cell_text(right).unwrap_or_default();
            natural_cmp(&left, &right)
        }
    }
}

/// Case-insensitive comparison where digit runs compare by numeric value, so
/// `job2` sorts before `job10`.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut a = left.chars().peekable();
    let mut b = right.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left_run = take_digits(&mut a);
                let right_run = take_digits(&mut b);
                let ordering = compare_digit_runs(&left_run, &right_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = x.to_lowercase().cmp(y.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: &[Value]) -> Vec<Row> {
        values
            .iter()
            .map(|value| {
                let mut row = Row::new();
                row.insert("v".to_string(), value.clone());
                row
            })
            .collect()
    }

    fn column() -> Column {
        Column::text("v", "Value")
    }

    fn sorted_values(engine: &SortEngine, rows: &[Row]) -> Vec<Value> {
        engine
            .sort(rows)
            .into_iter()
            .map(|row| row.get("v").cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn toggle_cycles_between_asc_and_desc() {
        let mut engine = SortEngine::new();
        let column = column();

        engine.toggle(&column);
        assert_eq!(engine.state().direction, SortDirection::Asc);
        engine.toggle(&column);
        assert_eq!(engine.state().direction, SortDirection::Desc);
        engine.toggle(&column);
        assert_eq!(engine.state().direction, SortDirection::Asc);
        assert_eq!(engine.state().field.as_deref(), Some("v"));
    }

    #[test]
    fn switching_field_resets_direction() {
        let mut engine = SortEngine::new();
        engine.toggle(&column());
        engine.toggle(&column());
        engine.toggle(&Column::number("n", "N"));
        assert_eq!(engine.state().field.as_deref(), Some("n"));
        assert_eq!(engine.state().direction, SortDirection::Asc);
    }

    #[test]
    fn action_and_unsortable_columns_are_ignored() {
        let mut engine = SortEngine::new();
        assert!(!engine.toggle(&Column::action("run", "Run")));
        assert!(!engine.toggle(&Column::text("t", "T").unsortable()));
        assert_eq!(engine.state(), &SortState::default());
    }

    #[test]
    fn unsorted_keeps_original_order() {
        let engine = SortEngine::new();
        let data = rows(&[json!("b"), json!("a"), json!("c")]);
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!("b"), json!("a"), json!("c")]
        );
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        let mut engine = SortEngine::new();
        let data = rows(&[json!(3), Value::Null, json!(1), json!(2)]);

        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!(1), json!(2), json!(3), Value::Null]
        );

        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!(3), json!(2), json!(1), Value::Null]
        );
    }

    #[test]
    fn strings_sort_naturally_and_case_insensitively() {
        let mut engine = SortEngine::new();
        let data = rows(&[json!("job10"), json!("Job2"), json!("job1"), json!("alpha")]);
        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!("alpha"), json!("job1"), json!("Job2"), json!("job10")]
        );
    }

    #[test]
    fn numeric_strings_sort_by_value() {
        let mut engine = SortEngine::new();
        let data = rows(&[json!("-10"), json!("-5"), json!("1.5"), json!("1.25")]);
        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!("-10"), json!("-5"), json!("1.25"), json!("1.5")]
        );
    }

    #[test]
    fn mixed_numbers_and_strings_share_one_order() {
        let mut engine = SortEngine::new();
        let data = rows(&[json!(1.25), json!("1.7"), json!("n/a"), json!(1.5), json!("0.5")]);

        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!("0.5"), json!(1.25), json!(1.5), json!("1.7"), json!("n/a")]
        );

        engine.toggle(&column());
        assert_eq!(
            sorted_values(&engine, &data),
            vec![json!("n/a"), json!("1.7"), json!(1.5), json!(1.25), json!("0.5")]
        );
    }

    #[test]
    fn compare_values_is_transitive_across_cell_types() {
        let low = json!(1.25);
        let mid = json!(1.5);
        let high = json!("1.7");
        assert_eq!(compare_values(&low, &mid), Ordering::Less);
        assert_eq!(compare_values(&mid, &high), Ordering::Less);
        assert_eq!(compare_values(&low, &high), Ordering::Less);
        assert_eq!(compare_values(&high, &low), Ordering::Greater);
    }

    #[test]
    fn equal_keys_keep_arrival_order() {
        let mut engine = SortEngine::new();
        let data: Vec<Row> = ["x", "y", "z"]
            .iter()
            .map(|tag| {
                let mut row = Row::new();
                row.insert("v".into(), json!("same"));
                row.insert("tag".into(), json!(tag));
                row
            })
            .collect();
        engine.toggle(&column());
        engine.toggle(&column());
        let tags: Vec<_> = engine.sort(&data).iter().map(|r| r["tag"].clone()).collect();
        assert_eq!(tags, vec![json!("x"), json!("y"), json!("z")]);
    }
}
