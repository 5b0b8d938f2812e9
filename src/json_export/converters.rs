use serde_json::{Value, json};

// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// Convert a cell to a JSON number when it reads as one
pub fn process_cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }

    if let Ok(int) = cell.parse::<i64>() {
        return json!(int);
    }

    match cell.parse::<f64>() {
        Ok(num) if num.is_finite() => {
            if num.fract() == 0.0 && num.abs() <= MAX_SAFE_INTEGER {
                json!(num.trunc() as i64)
            } else {
                json!(num)
            }
        }
        _ => json!(cell),
    }
}
