use std::io;

use serde_json::{Map, Value};

use super::format::{Align, Column, key_value_rows, render_table};

const HISTORY_COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "ID",
        align: Align::Right,
    },
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Title",
        align: Align::Left,
    },
    Column {
        name: "Category",
        align: Align::Left,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
];

pub fn render_summary(data: &Value) -> io::Result<String> {
    let summary = data
        .as_object()
        .ok_or_else(|| io::Error::other("summary output requires an object"))?;
    Ok(summary_card(summary).join("\n"))
}

pub fn render_list(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("list output requires summary"))?;
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("list output requires rows"))?;

    let mut lines = summary_card(summary);
    lines.push(String::new());

    if rows.is_empty() {
        lines.push("No transactions yet.".to_string());
        lines.push(String::new());
        lines.push("Record one first:".to_string());
        lines.push(
            "  expensetrack add --title Salary --amount 50000 --category Income --income"
                .to_string(),
        );
        return Ok(lines.join("\n"));
    }

    lines.push("Transactions:".to_string());
    let table_rows = rows.iter().map(history_row).collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&HISTORY_COLUMNS, &table_rows));
    Ok(lines.join("\n"))
}

/// Confirmation for `add` and `delete`, followed by the refreshed summary.
pub fn render_write(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("write output requires message"))?;
    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("write output requires summary"))?;

    let mut lines = vec![message.to_string()];
    if let Some(id) = data.get("id").and_then(Value::as_i64) {
        lines.push(format!("  Transaction id: {id}"));
    }
    lines.push(String::new());
    lines.extend(summary_card(summary));
    Ok(lines.join("\n"))
}

fn summary_card(summary: &Map<String, Value>) -> Vec<String> {
    let mut lines = vec!["Summary:".to_string()];
    lines.extend(key_value_rows(
        &[
            ("Current Balance:", text_field(summary, "balance")),
            ("Total Income:", text_field(summary, "total_income")),
            ("Total Spent:", text_field(summary, "total_expense")),
            ("Transactions:", text_field(summary, "transaction_count")),
        ],
        2,
    ));
    lines
}

fn history_row(row: &Value) -> Vec<String> {
    let amount = row.get("amount").and_then(Value::as_str).unwrap_or("0.00");
    let signed = if row.get("kind").and_then(Value::as_str) == Some("income") {
        format!("+{amount}")
    } else {
        format!("-{amount}")
    };

    vec![
        row.get("id")
            .and_then(Value::as_i64)
            .map(|id| id.to_string())
            .unwrap_or_default(),
        string_value(row, "display_date"),
        string_value(row, "title"),
        string_value(row, "category"),
        signed,
    ]
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => "-".to_string(),
    }
}

fn string_value(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_list, render_summary, render_write};

    fn summary() -> serde_json::Value {
        json!({
            "balance": "48500.00",
            "total_income": "50000.00",
            "total_expense": "1500.00",
            "transaction_count": 2
        })
    }

    #[test]
    fn summary_card_lists_every_figure() {
        let rendered = render_summary(&summary());
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Current Balance:  48500.00"));
            assert!(text.contains("Total Spent:      1500.00"));
            assert!(text.contains("Transactions:     2"));
        }
    }

    #[test]
    fn list_signs_amounts_by_kind() {
        let data = json!({
            "summary": summary(),
            "rows": [
                {"id": 2, "title": "Groceries", "kind": "expense", "amount": "1500.00",
                 "display_date": "03/06/2025", "category": "Food"},
                {"id": 1, "title": "Salary", "kind": "income", "amount": "50000.00",
                 "display_date": "01/06/2025", "category": "Income"}
            ]
        });

        let rendered = render_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Transactions:"));
            assert!(text.contains("-1500.00"));
            assert!(text.contains("+50000.00"));
            let groceries = text.find("Groceries");
            let salary = text.find("Salary");
            assert!(groceries < salary);
        }
    }

    #[test]
    fn empty_list_points_at_add() {
        let data = json!({"summary": summary(), "rows": []});
        let rendered = render_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No transactions yet."));
            assert!(text.contains("expensetrack add"));
        }
    }

    #[test]
    fn write_output_leads_with_message() {
        let data = json!({"id": 5, "message": "Expense added!", "summary": summary()});
        let rendered = render_write(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Expense added!"));
            assert!(text.contains("Transaction id: 5"));
        }
    }
}
