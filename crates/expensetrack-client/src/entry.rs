use chrono::{Local, NaiveDate};

use crate::model::NewTransaction;
use crate::{ClientError, ClientResult};

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill all fields";
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount";
pub const INVALID_DATE_MESSAGE: &str = "Please pick a valid date (dd/MM/yyyy)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn parse(value: &str) -> ClientResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ClientError::validation_failed(
                "kind",
                "Entry type must be `income` or `expense`.",
            )),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// Raw values as typed into the add-transaction form.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub kind: EntryKind,
}

pub fn validate_entry(draft: &EntryDraft) -> ClientResult<NewTransaction> {
    let title = required(&draft.title, "title")?;
    let amount_text = required(&draft.amount, "amount")?;
    let category = required(&draft.category, "category")?;
    let date_text = required(&draft.date, "date")?;

    let amount = parse_amount(amount_text)?;
    let date = parse_entry_date(date_text)?;

    Ok(match draft.kind {
        EntryKind::Income => NewTransaction::income(title, amount, date, category),
        EntryKind::Expense => NewTransaction::expense(title, amount, date, category),
    })
}

fn required<'a>(value: &'a str, field: &str) -> ClientResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation_failed(field, FILL_ALL_FIELDS_MESSAGE));
    }
    Ok(trimmed)
}

/// Accepts any finite number greater than zero; `,` is read as the decimal
/// separator.
pub fn parse_amount(value: &str) -> ClientResult<f64> {
    let normalized = value.trim().replace(',', ".");
    let invalid = || ClientError::validation_failed("amount", INVALID_AMOUNT_MESSAGE);

    let amount = normalized.parse::<f64>().map_err(|_| invalid())?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid());
    }
    Ok(amount)
}

/// Parses a picker date (`dd/MM/yyyy`); ISO `YYYY-MM-DD` is accepted too.
pub fn parse_entry_date(value: &str) -> ClientResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT))
        .map_err(|_| ClientError::validation_failed("date", INVALID_DATE_MESSAGE))
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn today_display_date() -> String {
    format_display_date(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        EntryDraft, EntryKind, FILL_ALL_FIELDS_MESSAGE, INVALID_AMOUNT_MESSAGE,
        format_display_date, parse_amount, parse_entry_date, today_display_date, validate_entry,
    };

    fn draft(title: &str, amount: &str, category: &str, kind: EntryKind) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            date: "03/06/2025".to_string(),
            kind,
        }
    }

    #[test]
    fn expense_draft_becomes_expense_row() {
        let validated = validate_entry(&draft(" Groceries ", "1500", "Food", EntryKind::Expense));
        assert!(validated.is_ok());
        if let Ok(new) = validated {
            assert_eq!(new.title, "Groceries");
            assert_eq!(new.income, 0.0);
            assert_eq!(new.expense, 1500.0);
            assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap_or(NaiveDate::MIN));
            assert_eq!(new.category, "Food");
        }
    }

    #[test]
    fn income_draft_becomes_income_row() {
        let validated = validate_entry(&draft("Salary", "50000", "Income", EntryKind::Income));
        assert!(validated.is_ok());
        if let Ok(new) = validated {
            assert_eq!((new.income, new.expense), (50000.0, 0.0));
        }
    }

    #[test]
    fn blank_fields_are_rejected() {
        for (title, amount, category, field) in [
            ("  ", "10", "Food", "title"),
            ("Lunch", "", "Food", "amount"),
            ("Lunch", "10", "\t", "category"),
        ] {
            let result = validate_entry(&draft(title, amount, category, EntryKind::Expense));
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "validation_failed");
                assert_eq!(error.message, FILL_ALL_FIELDS_MESSAGE);
                assert_eq!(
                    error.data.as_ref().and_then(|data| data.get("field")).cloned(),
                    Some(serde_json::Value::String(field.to_string()))
                );
            }
        }
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in ["0", "0.00", "-5", "-0.01"] {
            let result = validate_entry(&draft("Lunch", amount, "Food", EntryKind::Expense));
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.message, INVALID_AMOUNT_MESSAGE);
            }
        }
    }

    #[test]
    fn amount_accepts_any_positive_finite_number() {
        assert_eq!(parse_amount("12,50").ok(), Some(12.5));
        assert_eq!(parse_amount(".5").ok(), Some(0.5));
        assert_eq!(parse_amount("7.").ok(), Some(7.0));
        assert_eq!(parse_amount("10.999").ok(), Some(10.999));
        assert_eq!(parse_amount("1e3").ok(), Some(1000.0));
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount(".").is_err());
        assert!(parse_amount("12 apples").is_err());
    }

    #[test]
    fn three_decimal_draft_is_stored_as_typed() {
        let validated = validate_entry(&draft("Fuel", "10.999", "Travel", EntryKind::Expense));
        assert!(validated.is_ok());
        if let Ok(new) = validated {
            assert_eq!(new.expense, 10.999);
        }
    }

    #[test]
    fn dates_parse_from_picker_and_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert_eq!(parse_entry_date("01/06/2025").ok(), expected);
        assert_eq!(parse_entry_date("2025-06-01").ok(), expected);
        assert!(parse_entry_date("31/02/2025").is_err());
        assert!(parse_entry_date("June 1").is_err());
    }

    #[test]
    fn display_date_round_trips() {
        let today = today_display_date();
        let parsed = parse_entry_date(&today);
        assert!(parsed.is_ok());
        if let Ok(date) = parsed {
            assert_eq!(format_display_date(date), today);
        }
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(EntryKind::parse("Income").ok(), Some(EntryKind::Income));
        assert_eq!(EntryKind::parse(" EXPENSE ").ok(), Some(EntryKind::Expense));
        assert!(EntryKind::parse("transfer").is_err());
    }
}
