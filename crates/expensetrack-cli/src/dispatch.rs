use expensetrack_client::commands;
use expensetrack_client::entry::today_display_date;
use expensetrack_client::{ClientResult, EntryDraft, EntryKind, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let home = cli.home.as_deref();
    match &cli.command {
        Commands::Add {
            title,
            amount,
            category,
            date,
            income,
            json: _,
        } => {
            let draft = EntryDraft {
                title: title.clone(),
                amount: amount.clone(),
                category: category.clone(),
                date: date.clone().unwrap_or_else(today_display_date),
                kind: if *income {
                    EntryKind::Income
                } else {
                    EntryKind::Expense
                },
            };
            commands::add::run(home, &draft).await
        }
        Commands::Delete { id, .. } => commands::delete::run(home, *id).await,
        Commands::List { .. } => commands::list::run(home),
        Commands::Summary { .. } => commands::summary::run(home),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::Value;
    use tempfile::tempdir;

    use crate::cli::parse_from;

    use super::dispatch;

    fn home_arg(path: &Path) -> String {
        path.display().to_string()
    }

    #[tokio::test]
    async fn dispatches_to_expected_command_names() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let home = home_arg(temp_dir.path());
            let cases: [(Vec<&str>, &str); 3] = [
                (
                    vec![
                        "expensetrack",
                        "--home",
                        home.as_str(),
                        "add",
                        "--title",
                        "Tea",
                        "--amount",
                        "2,50",
                        "--category",
                        "Food",
                    ],
                    "add",
                ),
                (vec!["expensetrack", "--home", home.as_str(), "list"], "list"),
                (vec!["expensetrack", "--home", home.as_str(), "summary"], "summary"),
            ];

            for (args, expected_command) in cases {
                let parsed = parse_from(args);
                assert!(parsed.is_ok());
                if let Ok(cli) = parsed {
                    let response = dispatch(&cli).await;
                    assert!(response.is_ok());
                    if let Ok(success) = response {
                        assert_eq!(success.command, expected_command);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn add_without_date_uses_today() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let home = home_arg(temp_dir.path());
            let parsed = parse_from([
                "expensetrack",
                "--home",
                home.as_str(),
                "add",
                "--title",
                "Bus",
                "--amount",
                "3",
                "--category",
                "Travel",
            ]);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli).await;
                assert!(response.is_ok());
                if let Ok(success) = response {
                    assert_eq!(
                        success.data["transaction"]["display_date"],
                        Value::String(expensetrack_client::entry::today_display_date())
                    );
                    assert_eq!(
                        success.data["transaction"]["kind"],
                        Value::String("expense".to_string())
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let home = home_arg(temp_dir.path());
            let parsed = parse_from(["expensetrack", "--home", home.as_str(), "delete", "42"]);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli).await;
                assert!(response.is_err());
                if let Err(error) = response {
                    assert_eq!(error.code, "transaction_not_found");
                }
            }
        }
    }
}
