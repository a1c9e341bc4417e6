use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{value_parser, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use expense_ledger::engine::{CategoryFilter, FilterSpec, SortOrder};
use expense_ledger::models::{NewTransaction, Transaction, TransactionChanges};
use expense_ledger::stats::{
    category_breakdown, compute_stats_with_scope, monthly_trend, TotalsScope, DEFAULT_TREND_MONTHS,
    MAX_TREND_MONTHS
};
use expense_ledger::storage::{FileStorage, StorageKeys};
use expense_ledger::store::{Command, CommandOutcome, Theme, TransactionStore};
use expense_ledger::transfer::{export_file, import_file};
use expense_ledger::types::{parse_amount, parse_iso_date, today, Currency, TransactionId};

#[derive(Parser)]
#[command(name = "expense-ledger", version, about = "Record and review personal expenses")]
struct Cli {
    /// Directory holding the ledger and preferences.
    #[arg(long, global = true, default_value = ".expense-ledger")]
    data_dir: PathBuf,

    /// Keep a separate ledger per user id.
    #[arg(long, global = true)]
    user: Option<String>,

    /// One of: error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "error")]
    log_level: String,

    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense.
    Add {
        #[arg(value_parser = parse_amount)]
        amount: Decimal,
        category: String,
        /// Defaults to today.
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<Date>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long, default_value = "")]
        note: String,
        /// Defaults to the selected currency.
        #[arg(long)]
        currency: Option<String>
    },
    /// Change an existing expense. Omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long, value_parser = parse_amount)]
        amount: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<Date>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        currency: Option<String>
    },
    /// Delete an expense. Unknown ids are ignored.
    Remove {
        id: String
    },
    /// Delete every expense.
    Clear,
    /// Show expenses matching the given filters.
    List(ListArgs),
    /// Show month totals, averages and maxima.
    Stats {
        /// Sum month totals over every currency instead of the selected one.
        #[arg(long)]
        all_currencies: bool
    },
    /// Show totals per category.
    Categories,
    /// Show totals for recent months.
    Trend {
        /// Between 1 and 120.
        #[arg(long, default_value_t = DEFAULT_TREND_MONTHS as u16, value_parser = value_parser!(u16).range(1..=MAX_TREND_MONTHS as i64))]
        months: u16
    },
    /// Append expenses from a .json or .csv file.
    Import {
        file: PathBuf
    },
    /// Write all expenses to a .json or .csv file.
    Export {
        file: PathBuf
    },
    /// Show or change the selected currency.
    Currency {
        symbol: Option<String>
    },
    /// Show or change the theme preference.
    Theme {
        theme: Option<String>
    }
}

#[derive(Args)]
struct ListArgs {
    /// Exact category, or "All".
    #[arg(long, default_value = "All")]
    category: String,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, value_parser = parse_amount)]
    min_amount: Option<Decimal>,
    #[arg(long, value_parser = parse_amount)]
    max_amount: Option<Decimal>,
    #[arg(long, value_parser = parse_iso_date)]
    from_date: Option<Date>,
    #[arg(long, value_parser = parse_iso_date)]
    to_date: Option<Date>,
    /// One of: date_desc, date_asc, amount_desc, amount_asc, category.
    #[arg(long, default_value = "date_desc")]
    sort: SortOrder
}

impl From<ListArgs> for FilterSpec {
    fn from(args: ListArgs) -> Self {
        FilterSpec {
            category: CategoryFilter::from(args.category.as_str()),
            search: args.search,
            min_amount: args.min_amount,
            max_amount: args.max_amount,
            from_date: args.from_date,
            to_date: args.to_date,
            sort: args.sort
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let keys = match &cli.user {
        Some(user) => StorageKeys::for_user(user),
        None => StorageKeys::default()
    };

    let storage = Arc::new(FileStorage::new(&cli.data_dir));
    let mut store = TransactionStore::new(storage, keys);
    let today = today();

    store.load(today)?;

    info!("Opened ledger in {} with {} transactions", cli.data_dir.display(), store.transactions().len());

    let mut output = BufWriter::new(stdout().lock());

    match cli.command {
        Commands::Add { amount, category, date, time, note, currency } => {
            let currency = currency.map(|symbol| Currency::new(&symbol)).unwrap_or_else(|| store.selected_currency().clone());
            let mut candidate = NewTransaction::new(amount, &category, date.unwrap_or(today))
                .with_note(&note)
                .with_currency(currency);

            if let Some(time) = time {
                candidate = candidate.with_time(&time);
            }

            let added = store.add(candidate)?;
            writeln!(output, "{}", added.id)?;
        }
        Commands::Edit { id, amount, category, date, time, note, currency } => {
            let id = TransactionId::from(id);

            let outcome = match store.find(&id).map(TransactionChanges::from_existing) {
                Some(mut changes) => {
                    changes.amount = amount.unwrap_or(changes.amount);
                    changes.category = category.unwrap_or(changes.category);
                    changes.date = date.unwrap_or(changes.date);
                    changes.note = note.unwrap_or(changes.note);
                    changes.currency = currency.map(|symbol| Currency::new(&symbol)).unwrap_or(changes.currency);
                    changes.time = time;

                    store.apply(Command::UpdateTransaction { id, changes })?
                }
                None => {
                    warn!("Ignoring edit of missing transaction [{id}]");
                    CommandOutcome::Ignored
                }
            };

            match outcome {
                CommandOutcome::Updated(updated) => write_transactions(&mut output, &[updated])?,
                _ => writeln!(output, "Nothing to edit")?
            }
        }
        Commands::Remove { id } => {
            let outcome = store.apply(Command::DeleteTransaction(TransactionId::from(id)))?;
            let removed = matches!(outcome, CommandOutcome::Deleted { removed: true });

            writeln!(output, "{}", if removed { "Removed" } else { "Nothing to remove" })?;
        }
        Commands::Clear => {
            store.clear()?;
            writeln!(output, "Cleared")?;
        }
        Commands::List(args) => {
            store.set_filter(FilterSpec::from(args));
            write_transactions(&mut output, &store.view())?;
        }
        Commands::Stats { all_currencies } => {
            let scope = if all_currencies { TotalsScope::AllCurrencies } else { TotalsScope::SelectedCurrency };
            let stats = compute_stats_with_scope(store.transactions(), store.selected_currency(), today, scope);
            let symbol = store.selected_currency();

            writeln!(output, "this_month_total: {symbol}{}", stats.this_month_total.round_dp(2))?;
            writeln!(output, "last_month_total: {symbol}{}", stats.last_month_total.round_dp(2))?;
            writeln!(output, "monthly_change_percent: {}", stats.monthly_change_percent.round_dp(1))?;
            writeln!(output, "avg_per_transaction: {symbol}{}", stats.avg_per_transaction.round_dp(2))?;
            writeln!(output, "max_transaction: {symbol}{}", stats.max_transaction.round_dp(2))?;
            writeln!(output, "total_transactions: {}", stats.total_transaction_count)?;
            writeln!(output, "currency_transactions: {}", stats.current_currency_transaction_count)?;
        }
        Commands::Categories => {
            let symbol = store.selected_currency();

            for entry in category_breakdown(store.transactions(), symbol) {
                writeln!(output, "{}\t{symbol}{}", entry.category, entry.total.round_dp(2))?;
            }
        }
        Commands::Trend { months } => {
            let symbol = store.selected_currency();

            for entry in monthly_trend(store.transactions(), symbol, today, usize::from(months)) {
                writeln!(output, "{}\t{symbol}{}", entry.month, entry.total.round_dp(2))?;
            }
        }
        Commands::Import { file } => {
            let imported = import_file(&file).await?;
            let count = store.import(imported)?;
            writeln!(output, "Imported {count} transactions")?;
        }
        Commands::Export { file } => {
            export_file(&file, store.transactions(), OffsetDateTime::now_utc()).await?;
            writeln!(output, "Exported {} transactions", store.transactions().len())?;
        }
        Commands::Currency { symbol } => {
            if let Some(symbol) = symbol {
                store.set_currency(Currency::new(&symbol))?;
            }

            writeln!(output, "{}", store.selected_currency())?;
        }
        Commands::Theme { theme } => {
            if let Some(theme) = theme {
                let theme = Theme::parse(&theme).ok_or_else(|| anyhow!("Unknown theme '{theme}', expected light or dark"))?;
                store.set_theme(theme)?;
            }

            writeln!(output, "{}", store.theme())?;
        }
    }

    output.flush()?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries command output, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_transactions(output: &mut impl Write, transactions: &[Transaction]) -> Result<()> {
    writeln!(output, "id\tdate\tcurrency\tamount\tcategory\tnote")?;

    for transaction in transactions {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}",
            transaction.id,
            transaction.date,
            transaction.currency,
            transaction.amount,
            transaction.category,
            transaction.note
        )?;
    }

    Ok(())
}
