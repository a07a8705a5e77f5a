use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use clap::{Parser, Subcommand};
use rusqlite::types::Value as SqlValue;
use serde_json::{json, Value as JsonValue};
use spanlite::{
    EmulatorResult, Executor, QueryBuilder, QueryError, QueryResult, Statement, Value, ValueType,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "spanlite")]
#[command(about = "Render protocol values into parameterized SQL for the embedded engine", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unnest an array value into a VALUES table constructor
    Unnest {
        /// Protocol type of the value, e.g. ARRAY<INT64>
        #[arg(long = "type")]
        value_type: String,

        /// Value in its JSON wire encoding, e.g. '["1","2"]'
        #[arg(long)]
        value: String,

        /// Accept empty arrays (rendered as an empty table)
        #[arg(long, env = "SPANLITE_ALLOW_EMPTY")]
        allow_empty: bool,

        /// Run the fragment on an in-memory engine and print the rows
        #[arg(long)]
        execute: bool,
    },

    /// Build a multi-row INSERT statement
    Insert {
        /// Target table
        #[arg(long)]
        table: String,

        /// Column as NAME:TYPE (repeatable, in row order)
        #[arg(long = "column", required = true)]
        columns: Vec<String>,

        /// Rows as a JSON list of lists in wire encoding
        #[arg(long)]
        rows: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spanlite=info,spanlite_query=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&args.command) {
        Ok(output) => {
            let text = if args.pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            writeln!(io::stdout(), "{}", text)?;
            Ok(())
        }
        Err(err) => {
            let status = err.to_status();
            tracing::debug!(code = status.code.as_i32(), "command failed");
            writeln!(io::stderr(), "{}", status.to_json())?;
            std::process::exit(1);
        }
    }
}

fn run(command: &Command) -> EmulatorResult<JsonValue> {
    let builder = QueryBuilder::new();

    match command {
        Command::Unnest {
            value_type,
            value,
            allow_empty,
            execute,
        } => {
            let ty: ValueType = value_type.parse()?;
            let json: JsonValue = serde_json::from_str(value)?;
            let value = Value::from_wire(&json, &ty)?;
            let (fragment, args) = builder.unnest_value(&value, *allow_empty)?;

            if !*execute {
                return Ok(json!({ "sql": fragment.raw, "args": args }));
            }

            let mut stmt = Statement::new();
            stmt.push_sql("SELECT * FROM (")
                .push_fragment(fragment, args)
                .push_sql(")");
            let rows = Executor::open_in_memory()?.query(&stmt)?;
            Ok(json!({
                "sql": stmt.sql,
                "rows": rows.iter().map(|row| row_to_json(row)).collect::<Vec<_>>(),
            }))
        }
        Command::Insert {
            table,
            columns,
            rows,
        } => {
            let mut names = Vec::with_capacity(columns.len());
            let mut types = Vec::with_capacity(columns.len());
            for column in columns {
                let (name, ty) = column.split_once(':').ok_or_else(|| {
                    QueryError::InvalidArgument(format!(
                        "column must be NAME:TYPE, got {}",
                        column
                    ))
                })?;
                names.push(name);
                types.push(ty.parse::<ValueType>()?);
            }

            let raw_rows: Vec<Vec<JsonValue>> = serde_json::from_str(rows)?;
            let rows = raw_rows
                .iter()
                .map(|row| {
                    if row.len() != types.len() {
                        return Err(QueryError::InvalidArgument(format!(
                            "row has {} values, expected {}",
                            row.len(),
                            types.len()
                        )));
                    }
                    row.iter()
                        .zip(&types)
                        .map(|(cell, ty)| Value::from_wire(cell, ty))
                        .collect::<QueryResult<Vec<Value>>>()
                })
                .collect::<QueryResult<Vec<_>>>()?;

            let stmt = builder.insert_rows(table, &names, &rows)?;
            Ok(json!({ "sql": stmt.sql, "args": stmt.args }))
        }
    }
}

fn row_to_json(row: &[SqlValue]) -> JsonValue {
    row.iter()
        .map(|v| match v {
            SqlValue::Null => JsonValue::Null,
            SqlValue::Integer(i) => json!(i),
            SqlValue::Real(f) => json!(f),
            SqlValue::Text(s) => json!(s),
            SqlValue::Blob(b) => json!(BASE64.encode(b)),
        })
        .collect()
}
