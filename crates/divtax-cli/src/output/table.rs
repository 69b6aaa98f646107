use serde_json::Value;
use tabled::{builder::Builder, Table};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format output as tables using the tabled crate.
///
/// The projection envelope gets three sections: the scalar summary, the
/// per-holding breakdown, and the 12-month schedule.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            print_summary(result);
            if let Some(Value::Array(holdings)) = result.get("holdings") {
                println!("\nHoldings:");
                print_holdings(holdings);
            }
            if let Some(Value::Array(schedule)) = result.get("monthly_schedule") {
                println!("\nMonthly schedule (after tax):");
                print_schedule(schedule);
            }
            print_warnings(envelope);
        }
        _ => print_summary(envelope),
    }
}

fn print_summary(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        // Composite sections get their own tables below
        if matches!(key.as_str(), "holdings" | "monthly_schedule") {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_holdings(holdings: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Ticker", "Investment", "Shares", "Annual dividend", "Withholding"]);
    for holding in holdings {
        if let Value::Object(h) = holding {
            builder.push_record([
                h.get("ticker").map(format_value).unwrap_or_default(),
                h.get("investment_amount").map(format_value).unwrap_or_default(),
                h.get("share_quantity").map(format_value).unwrap_or_default(),
                h.get("annual_dividend").map(format_value).unwrap_or_default(),
                h.get("withholding_rate").map(format_value).unwrap_or_default(),
            ]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_schedule(schedule: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Month", "Dividend"]);
    for (slot, amount) in schedule.iter().enumerate().take(12) {
        builder.push_record([MONTHS[slot], &format_value(amount)]);
    }
    println!("{}", Table::from(builder));
}

fn print_warnings(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
        other => other.to_string(),
    }
}
