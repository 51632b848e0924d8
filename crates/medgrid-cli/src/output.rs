use colored::Colorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use medgrid_core::{Patient, PatientRecord};

use crate::cli::OutputFormat;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Render the patient table view: one row per record plus a page footer.
pub fn print_patient_page(
    patients: &[Patient],
    page_number: u64,
    total_pages: u64,
    total_records: u64,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Table => {
            if patients.is_empty() {
                println!("No patients found.");
                return;
            }
            let mut builder = Builder::default();
            builder.push_record(["ID", "First Name", "Last Name", "Date of Birth", "MRN"]);
            for patient in patients {
                let record = &patient.record;
                builder.push_record([
                    patient.id.to_string(),
                    text(&record.first_name),
                    text(&record.last_name),
                    record
                        .date_of_birth
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    text(&record.medical_record_number),
                ]);
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
            println!(
                "Page {}/{} ({} records)",
                page_number + 1,
                total_pages.max(1),
                total_records
            );
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let value = serde_json::to_value(patients).unwrap_or(Value::Null);
            print_value(&value, format);
        }
    }
}

/// Render the patient detail view.
pub fn print_patient(patient: &Patient, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let record = &patient.record;
            println!("{} {}", "Patient:".cyan(), patient.id.to_string().cyan());
            print_field("First Name", &text(&record.first_name));
            print_field("Last Name", &text(&record.last_name));
            print_field(
                "Date of Birth",
                &record
                    .date_of_birth
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
            print_field("MRN", &text(&record.medical_record_number));
            print_field("Address", &text(&record.address));
            print_field("Phone", &text(&record.phone_number));
            print_medications(record);
            print_follow_ups(record);
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let value = serde_json::to_value(patient).unwrap_or(Value::Null);
            print_value(&value, format);
        }
    }
}

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Table => {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
        OutputFormat::Yaml => {
            println!("{}", format_yaml(value, 0));
        }
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_else(|| "-".to_string())
}

fn print_field(label: &str, value: &str) {
    println!("{}: {}", label.cyan(), value);
}

fn print_medications(record: &PatientRecord) {
    if record.medications.is_empty() {
        return;
    }
    println!("{}:", "Medications".cyan());
    for med in &record.medications {
        let span = match (med.start_date, med.end_date) {
            (Some(start), Some(end)) => format!(" ({start} to {end})"),
            (Some(start), None) => format!(" (since {start})"),
            _ => String::new(),
        };
        println!("  - {} {}{span}", text(&med.name), text(&med.dosage));
    }
}

fn print_follow_ups(record: &PatientRecord) {
    if record.follow_ups.is_empty() {
        return;
    }
    println!("{}:", "Follow-ups".cyan());
    for follow_up in &record.follow_ups {
        let date = follow_up
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let kind = follow_up
            .kind
            .map(|k| format!("{k:?}"))
            .unwrap_or_else(|| "-".to_string());
        println!("  - {date} {kind}");
    }
}

// Simple YAML-like output without a serde_yaml dependency.
fn format_yaml(value: &Value, indent: usize) -> String {
    let prefix = " ".repeat(indent);
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Array(arr) => {
            if arr.is_empty() {
                return "[]".to_string();
            }
            let items: Vec<String> = arr
                .iter()
                .map(|v| format!("{prefix}- {}", format_yaml(v, indent + 2)))
                .collect();
            format!("\n{}", items.join("\n"))
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                return "{}".to_string();
            }
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    let val = format_yaml(v, indent + 2);
                    if val.starts_with('\n') {
                        format!("{prefix}{k}:{val}")
                    } else {
                        format!("{prefix}{k}: {val}")
                    }
                })
                .collect();
            if indent == 0 {
                items.join("\n")
            } else {
                format!("\n{}", items.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_falls_back_to_dash() {
        assert_eq!(text(&None), "-");
        assert_eq!(text(&Some("Ada".into())), "Ada");
    }

    #[test]
    fn test_yaml_scalars_and_nesting() {
        let value = json!({"a": 1, "b": {"c": "x"}, "d": [true, false]});
        let yaml = format_yaml(&value, 0);
        assert!(yaml.contains("a: 1"));
        assert!(yaml.contains("c: \"x\""));
        assert!(yaml.contains("- true"));
    }
}
