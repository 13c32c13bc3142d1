use std::fs;
use std::path::Path;

use serde_yaml_ng::{Mapping, Value};
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::{GroceryList, PlanReport};

/// Load a `name -> fields` YAML document.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Mapping> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PlannerError::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(PlannerError::InvalidConfig(format!(
            "{} is empty",
            path.display()
        )));
    }
    let document: Value = serde_yaml_ng::from_str(&content)?;
    match document {
        Value::Mapping(records) => {
            info!("Read {} records from {}", records.len(), path.display());
            Ok(records)
        }
        Value::Null => Err(PlannerError::InvalidConfig(format!(
            "{} is empty",
            path.display()
        ))),
        _ => Err(PlannerError::InvalidConfig(format!(
            "{} must map names to field mappings",
            path.display()
        ))),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Save the plan report as YAML, or JSON for a `.json` path.
pub fn save_report<P: AsRef<Path>>(path: P, report: &PlanReport) -> Result<()> {
    let path = path.as_ref();
    let content = if is_json(path) {
        serde_json::to_string_pretty(report)?
    } else {
        serde_yaml_ng::to_string(report)?
    };
    fs::write(path, content)?;
    info!("Wrote plan to {}", path.display());
    Ok(())
}

/// Load a report written by [`save_report`].
pub fn load_report<P: AsRef<Path>>(path: P) -> Result<PlanReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    if is_json(path) {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml_ng::from_str(&content)?)
    }
}

/// Write the grocery list as `item,amount` rows.
pub fn write_grocery_csv<P: AsRef<Path>>(path: P, groceries: &GroceryList) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["item", "amount"])?;
    for (item, amount) in groceries {
        let amount = amount.to_string();
        writer.write_record([item.as_str(), amount.as_str()])?;
    }
    writer.flush()?;
    info!("Wrote grocery CSV to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_records() {
        let yaml = "Tomate:\n  kcal: 18\n  carb: 3.9\nMozarella:\n  kcal: 250\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.get("Tomate").is_some());
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records("/nonexistent/ingredientList.yaml");
        assert!(matches!(result, Err(PlannerError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_records_rejects_lists() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"- Tomate\n- Mozarella\n").unwrap();
        let result = load_records(file.path());
        assert!(matches!(result, Err(PlannerError::InvalidConfig(_))));

        let empty = NamedTempFile::new().unwrap();
        let result = load_records(empty.path());
        assert!(matches!(result, Err(PlannerError::InvalidConfig(_))));
    }
}
