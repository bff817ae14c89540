use serde::Serialize;

use crate::{
    config::OutputFormat,
    error::{Error, Result},
    parse::Records,
};

/// Serialize `records` as an array of objects, keys in header order.
pub fn render(records: &Records, format: OutputFormat) -> Result<String> {
    render_value(records, format)
}

/// Serialize any value (e.g. a projected column) in `format`.
pub fn render_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| Error::serialization(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn json_keeps_header_order() -> anyhow::Result<()> {
        let records = parse(&["z,a", "1,2"], ",")?;
        let out = render(&records, OutputFormat::Json)?;
        let z = out.find("\"z\"").expect("z key");
        let a = out.find("\"a\"").expect("a key");
        assert!(z < a);

        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value[0]["a"], "2");
        Ok(())
    }

    #[test]
    fn yaml_round_trips_values() -> anyhow::Result<()> {
        let records = parse(&["id;name", "1;ada", "2"], ";")?;
        let out = render(&records, OutputFormat::Yaml)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&out)?;
        assert_eq!(value[0]["name"].as_str(), Some("ada"));
        assert!(value[1].get("name").is_none());
        Ok(())
    }

    #[test]
    fn empty_result_is_empty_array() -> anyhow::Result<()> {
        let records = parse(&["id"], ",")?;
        assert_eq!(render(&records, OutputFormat::Json)?, "[]");
        Ok(())
    }

    #[test]
    fn renders_projected_column() -> anyhow::Result<()> {
        let records = parse(&["id,name", "1,ada", "2"], ",")?;
        let col = records.column("name").expect("name column");
        let out = render_value(&col, OutputFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value, serde_json::json!(["ada", null]));
        Ok(())
    }
}
