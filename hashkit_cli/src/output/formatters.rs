use super::{HashReport, OutputFormatter};
use anyhow::Result;
use colored::*;
use hashkit_core::Converter;
use hashkit_core::hashing::AlgorithmInfo;
use serde_json::json;

/// Text formatter for human-readable output
///
/// The digest is always alone on the first line so the output can be piped.
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_hash(&self, report: &HashReport) -> Result<String> {
        let mut output = self.colorize(&report.hash, |s| s.cyan());

        match report.matched {
            Some(true) => {
                output.push('\n');
                output.push_str(&self.colorize("MATCH", |s| s.green().bold()));
            }
            Some(false) => {
                output.push('\n');
                output.push_str(&self.colorize("MISMATCH", |s| s.red().bold()));
            }
            None => {}
        }

        Ok(output)
    }

    fn format_listing(&self, algorithms: &[AlgorithmInfo]) -> Result<String> {
        let mut lines = vec![self.colorize("Algorithms:", |s| s.bold())];
        for info in algorithms {
            let padded = format!("{:<8}", info.algorithm.to_string());
            let id = self.colorize(&padded, |s| s.yellow());
            lines.push(format!(
                "  {id} {:<10} {} bytes",
                info.display_name, info.digest_len
            ));
        }

        lines.push(String::new());
        lines.push(self.colorize("Converters:", |s| s.bold()));
        for converter in Converter::ALL {
            let id = self.colorize(&format!("{:<17}", converter.id()), |s| s.yellow());
            lines.push(format!("  {id} {}", converter.display_name()));
        }

        Ok(lines.join("\n"))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &serde_json::Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_hash(&self, report: &HashReport) -> Result<String> {
        self.render(&serde_json::to_value(report)?)
    }

    fn format_listing(&self, algorithms: &[AlgorithmInfo]) -> Result<String> {
        let converters: Vec<_> = Converter::ALL
            .iter()
            .map(|converter| {
                json!({
                    "id": converter.id(),
                    "display_name": converter.display_name(),
                })
            })
            .collect();

        self.render(&json!({
            "algorithms": algorithms,
            "converters": converters,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashkit_core::{AlgorithmRegistry, HashAlgorithm, HashCalculator};

    fn sample_report(expected: Option<&str>) -> HashReport {
        let result = HashCalculator::new()
            .calculate_str(HashAlgorithm::MD5, "")
            .unwrap();
        let hash = "d41d8cd98f00b204e9800998ecf8427e".to_string();
        HashReport::new("empty.bin", &result, hash).with_expected(expected.map(str::to_string))
    }

    #[test]
    fn test_text_hash_is_plain_without_color() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_hash(&sample_report(None)).unwrap();
        assert_eq!(output, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_text_comparison_lines() {
        let formatter = TextFormatter::new(false);

        let matched = formatter
            .format_hash(&sample_report(Some("D41D8CD98F00B204E9800998ECF8427E")))
            .unwrap();
        assert_eq!(matched.lines().nth(1), Some("MATCH"));

        let mismatched = formatter
            .format_hash(&sample_report(Some("ffff")))
            .unwrap();
        assert_eq!(mismatched.lines().nth(1), Some("MISMATCH"));
    }

    #[test]
    fn test_json_hash_fields() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_hash(&sample_report(Some("ffff")))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["source"], "empty.bin");
        assert_eq!(value["algorithm"], "md5");
        assert_eq!(value["hash"], "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(value["size"], 0);
        assert_eq!(value["matched"], false);
    }

    #[test]
    fn test_json_omits_comparison_when_not_requested() {
        let output = JsonFormatter::new(false)
            .format_hash(&sample_report(None))
            .unwrap();
        assert!(!output.contains("matched"));
        assert!(!output.contains("expected"));
    }

    #[test]
    fn test_listings() {
        let algorithms = AlgorithmRegistry::global().list();

        let text = TextFormatter::new(false).format_listing(&algorithms).unwrap();
        assert!(text.contains("SHA-256"));
        assert!(text.contains("base64-to-string"));

        let json = JsonFormatter::new(true).format_listing(&algorithms).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithms"].as_array().unwrap().len(), 8);
        assert_eq!(value["converters"].as_array().unwrap().len(), 6);
        assert_eq!(value["algorithms"][0]["algorithm"], "md5");
    }
}
