use csv::ReaderBuilder;
use std::collections::HashMap;

/// Column-semantics lookup parsed from the OWID codebook CSV.
///
/// The codebook maps every dataset column to a prose description; the
/// dashboard surfaces these as hover tooltips on the filter controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Codebook {
    descriptions: HashMap<String, String>,
}

impl Codebook {
    /// Parse the codebook CSV. Expected headers: `column,description,...`.
    ///
    /// Rows without a column name are skipped; extra columns (source, category)
    /// are ignored.
    pub fn parse(csv_data: &str) -> Codebook {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut descriptions = HashMap::new();
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(_) => continue,
            };
            let column = record.get(0).unwrap_or("").trim();
            let description = record.get(1).unwrap_or("").trim();
            if column.is_empty() {
                continue;
            }
            descriptions.insert(column.to_string(), description.to_string());
        }
        log::info!("codebook: {} column descriptions", descriptions.len());
        Codebook { descriptions }
    }

    /// Description for a column, or empty when the codebook doesn't know it.
    pub fn description(&self, column: &str) -> &str {
        self.descriptions
            .get(column)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Codebook;

    const CODEBOOK_CSV: &str = "\
column,description,source
date,Date of observation,Our World in Data
continent,Continent of the geographical location,Our World in Data
location,Geographical location,Our World in Data
";

    #[test]
    fn test_parse_descriptions() {
        let codebook = Codebook::parse(CODEBOOK_CSV);
        assert_eq!(codebook.description("date"), "Date of observation");
        assert_eq!(
            codebook.description("continent"),
            "Continent of the geographical location"
        );
    }

    #[test]
    fn test_unknown_column_is_empty() {
        let codebook = Codebook::parse(CODEBOOK_CSV);
        assert_eq!(codebook.description("new_cases"), "");
    }

    #[test]
    fn test_empty_input() {
        let codebook = Codebook::parse("column,description\n");
        assert!(codebook.is_empty());
    }
}
