use super::super::domain::Candidate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        candidates.push(row.into_candidate());
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reasons: Option<String>,
}

impl CatalogRow {
    fn into_candidate(self) -> Candidate {
        let mut tags: Vec<String> = Vec::new();
        for tag in split_list(self.tags.as_deref()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let reasons = self
            .reasons
            .as_deref()
            .map(|raw| split_list(Some(raw)))
            .filter(|reasons| !reasons.is_empty());

        Candidate {
            name: self.name,
            description: self.description,
            url: self.url,
            tags,
            reasons,
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
