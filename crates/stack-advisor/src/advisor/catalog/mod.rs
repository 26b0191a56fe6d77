mod parser;
mod standard;
pub mod tree;

use super::domain::Candidate;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use tree::TreeStructure;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidTree(Vec<String>),
    DuplicateName(String),
    UnsupportedFormat(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read catalog source: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogError::Json(err) => write!(f, "invalid decision tree JSON: {}", err),
            CatalogError::InvalidTree(errors) => {
                write!(f, "decision tree failed validation: {}", errors.join("; "))
            }
            CatalogError::DuplicateName(name) => {
                write!(f, "candidate '{}' appears more than once", name)
            }
            CatalogError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported catalog format '{}' (expected .json or .csv)",
                extension
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::InvalidTree(_)
            | CatalogError::DuplicateName(_)
            | CatalogError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Immutable, ordered set of recommendation outcomes with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    candidates: Vec<Arc<Candidate>>,
}

impl Catalog {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for candidate in &candidates {
            if !names.insert(candidate.name.as_str()) {
                return Err(CatalogError::DuplicateName(candidate.name.clone()));
            }
        }

        Ok(Self {
            candidates: candidates.into_iter().map(Arc::new).collect(),
        })
    }

    /// Collects the result of every terminal node, in tree order. The tree must
    /// pass [`TreeStructure::validate`].
    pub fn from_tree(tree: &TreeStructure) -> Result<Self, CatalogError> {
        let validation = tree.validate();
        if !validation.valid {
            return Err(CatalogError::InvalidTree(validation.errors));
        }

        let candidates: Vec<Candidate> = tree.results().cloned().collect();
        debug!(candidates = candidates.len(), "extracted catalog from tree");
        Self::from_candidates(candidates)
    }

    /// Reads `name,description,url,tags,reasons` rows; tags and reasons are
    /// `;`-separated.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let candidates = parser::parse_candidates(reader)?;
        Self::from_candidates(candidates)
    }

    /// Loads a `.json` decision tree or a `.csv` catalog export.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => {
                let file = std::fs::File::open(path)?;
                let tree = TreeStructure::from_reader(std::io::BufReader::new(file))?;
                Self::from_tree(&tree)
            }
            "csv" => {
                let file = std::fs::File::open(path)?;
                Self::from_csv_reader(file)
            }
            _ => Err(CatalogError::UnsupportedFormat(extension)),
        }
    }

    /// Built-in catalog of common stacks, matched to the standard question bank.
    pub fn standard() -> Self {
        Self {
            candidates: standard::standard_candidates()
                .into_iter()
                .map(Arc::new)
                .collect(),
        }
    }

    pub fn candidates(&self) -> &[Arc<Candidate>] {
        &self.candidates
    }

    pub fn find(&self, name: &str) -> Option<&Arc<Candidate>> {
        self.candidates
            .iter()
            .find(|candidate| candidate.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_names() {
        let standard = Catalog::standard();
        let rebuilt = Catalog::from_candidates(
            standard
                .candidates()
                .iter()
                .map(|candidate| (**candidate).clone())
                .collect(),
        )
        .expect("standard catalog names unique");
        assert_eq!(rebuilt, standard);
        assert!(standard.len() >= 12);
    }

    #[test]
    fn find_ignores_ascii_case() {
        let catalog = Catalog::standard();
        let django = catalog.find("django").expect("django present");
        assert_eq!(django.name, "Django");
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let err = Catalog::load("stacks.yaml").expect_err("yaml unsupported");
        assert!(matches!(err, CatalogError::UnsupportedFormat(ext) if ext == "yaml"));
    }
}
