//! Query parameters for record operations

use serde::{Deserialize, Serialize};

/// Default and maximum page size accepted by the record API
pub const DEFAULT_PER_PAGE: u32 = 200;

/// Query parameters understood by the record endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Param {
    Ids,
    Page,
    PerPage,
    Criteria,
    Word,
    Phone,
    Email,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::Ids => "ids",
            Param::Page => "page",
            Param::PerPage => "per_page",
            Param::Criteria => "criteria",
            Param::Word => "word",
            Param::Phone => "phone",
            Param::Email => "email",
        }
    }
}

/// Ordered multimap of query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterMap {
    params: Vec<(Param, String)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; repeated keys accumulate
    pub fn add(&mut self, param: Param, value: impl ToString) -> &mut Self {
        self.params.push((param, value.to_string()));
        self
    }

    pub fn get_all(&self, param: Param) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(p, _)| *p == param)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into query pairs, joining repeated keys with commas
    /// (`ids=1,2,3`) the way the record API expects.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();

        for (param, value) in &self.params {
            let key = param.as_str();
            match pairs.iter_mut().find(|(k, _)| *k == key) {
                Some((_, joined)) => {
                    joined.push(',');
                    joined.push_str(value);
                }
                None => pairs.push((key, value.clone())),
            }
        }

        pairs
    }
}

/// 1-based page selection for list and search calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub(crate) fn apply(&self, params: &mut ParameterMap) {
        params.add(Param::Page, self.page);
        params.add(Param::PerPage, self.per_page);
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// The single search key a search call filters on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBy {
    Criteria(String),
    Word(String),
    Phone(String),
    Email(String),
}

impl SearchBy {
    pub(crate) fn apply(&self, params: &mut ParameterMap) {
        match self {
            SearchBy::Criteria(value) => params.add(Param::Criteria, value),
            SearchBy::Word(value) => params.add(Param::Word, value),
            SearchBy::Phone(value) => params.add(Param::Phone, value),
            SearchBy::Email(value) => params.add(Param::Email, value),
        };
    }
}
