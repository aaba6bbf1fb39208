//! DTOs shaped for the search and listing templates.

use serde::Serialize;

use crate::pagination::Paginated;

/// Results of a filtered search together with the criteria that produced them.
#[derive(Debug, Serialize)]
pub struct SearchPageData<T, F> {
    pub results: Paginated<T>,
    pub criteria: F,
}
