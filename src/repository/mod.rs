use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        person::{NewPerson, Person, PersonFilter, PersonSort, UpdatePerson},
        types::{PersonId, RecordStatus, VaccineId},
        vaccine::{NewVaccine, UpdateVaccine, Vaccine, VaccineFilter, VaccineSort},
    },
    pagination::{Page, PageRequest},
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod person;
pub mod vaccine;

/// Builds a `LIKE` pattern matching `value` anywhere in the column.
///
/// `%`, `_` and `\` typed by the user are escaped with `\`, so the pattern
/// must be used together with `.escape('\\')`.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Diesel-backed implementation of every repository trait.
///
/// Each call checks a connection out of the pool and returns it when the
/// guard drops, whatever the outcome of the query.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait PersonReader {
    /// Looks a person up by id regardless of status.
    fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>>;
    /// All active people ordered by id.
    fn list_active_people(&self) -> RepositoryResult<Vec<Person>>;
    /// One window of active people matching `filter`, plus the matching total.
    fn search_people(
        &self,
        filter: &PersonFilter,
        request: &PageRequest<PersonSort>,
    ) -> RepositoryResult<Page<Person>>;
}

pub trait PersonWriter {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
    fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person>;
    fn set_person_status(&self, id: PersonId, status: RecordStatus) -> RepositoryResult<Person>;
    /// Physically removes the row. The web flows only deactivate.
    fn delete_person(&self, id: PersonId) -> RepositoryResult<()>;
}

pub trait VaccineReader {
    fn get_vaccine_by_id(&self, id: VaccineId) -> RepositoryResult<Option<Vaccine>>;
    fn list_active_vaccines(&self) -> RepositoryResult<Vec<Vaccine>>;
    fn search_vaccines(
        &self,
        filter: &VaccineFilter,
        request: &PageRequest<VaccineSort>,
    ) -> RepositoryResult<Page<Vaccine>>;
}

pub trait VaccineWriter {
    fn create_vaccine(&self, new_vaccine: &NewVaccine) -> RepositoryResult<Vaccine>;
    fn update_vaccine(&self, id: VaccineId, updates: &UpdateVaccine)
    -> RepositoryResult<Vaccine>;
    fn set_vaccine_status(&self, id: VaccineId, status: RecordStatus)
    -> RepositoryResult<Vaccine>;
    fn delete_vaccine(&self, id: VaccineId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_value_in_wildcards() {
        assert_eq!(contains_pattern("ana"), "%ana%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("10%_a\\b"), "%10\\%\\_a\\\\b%");
    }
}
