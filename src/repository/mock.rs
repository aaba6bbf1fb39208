//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::person::{NewPerson, Person, PersonFilter, PersonSort, UpdatePerson};
use crate::domain::types::{PersonId, RecordStatus, VaccineId};
use crate::domain::vaccine::{NewVaccine, UpdateVaccine, Vaccine, VaccineFilter, VaccineSort};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{PersonReader, PersonWriter, VaccineReader, VaccineWriter};

mock! {
    pub Repository {}

    impl PersonReader for Repository {
        fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>>;
        fn list_active_people(&self) -> RepositoryResult<Vec<Person>>;
        fn search_people(
            &self,
            filter: &PersonFilter,
            request: &PageRequest<PersonSort>,
        ) -> RepositoryResult<Page<Person>>;
    }

    impl PersonWriter for Repository {
        fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
        fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person>;
        fn set_person_status(&self, id: PersonId, status: RecordStatus) -> RepositoryResult<Person>;
        fn delete_person(&self, id: PersonId) -> RepositoryResult<()>;
    }

    impl VaccineReader for Repository {
        fn get_vaccine_by_id(&self, id: VaccineId) -> RepositoryResult<Option<Vaccine>>;
        fn list_active_vaccines(&self) -> RepositoryResult<Vec<Vaccine>>;
        fn search_vaccines(
            &self,
            filter: &VaccineFilter,
            request: &PageRequest<VaccineSort>,
        ) -> RepositoryResult<Page<Vaccine>>;
    }

    impl VaccineWriter for Repository {
        fn create_vaccine(&self, new_vaccine: &NewVaccine) -> RepositoryResult<Vaccine>;
        fn update_vaccine(
            &self,
            id: VaccineId,
            updates: &UpdateVaccine,
        ) -> RepositoryResult<Vaccine>;
        fn set_vaccine_status(
            &self,
            id: VaccineId,
            status: RecordStatus,
        ) -> RepositoryResult<Vaccine>;
        fn delete_vaccine(&self, id: VaccineId) -> RepositoryResult<()>;
    }
}
