//! Repository implementation for registered people.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::{fold, fold_case},
    domain::{
        person::{NewPerson, Person, PersonFilter, PersonSort, UpdatePerson},
        types::{PersonId, RecordStatus},
    },
    models::person::{
        NewPerson as DbNewPerson, Person as DbPerson, UpdatePerson as DbUpdatePerson,
    },
    pagination::{Page, PageRequest, SortDirection},
    repository::{
        DieselRepository, PersonReader, PersonWriter, contains_pattern,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::people,
};

/// Active people matching every condition present in `filter`.
///
/// Shared by the page query and its count so both always see the same
/// predicate.
fn filtered_people(filter: &PersonFilter) -> people::BoxedQuery<'static, Sqlite> {
    let mut query = people::table
        .filter(people::status.eq(RecordStatus::Active.as_str()))
        .into_boxed::<Sqlite>();

    if let Some(id) = filter.id {
        query = query.filter(people::id.eq(id));
    }
    if let Some(name) = &filter.name {
        query = query.filter(
            fold_case(people::name)
                .like(contains_pattern(&fold(name)))
                .escape('\\'),
        );
    }
    if let Some(cpf) = &filter.cpf {
        query = query.filter(
            fold_case(people::cpf)
                .like(contains_pattern(&fold(cpf)))
                .escape('\\'),
        );
    }
    query
}

fn into_domain(rows: Vec<DbPerson>) -> RepositoryResult<Vec<Person>> {
    rows.into_iter()
        .map(|row| Person::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl PersonReader for DieselRepository {
    fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>> {
        let mut conn = self.conn()?;
        let person = people::table
            .find(id.get())
            .first::<DbPerson>(&mut conn)
            .optional()?;

        match person {
            Some(person) => Ok(Some(Person::try_from(person)?)),
            None => Ok(None),
        }
    }

    fn list_active_people(&self) -> RepositoryResult<Vec<Person>> {
        let mut conn = self.conn()?;
        let rows = people::table
            .filter(people::status.eq(RecordStatus::Active.as_str()))
            .order(people::id.asc())
            .load::<DbPerson>(&mut conn)?;

        into_domain(rows)
    }

    fn search_people(
        &self,
        filter: &PersonFilter,
        request: &PageRequest<PersonSort>,
    ) -> RepositoryResult<Page<Person>> {
        let mut conn = self.conn()?;

        let sort = request.sort();
        let items = filtered_people(filter);
        let items = match (sort.key, sort.direction) {
            (PersonSort::Id, SortDirection::Asc) => items.order_by(people::id.asc()),
            (PersonSort::Id, SortDirection::Desc) => items.order_by(people::id.desc()),
            (PersonSort::Name, SortDirection::Asc) => items.order_by(people::name.asc()),
            (PersonSort::Name, SortDirection::Desc) => items.order_by(people::name.desc()),
            (PersonSort::Cpf, SortDirection::Asc) => items.order_by(people::cpf.asc()),
            (PersonSort::Cpf, SortDirection::Desc) => items.order_by(people::cpf.desc()),
        };

        let rows = items
            .then_order_by(people::id.asc())
            .offset(request.offset())
            .limit(request.limit())
            .load::<DbPerson>(&mut conn)?;

        log::info!("Counting people matching {filter:?}");
        let total = filtered_people(filter)
            .count()
            .get_result::<i64>(&mut conn)? as usize;
        log::info!("Person search matches {total} records");

        Ok(Page::new(into_domain(rows)?, total))
    }
}

impl PersonWriter for DieselRepository {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person> {
        let mut conn = self.conn()?;
        let insertable: DbNewPerson = new_person.into();

        let created = diesel::insert_into(people::table)
            .values(&insertable)
            .get_result::<DbPerson>(&mut conn)?;

        Ok(Person::try_from(created)?)
    }

    fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person> {
        let mut conn = self.conn()?;
        let changes = DbUpdatePerson::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(people::table.find(id.get()))
            .set(&changes)
            .get_result::<DbPerson>(&mut conn)?;

        Ok(Person::try_from(updated)?)
    }

    fn set_person_status(&self, id: PersonId, status: RecordStatus) -> RepositoryResult<Person> {
        let mut conn = self.conn()?;

        let updated = diesel::update(people::table.find(id.get()))
            .set((
                people::status.eq(status.as_str()),
                people::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbPerson>(&mut conn)?;

        Ok(Person::try_from(updated)?)
    }

    fn delete_person(&self, id: PersonId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(people::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
