//! Repository implementation for registered vaccines.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::{fold, fold_case},
    domain::{
        types::{RecordStatus, VaccineId},
        vaccine::{NewVaccine, UpdateVaccine, Vaccine, VaccineFilter, VaccineSort},
    },
    models::vaccine::{
        NewVaccine as DbNewVaccine, UpdateVaccine as DbUpdateVaccine, Vaccine as DbVaccine,
    },
    pagination::{Page, PageRequest, SortDirection},
    repository::{
        DieselRepository, VaccineReader, VaccineWriter, contains_pattern,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::vaccines,
};

/// Active vaccines matching every condition present in `filter`.
///
/// Shared by the page query and its count so both always see the same
/// predicate.
fn filtered_vaccines(filter: &VaccineFilter) -> vaccines::BoxedQuery<'static, Sqlite> {
    let mut query = vaccines::table
        .filter(vaccines::status.eq(RecordStatus::Active.as_str()))
        .into_boxed::<Sqlite>();

    if let Some(id) = filter.id {
        query = query.filter(vaccines::id.eq(id));
    }
    if let Some(name) = &filter.name {
        query = query.filter(
            fold_case(vaccines::name)
                .like(contains_pattern(&fold(name)))
                .escape('\\'),
        );
    }
    if let Some(description) = &filter.description {
        query = query.filter(
            fold_case(vaccines::description)
                .like(contains_pattern(&fold(description)))
                .escape('\\'),
        );
    }
    query
}

fn into_domain(rows: Vec<DbVaccine>) -> RepositoryResult<Vec<Vaccine>> {
    rows.into_iter()
        .map(|row| Vaccine::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl VaccineReader for DieselRepository {
    fn get_vaccine_by_id(&self, id: VaccineId) -> RepositoryResult<Option<Vaccine>> {
        let mut conn = self.conn()?;
        let vaccine = vaccines::table
            .find(id.get())
            .first::<DbVaccine>(&mut conn)
            .optional()?;

        match vaccine {
            Some(vaccine) => Ok(Some(Vaccine::try_from(vaccine)?)),
            None => Ok(None),
        }
    }

    fn list_active_vaccines(&self) -> RepositoryResult<Vec<Vaccine>> {
        let mut conn = self.conn()?;
        let rows = vaccines::table
            .filter(vaccines::status.eq(RecordStatus::Active.as_str()))
            .order(vaccines::id.asc())
            .load::<DbVaccine>(&mut conn)?;

        into_domain(rows)
    }

    fn search_vaccines(
        &self,
        filter: &VaccineFilter,
        request: &PageRequest<VaccineSort>,
    ) -> RepositoryResult<Page<Vaccine>> {
        let mut conn = self.conn()?;

        let sort = request.sort();
        let items = filtered_vaccines(filter);
        let items = match (sort.key, sort.direction) {
            (VaccineSort::Id, SortDirection::Asc) => items.order_by(vaccines::id.asc()),
            (VaccineSort::Id, SortDirection::Desc) => items.order_by(vaccines::id.desc()),
            (VaccineSort::Name, SortDirection::Asc) => items.order_by(vaccines::name.asc()),
            (VaccineSort::Name, SortDirection::Desc) => items.order_by(vaccines::name.desc()),
            (VaccineSort::Description, SortDirection::Asc) => {
                items.order_by(vaccines::description.asc())
            }
            (VaccineSort::Description, SortDirection::Desc) => {
                items.order_by(vaccines::description.desc())
            }
        };

        let rows = items
            .then_order_by(vaccines::id.asc())
            .offset(request.offset())
            .limit(request.limit())
            .load::<DbVaccine>(&mut conn)?;

        log::info!("Counting vaccines matching {filter:?}");
        let total = filtered_vaccines(filter)
            .count()
            .get_result::<i64>(&mut conn)? as usize;
        log::info!("Vaccine search matches {total} records");

        Ok(Page::new(into_domain(rows)?, total))
    }
}

impl VaccineWriter for DieselRepository {
    fn create_vaccine(&self, new_vaccine: &NewVaccine) -> RepositoryResult<Vaccine> {
        let mut conn = self.conn()?;
        let insertable: DbNewVaccine = new_vaccine.into();

        let created = diesel::insert_into(vaccines::table)
            .values(&insertable)
            .get_result::<DbVaccine>(&mut conn)?;

        Ok(Vaccine::try_from(created)?)
    }

    fn update_vaccine(
        &self,
        id: VaccineId,
        updates: &UpdateVaccine,
    ) -> RepositoryResult<Vaccine> {
        let mut conn = self.conn()?;
        let changes = DbUpdateVaccine::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(vaccines::table.find(id.get()))
            .set(&changes)
            .get_result::<DbVaccine>(&mut conn)?;

        Ok(Vaccine::try_from(updated)?)
    }

    fn set_vaccine_status(
        &self,
        id: VaccineId,
        status: RecordStatus,
    ) -> RepositoryResult<Vaccine> {
        let mut conn = self.conn()?;

        let updated = diesel::update(vaccines::table.find(id.get()))
            .set((
                vaccines::status.eq(status.as_str()),
                vaccines::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbVaccine>(&mut conn)?;

        Ok(Vaccine::try_from(updated)?)
    }

    fn delete_vaccine(&self, id: VaccineId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(vaccines::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
