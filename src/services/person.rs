//! Services coordinating the person registration workflows.

use crate::domain::person::Person;
use crate::domain::types::{PersonId, RecordStatus};
use crate::dto::search::SearchPageData;
use crate::forms::person::{PersonForm, PersonSearchForm};
use crate::pagination::Paginated;
use crate::repository::{PersonReader, PersonWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every active person ordered by id.
pub fn list_active_people<R>(repo: &R) -> ServiceResult<Vec<Person>>
where
    R: PersonReader + ?Sized,
{
    let people = repo.list_active_people().map_err(|err| {
        log::error!("Failed to list people: {err}");
        err
    })?;
    Ok(people)
}

/// Runs a filtered page query and wraps the result for the results template.
pub fn search_people<R>(
    repo: &R,
    form: PersonSearchForm,
) -> ServiceResult<SearchPageData<Person, PersonSearchForm>>
where
    R: PersonReader + ?Sized,
{
    let request = form.page_request()?;
    let filter = form.filter();

    let page = repo.search_people(&filter, &request).map_err(|err| {
        log::error!("Failed to search people: {err}");
        err
    })?;
    log::info!(
        "Search for people matched {} record(s), page {}",
        page.total,
        request.page()
    );

    let results = Paginated::new(page, &request, form.link_query());
    Ok(SearchPageData {
        results,
        criteria: form,
    })
}

/// Registers a new active person from the submitted form.
pub fn register_person<R>(repo: &R, form: &PersonForm) -> ServiceResult<Person>
where
    R: PersonWriter + ?Sized,
{
    let new_person = form.to_new_person()?;
    let person = repo.create_person(&new_person).map_err(|err| {
        log::error!("Failed to register person: {err}");
        err
    })?;
    log::info!("Registered person {}", person.id);
    Ok(person)
}

/// Loads an active person for editing.
pub fn load_person<R>(repo: &R, id: i32) -> ServiceResult<Person>
where
    R: PersonReader + ?Sized,
{
    let id = PersonId::new(id)?;
    match repo.get_person_by_id(id)? {
        Some(person) if person.is_active() => Ok(person),
        _ => Err(ServiceError::NotFound),
    }
}

/// Applies the edit form to an existing active person.
pub fn update_person<R>(repo: &R, form: &PersonForm) -> ServiceResult<Person>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    let (id, updates) = form.to_update_person()?;
    load_person(repo, id.get())?;

    let person = repo.update_person(id, &updates).map_err(|err| {
        log::error!("Failed to update person {id}: {err}");
        err
    })?;
    Ok(person)
}

/// Soft-deletes a person by moving it to the inactive status.
pub fn deactivate_person<R>(repo: &R, id: i32) -> ServiceResult<Person>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    let person = load_person(repo, id)?;

    let person = repo
        .set_person_status(person.id, RecordStatus::Inactive)
        .map_err(|err| {
            log::error!("Failed to deactivate person {id}: {err}");
            err
        })?;
    log::info!("Deactivated person {}", person.id);
    Ok(person)
}

/// Physically removes a person. Not reachable from the web flows.
pub fn delete_person<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: PersonWriter + ?Sized,
{
    let id = PersonId::new(id)?;
    repo.delete_person(id).map_err(|err| {
        log::error!("Failed to delete person {id}: {err}");
        err
    })?;
    Ok(())
}
