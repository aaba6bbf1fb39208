//! Services coordinating the vaccine catalogue workflows.

use crate::domain::types::{RecordStatus, VaccineId};
use crate::domain::vaccine::Vaccine;
use crate::dto::search::SearchPageData;
use crate::forms::vaccine::{VaccineForm, VaccineSearchForm};
use crate::pagination::Paginated;
use crate::repository::{VaccineReader, VaccineWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_active_vaccines<R>(repo: &R) -> ServiceResult<Vec<Vaccine>>
where
    R: VaccineReader + ?Sized,
{
    let vaccines = repo.list_active_vaccines().map_err(|err| {
        log::error!("Failed to list vaccines: {err}");
        err
    })?;
    Ok(vaccines)
}

pub fn search_vaccines<R>(
    repo: &R,
    form: VaccineSearchForm,
) -> ServiceResult<SearchPageData<Vaccine, VaccineSearchForm>>
where
    R: VaccineReader + ?Sized,
{
    let request = form.page_request()?;
    let filter = form.filter();

    let page = repo.search_vaccines(&filter, &request).map_err(|err| {
        log::error!("Failed to search vaccines: {err}");
        err
    })?;
    log::info!(
        "Search for vaccines matched {} record(s), page {}",
        page.total,
        request.page()
    );

    let results = Paginated::new(page, &request, form.link_query());
    Ok(SearchPageData {
        results,
        criteria: form,
    })
}

pub fn register_vaccine<R>(repo: &R, form: &VaccineForm) -> ServiceResult<Vaccine>
where
    R: VaccineWriter + ?Sized,
{
    let new_vaccine = form.to_new_vaccine()?;
    let vaccine = repo.create_vaccine(&new_vaccine).map_err(|err| {
        log::error!("Failed to register vaccine: {err}");
        err
    })?;
    log::info!("Registered vaccine {}", vaccine.id);
    Ok(vaccine)
}

/// Loads an active vaccine; inactive ones are treated as missing.
pub fn load_vaccine<R>(repo: &R, id: i32) -> ServiceResult<Vaccine>
where
    R: VaccineReader + ?Sized,
{
    let id = VaccineId::new(id)?;
    match repo.get_vaccine_by_id(id)? {
        Some(vaccine) if vaccine.is_active() => Ok(vaccine),
        _ => Err(ServiceError::NotFound),
    }
}

pub fn update_vaccine<R>(repo: &R, form: &VaccineForm) -> ServiceResult<Vaccine>
where
    R: VaccineReader + VaccineWriter + ?Sized,
{
    let (id, updates) = form.to_update_vaccine()?;
    load_vaccine(repo, id.get())?;

    let vaccine = repo.update_vaccine(id, &updates).map_err(|err| {
        log::error!("Failed to update vaccine {id}: {err}");
        err
    })?;
    Ok(vaccine)
}

/// Soft-deletes a vaccine by moving it to the inactive status.
pub fn deactivate_vaccine<R>(repo: &R, id: i32) -> ServiceResult<Vaccine>
where
    R: VaccineReader + VaccineWriter + ?Sized,
{
    let vaccine = load_vaccine(repo, id)?;

    let vaccine = repo
        .set_vaccine_status(vaccine.id, RecordStatus::Inactive)
        .map_err(|err| {
            log::error!("Failed to deactivate vaccine {id}: {err}");
            err
        })?;
    log::info!("Deactivated vaccine {}", vaccine.id);
    Ok(vaccine)
}

/// Physically removes a vaccine. Not reachable from the web flows.
pub fn delete_vaccine<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: VaccineWriter + ?Sized,
{
    let id = VaccineId::new(id)?;
    repo.delete_vaccine(id).map_err(|err| {
        log::error!("Failed to delete vaccine {id}: {err}");
        err
    })?;
    Ok(())
}
