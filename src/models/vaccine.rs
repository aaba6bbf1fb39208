use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    RecordStatus, TypeConstraintError, VaccineDescription, VaccineId, VaccineName,
};
use crate::domain::vaccine::{
    NewVaccine as DomainNewVaccine, UpdateVaccine as DomainUpdateVaccine,
    Vaccine as DomainVaccine,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::vaccines)]
/// Diesel model for [`crate::domain::vaccine::Vaccine`].
pub struct Vaccine {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vaccines)]
pub struct NewVaccine<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vaccines)]
pub struct UpdateVaccine<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Vaccine> for DomainVaccine {
    type Error = TypeConstraintError;

    fn try_from(vaccine: Vaccine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VaccineId::try_from(vaccine.id)?,
            name: VaccineName::new(vaccine.name)?,
            description: VaccineDescription::new(vaccine.description)?,
            status: vaccine.status.parse::<RecordStatus>()?,
            created_at: vaccine.created_at,
            updated_at: vaccine.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewVaccine> for NewVaccine<'a> {
    fn from(vaccine: &'a DomainNewVaccine) -> Self {
        Self {
            name: vaccine.name.as_str(),
            description: vaccine.description.as_str(),
            status: RecordStatus::Active.as_str(),
        }
    }
}

impl<'a> UpdateVaccine<'a> {
    pub fn new(vaccine: &'a DomainUpdateVaccine, updated_at: NaiveDateTime) -> Self {
        Self {
            name: vaccine.name.as_str(),
            description: vaccine.description.as_str(),
            updated_at,
        }
    }
}
