use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::person::{
    NewPerson as DomainNewPerson, Person as DomainPerson, UpdatePerson as DomainUpdatePerson,
};
use crate::domain::types::{Cpf, PersonId, PersonName, RecordStatus, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::people)]
/// Diesel model for [`crate::domain::person::Person`].
pub struct Person {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::people)]
/// Insertable form of [`Person`].
pub struct NewPerson<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::people)]
/// Data used when updating a [`Person`] record.
pub struct UpdatePerson<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Person> for DomainPerson {
    type Error = TypeConstraintError;

    fn try_from(person: Person) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PersonId::try_from(person.id)?,
            name: PersonName::new(person.name)?,
            cpf: Cpf::new(person.cpf)?,
            status: person.status.parse::<RecordStatus>()?,
            created_at: person.created_at,
            updated_at: person.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPerson> for NewPerson<'a> {
    fn from(person: &'a DomainNewPerson) -> Self {
        Self {
            name: person.name.as_str(),
            cpf: person.cpf.as_str(),
            status: RecordStatus::Active.as_str(),
        }
    }
}

impl<'a> UpdatePerson<'a> {
    pub fn new(person: &'a DomainUpdatePerson, updated_at: NaiveDateTime) -> Self {
        Self {
            name: person.name.as_str(),
            cpf: person.cpf.as_str(),
            updated_at,
        }
    }
}
