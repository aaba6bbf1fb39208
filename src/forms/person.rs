//! Forms for registering, editing and searching people.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::person::{NewPerson, Person, PersonFilter, PersonSort, UpdatePerson};
use crate::domain::types::{Cpf, PersonId, PersonName};
use crate::forms::{FormError, not_blank, page_request};
use crate::pagination::{PageRequest, PageRequestError};

/// Register/edit form. Field names match the inputs rendered by the templates.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct PersonForm {
    #[serde(default, rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, rename = "nome")]
    #[validate(custom(function = "not_blank", message = "O nome da pessoa é obrigatório"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "O CPF da pessoa é obrigatório"))]
    pub cpf: String,
}

impl PersonForm {
    pub fn to_new_person(&self) -> Result<NewPerson, FormError> {
        self.validate()?;
        Ok(NewPerson::new(
            PersonName::new(self.name.as_str())?,
            Cpf::new(self.cpf.as_str())?,
        ))
    }

    pub fn to_update_person(&self) -> Result<(PersonId, UpdatePerson), FormError> {
        let id = PersonId::new(self.id.ok_or(FormError::MissingId)?)?;
        self.validate()?;
        let updates = UpdatePerson::new(
            PersonName::new(self.name.as_str())?,
            Cpf::new(self.cpf.as_str())?,
        );
        Ok((id, updates))
    }
}

impl From<&Person> for PersonForm {
    fn from(person: &Person) -> Self {
        Self {
            id: Some(person.id.get()),
            name: person.name.to_string(),
            cpf: person.cpf.to_string(),
        }
    }
}

/// Search criteria and page window, read from the query string.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PersonSearchForm {
    #[serde(default, rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl PersonSearchForm {
    pub fn filter(&self) -> PersonFilter {
        PersonFilter::new(self.id, self.name.clone(), self.cpf.clone())
    }

    pub fn page_request(&self) -> Result<PageRequest<PersonSort>, PageRequestError> {
        page_request(self.page, self.size, self.sort.as_deref())
    }

    /// Query string reproducing these criteria, without the page index.
    pub fn link_query(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_default()
    }
}
