//! Routes for registering, searching, editing and removing people.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::notification::Outcome;
use crate::forms::person::{PersonForm, PersonSearchForm};
use crate::forms::{FieldErrors, RecordIdForm, decode};
use crate::repository::DieselRepository;
use crate::routes::{
    Section, base_context, completed, failed, invalid_search, is_htmx, render_template, render_with,
    show_outcome, swapped_fragment,
};
use crate::services::{ServiceError, person as person_service};

pub const PEOPLE: Section = Section {
    prefix: "/pessoas",
    label: "Pessoa",
    templates: "people",
    nav: "pessoas",
};

fn render_form(
    req: &HttpRequest,
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &str,
    form: &PersonForm,
    errors: &FieldErrors,
) -> HttpResponse {
    let mut context = base_context(flash_messages, PEOPLE.nav);
    context.insert("form", form);
    context.insert("errors", errors);
    render_template(tera, &PEOPLE.template(page, is_htmx(req)), &context)
}

#[get("/pessoas/todas")]
/// Table with every active person.
pub async fn show_all_people(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match person_service::list_active_people(repo.get_ref()) {
        Ok(people) => {
            let mut context = base_context(&flash_messages, PEOPLE.nav);
            context.insert("people", &people);
            render_template(&tera, &PEOPLE.template("all", is_htmx(&req)), &context)
        }
        Err(err) => failed(&req, &PEOPLE, err),
    }
}

#[get("/pessoas/cadastrar")]
pub async fn show_register_person(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &req,
        &tera,
        &flash_messages,
        "register",
        &PersonForm::default(),
        &FieldErrors::new(),
    )
}

#[post("/pessoas/cadastrar")]
/// Save a new person; invalid input re-renders the form with field messages.
pub async fn register_person(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let form: PersonForm = match decode(&body) {
        Ok(form) => form,
        Err(err) => return failed(&req, &PEOPLE, err.into()),
    };

    match person_service::register_person(repo.get_ref(), &form) {
        Ok(_) => completed(&req, &PEOPLE, Outcome::Cadastro),
        Err(ServiceError::Validation(errors)) => {
            render_form(&req, &tera, &flash_messages, "register", &form, &errors)
        }
        Err(err) => failed(&req, &PEOPLE, err),
    }
}

#[get("/pessoas/sucesso/{outcome}")]
pub async fn show_person_outcome(
    req: HttpRequest,
    outcome: web::Path<Outcome>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_outcome(
        &req,
        &tera,
        &flash_messages,
        &PEOPLE,
        outcome.into_inner(),
    )
}

#[get("/pessoas/abrirpesquisar")]
pub async fn show_search_people(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, PEOPLE.nav);
    context.insert("criteria", &PersonSearchForm::default());
    render_template(&tera, &PEOPLE.template("search", is_htmx(&req)), &context)
}

#[get("/pessoas/pesquisar")]
/// Filtered, paginated search. Page links repeat the current criteria.
pub async fn search_people(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = decode::<PersonSearchForm>(req.query_string().as_bytes())
        .map_err(ServiceError::from)
        .and_then(|form| person_service::search_people(repo.get_ref(), form));

    match result {
        Ok(data) => {
            let mut context = base_context(&flash_messages, PEOPLE.nav);
            context.insert("criteria", &data.criteria);
            context.insert("results", &data.results);
            if is_htmx(&req) {
                render_with(
                    swapped_fragment(),
                    &tera,
                    &PEOPLE.template("results", true),
                    &context,
                )
            } else {
                render_template(&tera, &PEOPLE.template("results", false), &context)
            }
        }
        Err(ServiceError::BadRequest(message)) => {
            invalid_search(&req, &tera, &flash_messages, &PEOPLE, &message)
        }
        Err(err) => failed(&req, &PEOPLE, err),
    }
}

#[post("/pessoas/abriralterar")]
/// Edit form for the posted person id.
pub async fn show_edit_person(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let result = decode::<RecordIdForm>(&body)
        .and_then(|form| form.id())
        .map_err(ServiceError::from)
        .and_then(|id| person_service::load_person(repo.get_ref(), id));

    match result {
        Ok(person) => render_form(
            &req,
            &tera,
            &flash_messages,
            "edit",
            &PersonForm::from(&person),
            &FieldErrors::new(),
        ),
        Err(err) => failed(&req, &PEOPLE, err),
    }
}

#[post("/pessoas/alterar")]
pub async fn update_person(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let form: PersonForm = match decode(&body) {
        Ok(form) => form,
        Err(err) => return failed(&req, &PEOPLE, err.into()),
    };

    match person_service::update_person(repo.get_ref(), &form) {
        Ok(_) => completed(&req, &PEOPLE, Outcome::Alteracao),
        Err(ServiceError::Validation(errors)) if form.id.is_some() => {
            render_form(&req, &tera, &flash_messages, "edit", &form, &errors)
        }
        Err(err) => failed(&req, &PEOPLE, err),
    }
}

#[post("/pessoas/remover")]
/// Soft delete: the person is marked inactive, never removed.
pub async fn remove_person(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = decode::<RecordIdForm>(&body)
        .and_then(|form| form.id())
        .map_err(ServiceError::from)
        .and_then(|id| person_service::deactivate_person(repo.get_ref(), id));

    match result {
        Ok(_) => completed(&req, &PEOPLE, Outcome::Remocao),
        Err(err) => failed(&req, &PEOPLE, err),
    }
}
