//! HTTP handlers and the helpers they share for rendering and HTMX swaps.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::domain::types::safe_html;
use crate::dto::notification::Outcome;
use crate::services::ServiceError;

pub mod main;
pub mod people;
pub mod vaccines;

/// Element every HTMX navigation swaps.
pub const HTMX_TARGET: &str = "#main";
/// Client-side event fired after a fragment is swapped in.
pub const HTMX_SWAPPED_EVENT: &str = "htmlAtualizado";

/// A group of record pages living under one URL prefix.
#[derive(Debug)]
pub struct Section {
    pub prefix: &'static str,
    /// Singular name shown in messages.
    pub label: &'static str,
    pub templates: &'static str,
    /// Key highlighted in the navigation bar.
    pub nav: &'static str,
}

impl Section {
    pub fn path(&self, action: &str) -> String {
        format!("{}/{}", self.prefix, action)
    }

    pub fn success_path(&self, outcome: Outcome) -> String {
        format!("{}/sucesso/{}", self.prefix, outcome.as_path())
    }

    /// Full page for regular requests, `_name` fragment for HTMX requests.
    pub fn template(&self, name: &str, htmx: bool) -> String {
        if htmx {
            format!("{}/_{}.html", self.templates, name)
        } else {
            format!("{}/{}.html", self.templates, name)
        }
    }
}

/// Tera filter rendering stored free text as sanitized HTML.
fn sanitize_html(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("sanitize_html expects a string"))?;
    Ok(Value::String(safe_html(text)))
}

/// Parses every template matching `glob` and registers the app's filters.
pub fn load_templates(glob: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("sanitize_html", sanitize_html);
    Ok(tera)
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending flash alerts and the active nav entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with(HttpResponse::Ok(), tera, template, context)
}

pub fn render_with(
    mut builder: HttpResponseBuilder,
    tera: &Tera,
    template: &str,
    context: &Context,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => builder.content_type("text/html; charset=utf-8").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Response builder announcing the swap to client-side listeners.
pub fn swapped_fragment() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header(("HX-Trigger-After-Swap", HTMX_SWAPPED_EVENT));
    builder
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[derive(Serialize)]
struct HxLocation<'a> {
    path: &'a str,
    target: &'a str,
    swap: &'a str,
}

/// Tells HTMX to fetch `path` and swap it over the main element.
pub fn hx_location(path: &str) -> HttpResponse {
    let location = HxLocation {
        path,
        target: HTMX_TARGET,
        swap: "outerHTML",
    };
    match serde_json::to_string(&location) {
        Ok(value) => HttpResponse::Ok()
            .insert_header(("HX-Location", value))
            .finish(),
        Err(err) => {
            log::error!("Failed to encode HX-Location for '{path}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Moves the browser to `path`, through HTMX when the request came from it.
pub fn navigate(req: &HttpRequest, path: &str) -> HttpResponse {
    if is_htmx(req) {
        hx_location(path)
    } else {
        redirect(path)
    }
}

/// Response after a successful mutation: go to the section's success page.
pub fn completed(req: &HttpRequest, section: &Section, outcome: Outcome) -> HttpResponse {
    if !is_htmx(req) {
        FlashMessage::success(outcome.notification(section.label).message).send();
    }
    navigate(req, &section.success_path(outcome))
}

/// Maps failures that are not re-rendered in a form onto a flash and a redirect.
pub fn failed(req: &HttpRequest, section: &Section, err: ServiceError) -> HttpResponse {
    let search = section.path("abrirpesquisar");
    match err {
        ServiceError::NotFound => {
            FlashMessage::error(format!("{} não encontrada.", section.label)).send();
            navigate(req, &search)
        }
        ServiceError::BadRequest(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::warning(message).send();
            navigate(req, &search)
        }
        ServiceError::Validation(errors) => {
            let message = errors.into_values().flatten().collect::<Vec<_>>().join(" ");
            FlashMessage::warning(message).send();
            navigate(req, &search)
        }
        ServiceError::Repository(err) => {
            log::error!("Request to {} failed: {err}", section.prefix);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Search form re-rendered with status 400 for unusable search parameters.
pub fn invalid_search(
    req: &HttpRequest,
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    section: &Section,
    message: &str,
) -> HttpResponse {
    let mut context = base_context(flash_messages, section.nav);
    context.insert("alerts", &[(message, "warning")]);
    render_with(
        HttpResponse::BadRequest(),
        tera,
        &section.template("search", is_htmx(req)),
        &context,
    )
}

/// Confirmation shown after a mutation. HTMX requests get the next fragment
/// with a toast, regular requests get the message page.
pub fn show_outcome(
    req: &HttpRequest,
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    section: &Section,
    outcome: Outcome,
) -> HttpResponse {
    let mut context = base_context(flash_messages, section.nav);

    if !is_htmx(req) {
        context.insert("mensagem", &outcome.page_message(section.label));
        context.insert("section", section.prefix);
        return render_template(tera, "main/message.html", &context);
    }

    context.insert("notification", &outcome.notification(section.label));
    let next = if outcome.returns_to_register() {
        "register"
    } else {
        "search"
    };
    render_with(
        swapped_fragment(),
        tera,
        &section.template(next, true),
        &context,
    )
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    const SECTION: Section = Section {
        prefix: "/pessoas",
        label: "Pessoa",
        templates: "people",
        nav: "pessoas",
    };

    #[test]
    fn section_builds_paths_and_templates() {
        assert_eq!(SECTION.path("cadastrar"), "/pessoas/cadastrar");
        assert_eq!(
            SECTION.success_path(Outcome::Remocao),
            "/pessoas/sucesso/remocao"
        );
        assert_eq!(SECTION.template("search", false), "people/search.html");
        assert_eq!(SECTION.template("search", true), "people/_search.html");
    }

    #[test]
    fn htmx_requests_are_detected_by_header() {
        let req = TestRequest::default()
            .insert_header(("HX-Request", "true"))
            .to_http_request();
        assert!(is_htmx(&req));
        assert!(!is_htmx(&TestRequest::default().to_http_request()));
    }

    #[test]
    fn hx_location_targets_main_element() {
        let response = hx_location("/pessoas/sucesso/cadastro");
        let value = response
            .headers()
            .get("HX-Location")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(
            value,
            r##"{"path":"/pessoas/sucesso/cadastro","target":"#main","swap":"outerHTML"}"##
        );
    }

    #[test]
    fn sanitize_html_escapes_text_and_drops_scripts() {
        let rendered = sanitize_html(
            &Value::String("Difteria & Tétano <script>x</script><b>3</b>".into()),
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(rendered, Value::String("Difteria &amp; Tétano <b>3</b>".into()));
        assert!(sanitize_html(&Value::from(3), &HashMap::new()).is_err());
    }

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/vacinas/abrirpesquisar");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/vacinas/abrirpesquisar"
        );
    }
}
