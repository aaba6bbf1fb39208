use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::routes::{base_context, is_htmx, render_template};

#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "index");
    let template = if is_htmx(&req) {
        "main/_index.html"
    } else {
        "main/index.html"
    };
    render_template(&tera, template, &context)
}
