pub mod health;
pub mod todos;

use actix_web::web;

/// Route table for the authenticated `/api` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/todo")
            .route(web::get().to(todos::list_todos))
            .route(web::post().to(todos::create_todo)),
    )
    .service(
        web::resource("/todo/{id}")
            .route(web::get().to(todos::get_todo))
            .route(web::put().to(todos::update_todo))
            .route(web::delete().to(todos::delete_todo)),
    );
}
