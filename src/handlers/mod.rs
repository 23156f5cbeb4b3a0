pub mod admins;
pub mod chat;
pub mod complaints;
pub mod contracts;
pub mod reviews;
pub mod skills;
pub mod transactions;
pub mod users;

use actix_web::web;

use crate::chat::session::ws_connect;

/// Wires every route under the `/api` scope configured in `main`.
///
/// Literal path segments are registered before their `{id}` siblings so
/// `my-contracts` and friends never get captured as a UUID.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/lawyer", web::post().to(users::register_lawyer))
            .route("/client", web::post().to(users::register_client))
            .route("/login", web::post().to(users::login))
            .route("/forgot-password", web::post().to(users::forgot_password))
            .route("/reset-password", web::post().to(users::reset_password))
            .route(
                "/request-verification",
                web::post().to(users::request_verification),
            )
            .route("/verify-email", web::post().to(users::verify_email))
            .route("", web::get().to(users::get_users))
            .route("/lawyer", web::get().to(users::get_lawyers))
            .route("/client", web::get().to(users::get_clients))
            .route("/de-activate/{id}", web::post().to(users::deactivate))
            .route("/activate/{id}", web::post().to(users::activate))
            .route("/suspend/{id}", web::post().to(users::suspend))
            .route("/un-suspend/{id}", web::post().to(users::unsuspend))
            .route(
                "/change-password/{id}",
                web::post().to(users::change_password),
            )
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    );

    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(admins::login))
            .route("", web::post().to(admins::create_admin))
            .route("", web::get().to(admins::get_admins))
            .route("/{id}", web::get().to(admins::get_admin))
            .route("/{id}", web::put().to(admins::update_admin))
            .route("/{id}", web::delete().to(admins::delete_admin)),
    );

    cfg.service(
        web::scope("/contract")
            .route(
                "/create-checkout-session",
                web::post().to(contracts::create_checkout_session),
            )
            .route("/webhook", web::post().to(contracts::payment_webhook))
            .route("/my-contracts", web::get().to(contracts::my_contracts))
            .route("/user/{id}", web::get().to(contracts::get_contracts_by_user))
            .route("/accept/{id}", web::post().to(contracts::accept_contract))
            .route(
                "/end-contract/{id}",
                web::post().to(contracts::end_contract),
            )
            .route("", web::post().to(contracts::create_contract))
            .route("", web::get().to(contracts::get_contracts))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}", web::delete().to(contracts::delete_contract)),
    );

    cfg.service(
        web::scope("/review")
            .route("/client/{id}", web::get().to(reviews::get_reviews_by_client))
            .route("/lawyer/{id}", web::get().to(reviews::get_reviews_by_lawyer))
            .route("", web::post().to(reviews::create_review))
            .route("", web::get().to(reviews::get_reviews))
            .route("/{id}", web::get().to(reviews::get_review))
            .route("/{id}", web::delete().to(reviews::delete_review)),
    );

    cfg.service(
        web::scope("/complaint")
            .route(
                "/user/{id}",
                web::get().to(complaints::get_complaints_by_user),
            )
            .route("", web::post().to(complaints::create_complaint))
            .route("", web::get().to(complaints::get_complaints))
            .route("/{id}", web::get().to(complaints::get_complaint))
            .route("/{id}", web::put().to(complaints::resolve_complaint)),
    );

    cfg.service(
        web::scope("/transaction")
            .route("/debit", web::post().to(transactions::create_debit))
            .route(
                "/my-transactions",
                web::get().to(transactions::my_transactions),
            )
            .route(
                "/user/{id}",
                web::get().to(transactions::get_transactions_by_user),
            ),
    );

    cfg.service(
        web::scope("/skill")
            .route("/my-skills", web::put().to(skills::assign_skills))
            .route("/my-skills", web::get().to(skills::my_skills))
            .route("/map", web::get().to(skills::get_skill_map))
            .route("/lawyer/{id}", web::get().to(skills::get_lawyer_skills))
            .route(
                "/{id}/lawyers",
                web::get().to(skills::get_lawyers_by_skill),
            )
            .route("", web::post().to(skills::create_skill))
            .route("", web::get().to(skills::get_skills)),
    );

    cfg.service(
        web::scope("/chat")
            .route("/my-rooms", web::get().to(chat::my_rooms))
            .route("/room/name/{name}", web::get().to(chat::get_room_by_name))
            .route("/room/user/{id}", web::get().to(chat::get_rooms_of_user))
            .route("/room/{id}/members", web::put().to(chat::add_members))
            .route(
                "/room/{id}/messages",
                web::get().to(chat::get_room_messages),
            )
            .route("/room", web::post().to(chat::create_room))
            .route("/room", web::get().to(chat::get_rooms))
            .route("/room/{id}", web::get().to(chat::get_room))
            .route("/ws/{room_id}", web::get().to(ws_connect)),
    );
}
