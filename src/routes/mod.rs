use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod league;
pub mod registration;
pub mod websocket;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Change feed (public, like the reads it invalidates)
    cfg.service(
        web::resource("/league-ws")
            .route(web::get().to(websocket::league_ws_route))
    );

    // Public reads. Literal paths go before their `{id}` siblings.
    cfg.service(
        web::scope("/league")
            .service(league::list_teams)
            .service(league::get_team)
            .service(league::get_standings)
            .service(league::get_group_standings)
            .service(league::list_players)
            .service(league::top_scorers)
            .service(league::get_player)
            .service(league::list_matches)
            .service(league::recent_results)
            .service(league::upcoming_matches)
            .service(league::live_matches)
            .service(league::todays_matches)
            .service(league::get_match)
            .service(league::list_match_events)
            .service(league::list_bracket)
            .service(league::get_elimination_match)
    );
    // Every mutation requires a session
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware)
            .service(auth::session)
            .service(admin::create_team)
            .service(admin::recalculate_stats)
            .service(admin::update_team)
            .service(admin::delete_team)
            .service(admin::create_player)
            .service(admin::update_player)
            .service(admin::delete_player)
            .service(admin::create_match)
            .service(admin::delete_all_matches)
            .service(admin::update_match)
            .service(admin::delete_match)
            .service(admin::start_match)
            .service(admin::adjust_match_score)
            .service(admin::set_match_minute)
            .service(admin::finish_match)
            .service(admin::create_match_event)
            .service(admin::delete_match_event)
            .service(admin::create_elimination_match)
            .service(admin::update_elimination_match)
            .service(admin::delete_elimination_match)
            .service(admin::start_elimination_match)
            .service(admin::adjust_elimination_score)
            .service(admin::set_elimination_minute)
            .service(admin::finish_elimination_match)
    );
}
