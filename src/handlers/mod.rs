//! Request handlers for different server endpoints

pub mod persistence;
pub mod websocket;

use std::convert::Infallible;
use warp::Filter;

use crate::constants::WS_PATH;
use crate::core::server::SharedServerManager;

// Re-export the websocket handler
pub use websocket::handle_ws_client;

/// Every route the server exposes
pub fn routes(
    server: SharedServerManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let ws_route = warp::path(WS_PATH)
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_server(server.clone()))
        .map(|ws: warp::ws::Ws, server: SharedServerManager| {
            ws.on_upgrade(move |socket| handle_ws_client(socket, server))
        });

    let health_route = warp::path("health").and(warp::path::end()).map(|| "OK");

    let save_route = warp::post()
        .and(warp::path!("rooms" / String / "save"))
        .and(with_server(server.clone()))
        .and_then(persistence::save_room);

    let load_route = warp::post()
        .and(warp::path!("rooms" / String / "load"))
        .and(with_server(server))
        .and_then(persistence::load_room);

    ws_route.or(health_route).or(save_route).or(load_route)
}

// Helper function to include the server state in request
fn with_server(
    server: SharedServerManager,
) -> impl Filter<Extract = (SharedServerManager,), Error = Infallible> + Clone {
    warp::any().map(move || server.clone())
}
