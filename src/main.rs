#![allow(warnings)]
//! Ticklist Frontend Entry Point

mod models;
mod commands;
mod scope;
mod store;
mod hierarchy;
mod query;
mod order;
mod counts;
mod calendar;
mod settings;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
